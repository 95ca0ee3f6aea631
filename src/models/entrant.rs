//! Entrant and the name keys used for deduplication and same-origin conflicts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for an entrant (used in matches and lookups).
pub type EntrantId = Uuid;

/// A team or individual competing in a bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub id: EntrantId,
    pub name: String,
    /// Priority entrants are kept apart in round 1 and shielded from byes.
    #[serde(default)]
    pub priority: bool,
}

impl Entrant {
    /// Create a new non-priority entrant with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            priority: false,
        }
    }

    /// Create a new priority entrant with a fresh id.
    pub fn priority(name: impl Into<String>) -> Self {
        Self {
            priority: true,
            ..Self::new(name)
        }
    }

    /// Key identifying "the same entrant entered twice".
    pub fn identity_key(&self) -> String {
        identity_key(&self.name)
    }

    /// Key identifying entrants from the same origin (school, club), e.g. "Eagles (Blue)" and "Eagles".
    pub fn origin_key(&self) -> String {
        origin_key(&self.name)
    }
}

/// Lowercase, drop punctuation, collapse whitespace.
pub fn identity_key(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Identity key with any parenthetical / bracketed suffix removed.
pub fn origin_key(name: &str) -> String {
    let mut base = String::with_capacity(name.len());
    let mut depth = 0usize;
    for c in name.chars() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => base.push(c),
            _ => {}
        }
    }
    let key = identity_key(&base);
    if key.is_empty() {
        identity_key(name)
    } else {
        key
    }
}

/// Drop repeated ids and repeated identity keys; the first occurrence wins.
pub fn dedupe_entrants(entrants: &[Entrant]) -> Vec<Entrant> {
    let mut seen_ids = HashSet::new();
    let mut seen_keys = HashSet::new();
    let mut out = Vec::with_capacity(entrants.len());
    for e in entrants {
        let key = e.identity_key();
        if !seen_ids.insert(e.id) || !seen_keys.insert(key) {
            log::debug!("Dropping duplicate entrant {:?} ({})", e.name, e.id);
            continue;
        }
        out.push(e.clone());
    }
    out
}

/// Priority entrants first, then alphabetical (case-insensitive), id as the last tie-break.
pub fn sort_for_seeding(entrants: &mut [Entrant]) {
    entrants.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.id.cmp(&b.id))
    });
}
