//! Consolation draw for round-1 losers of the main bracket.

use crate::logic::builder::generate_bracket;
use crate::models::{Bracket, BracketKind, EntrantId};
use std::collections::HashSet;

/// Build (or keep) the consolation bracket for the current round-1 losers of `primary`.
///
/// With the same losers as `existing` (by id, in any order) the existing bracket is returned as-is,
/// results included. Any change in membership rebuilds it from scratch. No losers, no bracket.
pub fn derive_consolation(primary: &Bracket, existing: Option<&Bracket>) -> Option<Bracket> {
    let losers: HashSet<EntrantId> = primary.round_one_losers().into_iter().collect();
    if losers.is_empty() {
        return None;
    }
    if let Some(existing) = existing {
        let members: HashSet<EntrantId> = existing.entrants.iter().map(|e| e.id).collect();
        if members == losers {
            return Some(existing.clone());
        }
    }
    let entrants: Vec<_> = primary
        .entrants
        .iter()
        .filter(|e| losers.contains(&e.id))
        .cloned()
        .collect();
    log::info!("Rebuilding consolation bracket with {} entrants", entrants.len());
    Some(generate_bracket(
        BracketKind::Consolation,
        &entrants,
        primary.config,
    ))
}
