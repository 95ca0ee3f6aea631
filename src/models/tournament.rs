//! Tournament: the entrant roster with its main and consolation brackets.

use crate::models::bracket::{Bracket, BracketKind};
use crate::models::config::SeedingConfig;
use crate::models::entrant::{Entrant, EntrantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Full tournament state. The main bracket is rebuilt whenever the roster changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub config: SeedingConfig,
    /// Roster as entered (may contain duplicates the bracket drops).
    pub entrants: Vec<Entrant>,
    pub bracket: Bracket,
    /// Draw for round-1 losers, once there are any.
    pub consolation: Option<Bracket>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tournament {
    /// Create an empty tournament (no entrants, no matches).
    pub fn new(name: impl Into<String>, config: SeedingConfig) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            config,
            entrants: Vec::new(),
            bracket: Bracket::from_parts(BracketKind::Main, Vec::new(), Vec::new(), config),
            consolation: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn entrant(&self, id: EntrantId) -> Option<&Entrant> {
        self.entrants.iter().find(|e| e.id == id)
    }

    /// Whether any non-bye result has been recorded in the main bracket.
    pub fn has_results(&self) -> bool {
        !self.bracket.round_one_losers().is_empty()
            || self
                .bracket
                .matches
                .iter()
                .any(|m| m.round > 1 && m.loser().is_some())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
