//! Bracket and BracketError.

use crate::models::config::SeedingConfig;
use crate::models::entrant::{Entrant, EntrantId};
use crate::models::game::{GameMatch, MatchId, Occupant};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during bracket operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// The requested winner is not one of the match's two occupants.
    InvalidWinner { match_id: MatchId, winner: EntrantId },
    /// A side of the match is still waiting on an earlier round.
    MatchNotReady(MatchId),
    /// No match with this id (reported by the tournament wrapper; the engine itself ignores it).
    MatchNotFound(MatchId),
    /// Entrant not found in the roster.
    EntrantNotFound(EntrantId),
    /// An entrant with this name is already entered.
    DuplicateEntrant,
    /// Entrant names must not be blank.
    EmptyName,
    /// No round-1 losers yet, so there is no consolation draw.
    NoConsolationBracket,
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::InvalidWinner { .. } => write!(f, "Winner must be one of the two entrants in the match"),
            BracketError::MatchNotReady(_) => write!(f, "Match is still waiting on an earlier result"),
            BracketError::MatchNotFound(_) => write!(f, "Match not found"),
            BracketError::EntrantNotFound(_) => write!(f, "Entrant not found"),
            BracketError::DuplicateEntrant => write!(f, "An entrant with this name already exists"),
            BracketError::EmptyName => write!(f, "Entrant name must not be empty"),
            BracketError::NoConsolationBracket => write!(f, "There is no consolation bracket yet"),
        }
    }
}

impl std::error::Error for BracketError {}

/// Unique identifier for a bracket.
pub type BracketId = Uuid;

/// Which draw a bracket belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketKind {
    #[default]
    Main,
    Consolation,
}

/// One single-elimination draw: the entrants it was built from and all of its matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: BracketId,
    pub kind: BracketKind,
    /// Deduplicated entrants, in seeding order.
    pub entrants: Vec<Entrant>,
    /// Ordered by round, then slot.
    pub matches: Vec<GameMatch>,
    pub config: SeedingConfig,
}

impl Bracket {
    pub fn from_parts(
        kind: BracketKind,
        entrants: Vec<Entrant>,
        matches: Vec<GameMatch>,
        config: SeedingConfig,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            entrants,
            matches,
            config,
        }
    }

    pub fn round_count(&self) -> u32 {
        self.matches.iter().map(|m| m.round).max().unwrap_or(0)
    }

    pub fn matches_in_round(&self, round: u32) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    pub fn find_match(&self, match_id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn final_match(&self) -> Option<&GameMatch> {
        let last = self.round_count();
        self.matches.iter().find(|m| m.round == last && m.slot == 0)
    }

    /// Winner of the final, once decided.
    pub fn champion(&self) -> Option<EntrantId> {
        self.final_match()?.winner?.entrant_id()
    }

    pub fn entrant(&self, id: EntrantId) -> Option<&Entrant> {
        self.entrants.iter().find(|e| e.id == id)
    }

    /// Display name for an occupant ("bye" for the pass sentinel).
    pub fn entrant_name(&self, occupant: Occupant) -> Option<&str> {
        match occupant {
            Occupant::Entrant(id) => self.entrant(id).map(|e| e.name.as_str()),
            Occupant::Pass => Some("bye"),
        }
    }

    /// Entrants who lost a round-1 match played between two real entrants.
    pub fn round_one_losers(&self) -> Vec<EntrantId> {
        round_one_losers(&self.matches)
    }
}

/// Losers of decided round-1 matches, in slot order.
pub fn round_one_losers(matches: &[GameMatch]) -> Vec<EntrantId> {
    let mut first_round: Vec<&GameMatch> = matches.iter().filter(|m| m.round == 1).collect();
    first_round.sort_by_key(|m| m.slot);
    first_round.into_iter().filter_map(GameMatch::loser).collect()
}
