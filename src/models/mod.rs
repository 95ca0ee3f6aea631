//! Data structures for brackets: entrants, matches, brackets, tournaments.

mod bracket;
mod config;
mod entrant;
mod game;
mod tournament;

pub use bracket::{round_one_losers, Bracket, BracketError, BracketId, BracketKind};
pub use config::SeedingConfig;
pub use entrant::{
    dedupe_entrants, identity_key, origin_key, sort_for_seeding, Entrant, EntrantId,
};
pub use game::{GameMatch, MatchId, Occupant, Side};
pub use tournament::{Tournament, TournamentId};
