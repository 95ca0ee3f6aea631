//! Bracket business logic: seeding, building, winner propagation, consolation, roster changes.

mod builder;
mod consolation;
mod propagation;
mod results;
mod roster;
mod seeding;

pub use builder::{build_bracket, generate_bracket};
pub use consolation::derive_consolation;
pub use propagation::{clear_match_winner, resolve_auto_advances, set_match_winner};
pub use results::{clear_consolation_result, clear_result, record_consolation_result, record_result};
pub use roster::{add_entrant, create_tournament, regenerate, remove_entrant};
pub use seeding::{bracket_size, place_seeds, score_slots, seed_order, SeedingScore};
