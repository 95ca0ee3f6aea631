//! Single-elimination bracket organizer: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    add_entrant, bracket_size, build_bracket, clear_consolation_result, clear_match_winner,
    clear_result, create_tournament, derive_consolation, generate_bracket, place_seeds,
    record_consolation_result, record_result, regenerate, remove_entrant, resolve_auto_advances,
    score_slots, seed_order, set_match_winner, SeedingScore,
};
pub use models::{
    dedupe_entrants, identity_key, origin_key, round_one_losers, sort_for_seeding, Bracket,
    BracketError, BracketId, BracketKind, Entrant, EntrantId, GameMatch, MatchId, Occupant,
    SeedingConfig, Side, Tournament, TournamentId,
};
