//! Roster changes: every change throws away the old brackets and seeds a new one.

use crate::logic::builder::generate_bracket;
use crate::models::{
    identity_key, BracketError, BracketKind, Entrant, EntrantId, SeedingConfig, Tournament,
};

/// Create a tournament and seed its main bracket from `entrants`.
pub fn create_tournament(
    name: impl Into<String>,
    entrants: Vec<Entrant>,
    config: SeedingConfig,
) -> Tournament {
    let mut tournament = Tournament::new(name, config);
    tournament.entrants = entrants;
    regenerate(&mut tournament);
    tournament
}

/// Add an entrant and reseed. Names must be non-blank and unique (after normalization).
pub fn add_entrant(
    tournament: &mut Tournament,
    name: &str,
    priority: bool,
) -> Result<EntrantId, BracketError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BracketError::EmptyName);
    }
    let key = identity_key(name);
    if tournament.entrants.iter().any(|e| e.identity_key() == key) {
        return Err(BracketError::DuplicateEntrant);
    }
    let entrant = Entrant {
        priority,
        ..Entrant::new(name)
    };
    let id = entrant.id;
    tournament.entrants.push(entrant);
    regenerate(tournament);
    Ok(id)
}

/// Remove an entrant by id and reseed.
pub fn remove_entrant(tournament: &mut Tournament, entrant_id: EntrantId) -> Result<(), BracketError> {
    let idx = tournament
        .entrants
        .iter()
        .position(|e| e.id == entrant_id)
        .ok_or(BracketError::EntrantNotFound(entrant_id))?;
    tournament.entrants.remove(idx);
    regenerate(tournament);
    Ok(())
}

/// Rebuild the main bracket from the roster and drop the consolation bracket.
pub fn regenerate(tournament: &mut Tournament) {
    if tournament.has_results() {
        log::info!(
            "Roster of tournament {} changed; discarding recorded results",
            tournament.id
        );
    }
    tournament.bracket = generate_bracket(BracketKind::Main, &tournament.entrants, tournament.config);
    tournament.consolation = None;
    tournament.touch();
}
