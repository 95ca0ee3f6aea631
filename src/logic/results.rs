//! Recording and clearing results on a tournament's brackets.

use crate::logic::consolation::derive_consolation;
use crate::logic::propagation::{clear_match_winner, set_match_winner};
use crate::models::{Bracket, BracketError, EntrantId, MatchId, Tournament};

fn require_match(bracket: &Bracket, match_id: MatchId) -> Result<(), BracketError> {
    match bracket.find_match(match_id) {
        Some(_) => Ok(()),
        None => Err(BracketError::MatchNotFound(match_id)),
    }
}

fn refresh_consolation(tournament: &mut Tournament) {
    tournament.consolation = derive_consolation(&tournament.bracket, tournament.consolation.as_ref());
}

/// Set the winner of a main-bracket match, then bring the consolation bracket up to date.
pub fn record_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner_id: EntrantId,
) -> Result<(), BracketError> {
    require_match(&tournament.bracket, match_id)?;
    tournament.bracket.matches = set_match_winner(&tournament.bracket.matches, match_id, winner_id)?;
    refresh_consolation(tournament);
    tournament.touch();
    Ok(())
}

/// Clear the winner of a main-bracket match (and everything downstream of it).
pub fn clear_result(tournament: &mut Tournament, match_id: MatchId) -> Result<(), BracketError> {
    require_match(&tournament.bracket, match_id)?;
    tournament.bracket.matches = clear_match_winner(&tournament.bracket.matches, match_id);
    refresh_consolation(tournament);
    tournament.touch();
    Ok(())
}

/// Set the winner of a consolation-bracket match.
pub fn record_consolation_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner_id: EntrantId,
) -> Result<(), BracketError> {
    let consolation = tournament
        .consolation
        .as_mut()
        .ok_or(BracketError::NoConsolationBracket)?;
    require_match(consolation, match_id)?;
    consolation.matches = set_match_winner(&consolation.matches, match_id, winner_id)?;
    tournament.touch();
    Ok(())
}

/// Clear the winner of a consolation-bracket match.
pub fn clear_consolation_result(
    tournament: &mut Tournament,
    match_id: MatchId,
) -> Result<(), BracketError> {
    let consolation = tournament
        .consolation
        .as_mut()
        .ok_or(BracketError::NoConsolationBracket)?;
    require_match(consolation, match_id)?;
    consolation.matches = clear_match_winner(&consolation.matches, match_id);
    tournament.touch();
    Ok(())
}
