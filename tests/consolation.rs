//! Integration tests for the consolation draw and tournament-level result handling.

use bracket_tournament_web::{
    add_entrant, clear_result, create_tournament, derive_consolation, generate_bracket,
    record_consolation_result, record_result, remove_entrant, set_match_winner, BracketError,
    BracketKind, Entrant, EntrantId, GameMatch, MatchId, SeedingConfig, Tournament,
};

fn roster(n: usize) -> Vec<Entrant> {
    (0..n).map(|i| Entrant::new(format!("Team {i}"))).collect()
}

/// Round-1 matches between two real entrants, in slot order.
fn contested(matches: &[GameMatch]) -> Vec<(MatchId, EntrantId, EntrantId)> {
    let mut first: Vec<_> = matches
        .iter()
        .filter(|m| m.round == 1)
        .filter_map(|m| {
            let a = m.team_a?.entrant_id()?;
            let b = m.team_b?.entrant_id()?;
            Some((m.slot, m.id, a, b))
        })
        .collect();
    first.sort();
    first.into_iter().map(|(_, id, a, b)| (id, a, b)).collect()
}

fn cup(n: usize) -> Tournament {
    create_tournament("Cup", roster(n), SeedingConfig::default())
}

#[test]
fn no_losers_means_no_consolation_bracket() {
    let bracket = generate_bracket(BracketKind::Main, &roster(5), SeedingConfig::default());
    assert!(derive_consolation(&bracket, None).is_none());
}

#[test]
fn consolation_bracket_holds_round_one_losers() {
    let mut bracket = generate_bracket(BracketKind::Main, &roster(8), SeedingConfig::default());
    let games = contested(&bracket.matches);
    for &(id, a, _) in &games[..3] {
        bracket.matches = set_match_winner(&bracket.matches, id, a).unwrap();
    }
    let consolation = derive_consolation(&bracket, None).unwrap();
    let mut members: Vec<_> = consolation.entrants.iter().map(|e| e.id).collect();
    members.sort();
    let mut losers: Vec<_> = games[..3].iter().map(|&(_, _, b)| b).collect();
    losers.sort();
    assert_eq!(members, losers);
    assert_eq!(consolation.kind, BracketKind::Consolation);
    assert_eq!(consolation.matches.len(), 3);
}

#[test]
fn unchanged_losers_keep_consolation_results() {
    let mut t = cup(8);
    let games = contested(&t.bracket.matches);
    record_result(&mut t, games[0].0, games[0].1).unwrap();
    record_result(&mut t, games[1].0, games[1].1).unwrap();

    let consolation = t.consolation.clone().unwrap();
    assert_eq!(consolation.entrants.len(), 2);
    let final_match = consolation.matches[0].clone();
    let winner = final_match.team_a.and_then(|o| o.entrant_id()).unwrap();
    record_consolation_result(&mut t, final_match.id, winner).unwrap();

    let round_two = t
        .bracket
        .matches
        .iter()
        .find(|m| m.round == 2 && m.slot == 0)
        .unwrap()
        .clone();
    let advancing = round_two.team_a.and_then(|o| o.entrant_id()).unwrap();
    record_result(&mut t, round_two.id, advancing).unwrap();

    let kept = t.consolation.as_ref().unwrap();
    assert_eq!(kept.id, consolation.id);
    assert_eq!(kept.champion(), Some(winner));
}

#[test]
fn changed_losers_rebuild_the_consolation_bracket() {
    let mut t = cup(8);
    let games = contested(&t.bracket.matches);
    record_result(&mut t, games[0].0, games[0].1).unwrap();
    record_result(&mut t, games[1].0, games[1].1).unwrap();
    let before = t.consolation.clone().unwrap();

    record_result(&mut t, games[2].0, games[2].1).unwrap();
    let grown = t.consolation.clone().unwrap();
    assert_ne!(grown.id, before.id);
    assert_eq!(grown.entrants.len(), 3);

    record_result(&mut t, games[0].0, games[0].2).unwrap();
    let swapped = t.consolation.clone().unwrap();
    assert_ne!(swapped.id, grown.id);
    assert!(swapped.entrant(games[0].1).is_some());
    assert!(swapped.entrant(games[0].2).is_none());

    for &(id, _, _) in &games[..3] {
        clear_result(&mut t, id).unwrap();
    }
    assert!(t.consolation.is_none());
}

#[test]
fn consolation_results_need_a_consolation_bracket() {
    let mut t = cup(4);
    let games = contested(&t.bracket.matches);
    assert_eq!(
        record_consolation_result(&mut t, games[0].0, games[0].1),
        Err(BracketError::NoConsolationBracket)
    );
}

#[test]
fn unknown_match_is_reported_by_the_tournament() {
    let mut t = cup(4);
    let bogus = uuid::Uuid::new_v4();
    let someone = t.entrants[0].id;
    assert_eq!(
        record_result(&mut t, bogus, someone),
        Err(BracketError::MatchNotFound(bogus))
    );
}

#[test]
fn roster_changes_reseed_and_discard_results() {
    let mut t = cup(6);
    let games = contested(&t.bracket.matches);
    record_result(&mut t, games[0].0, games[0].1).unwrap();
    assert!(t.consolation.is_some());
    assert!(t.has_results());

    let id = add_entrant(&mut t, "Late Entry", true).unwrap();
    assert!(t.consolation.is_none());
    assert!(!t.has_results());
    assert_eq!(t.bracket.entrants.len(), 7);
    assert!(t.bracket.entrant(id).is_some_and(|e| e.priority));
    assert_eq!(t.entrant(id).map(|e| e.name.as_str()), Some("Late Entry"));

    remove_entrant(&mut t, id).unwrap();
    assert_eq!(t.bracket.entrants.len(), 6);
    assert_eq!(remove_entrant(&mut t, id), Err(BracketError::EntrantNotFound(id)));
}

#[test]
fn roster_rejects_blank_and_duplicate_names() {
    let mut t = cup(4);
    assert_eq!(add_entrant(&mut t, "   ", false), Err(BracketError::EmptyName));
    assert_eq!(add_entrant(&mut t, "team 0!", false), Err(BracketError::DuplicateEntrant));
    assert_eq!(t.entrants.len(), 4);
}
