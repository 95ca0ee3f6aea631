//! Integration tests for bracket topology and bye resolution.

use bracket_tournament_web::{
    bracket_size, build_bracket, generate_bracket, BracketKind, Entrant, GameMatch, Occupant,
    SeedingConfig,
};
use std::collections::HashSet;

fn named(names: &[&str]) -> Vec<Entrant> {
    names.iter().map(|n| Entrant::new(*n)).collect()
}

fn round(matches: &[GameMatch], r: u32) -> Vec<&GameMatch> {
    matches.iter().filter(|m| m.round == r).collect()
}

#[test]
fn match_count_and_round_sizes_follow_bracket_size() {
    for n in 2..=33 {
        let entrants: Vec<_> = (0..n).map(|i| Entrant::new(format!("E{i}"))).collect();
        let matches = build_bracket(&entrants, SeedingConfig::default());
        let size = bracket_size(n);
        assert_eq!(matches.len(), size - 1, "n={n}");
        let rounds = size.trailing_zeros();
        for r in 1..=rounds {
            assert_eq!(round(&matches, r).len(), size >> r, "n={n} round={r}");
        }
        assert!(round(&matches, rounds + 1).is_empty());
    }
}

#[test]
fn every_entrant_appears_once_in_round_one() {
    let entrants: Vec<_> = (0..13).map(|i| Entrant::new(format!("E{i}"))).collect();
    let matches = build_bracket(&entrants, SeedingConfig::default());
    let seen: Vec<_> = round(&matches, 1)
        .iter()
        .flat_map(|m| [m.team_a, m.team_b])
        .flatten()
        .filter_map(|o| o.entrant_id())
        .collect();
    let unique: HashSet<_> = seen.iter().copied().collect();
    assert_eq!(seen.len(), 13);
    assert_eq!(unique, entrants.iter().map(|e| e.id).collect());
}

#[test]
fn five_entrants_get_three_auto_advanced_byes() {
    let matches = build_bracket(&named(&["A", "B", "C", "D", "E"]), SeedingConfig::default());
    assert_eq!(matches.len(), 7);
    let first = round(&matches, 1);
    let auto = first
        .iter()
        .filter(|m| m.winner.is_some() && (m.team_a.is_none() || m.team_b.is_none()))
        .count();
    let waiting = first
        .iter()
        .filter(|m| m.winner.is_none() && m.team_a.is_some() && m.team_b.is_some())
        .count();
    assert_eq!(auto, 3);
    assert_eq!(waiting, 1);
    assert!(matches.iter().filter(|m| m.round > 1).all(|m| m.winner.is_none()));
}

#[test]
fn bye_winners_are_written_into_round_two() {
    let matches = build_bracket(&named(&["A", "B", "C", "D", "E"]), SeedingConfig::default());
    for m in round(&matches, 1) {
        let Some(winner) = m.winner else { continue };
        let (r, slot) = m.parent_position();
        let parent = matches.iter().find(|p| p.round == r && p.slot == slot).unwrap();
        let side = if m.slot % 2 == 0 { parent.team_a } else { parent.team_b };
        assert_eq!(side, Some(winner));
    }
}

#[test]
fn lone_entrant_wins_by_default() {
    let entrants = named(&["Solo"]);
    let matches = build_bracket(&entrants, SeedingConfig::default());
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].winner, Some(Occupant::Entrant(entrants[0].id)));
}

#[test]
fn no_entrants_no_matches() {
    assert!(build_bracket(&[], SeedingConfig::default()).is_empty());
}

#[test]
fn duplicate_names_are_dropped_before_seeding() {
    let bracket = generate_bracket(
        BracketKind::Main,
        &named(&["Lions", "lions!", "Tigers"]),
        SeedingConfig::default(),
    );
    assert_eq!(bracket.entrants.len(), 2);
    assert_eq!(bracket.matches.len(), 1);
    assert_eq!(bracket.round_count(), 1);
}

#[test]
fn double_byes_pass_through_to_the_next_round() {
    let matches = build_bracket(&named(&["A", "B", "C", "D", "E"]), SeedingConfig::consolidating());
    let empty = round(&matches, 1)
        .into_iter()
        .find(|m| m.team_a.is_none() && m.team_b.is_none())
        .expect("consolidation leaves one empty pair");
    assert_eq!(empty.winner, Some(Occupant::Pass));
    let (r, slot) = empty.parent_position();
    let parent = matches.iter().find(|p| p.round == r && p.slot == slot).unwrap();
    let side = if empty.slot % 2 == 0 { parent.team_a } else { parent.team_b };
    assert_eq!(side, Some(Occupant::Pass));
}

#[test]
fn generated_bracket_keeps_entrants_in_seeding_order() {
    let entrants = vec![Entrant::new("b"), Entrant::priority("z"), Entrant::new("a")];
    let bracket = generate_bracket(BracketKind::Consolation, &entrants, SeedingConfig::default());
    let names: Vec<_> = bracket.entrants.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["z", "a", "b"]);
    assert_eq!(bracket.kind, BracketKind::Consolation);
    assert_eq!(bracket.matches_in_round(1).count(), 2);
    assert_eq!(bracket.entrant_name(Occupant::Pass), Some("bye"));
    assert_eq!(bracket.entrant_name(Occupant::Entrant(entrants[0].id)), Some("b"));
    assert!(bracket.champion().is_none());
}
