//! Bracket topology: round 1 from the seed placement, empty later rounds, byes resolved.

use crate::logic::propagation::resolve_auto_advances;
use crate::logic::seeding::place_seeds;
use crate::models::{
    dedupe_entrants, sort_for_seeding, Bracket, BracketKind, Entrant, GameMatch, Occupant,
    SeedingConfig,
};

/// Build every match of a single-elimination draw and auto-advance all byes.
///
/// Round 1 pairs slots `(0, 1), (2, 3), ...`; each later round has half as many matches, down to the
/// final. `bracket_size - 1` matches in total.
pub fn build_bracket(entrants: &[Entrant], config: SeedingConfig) -> Vec<GameMatch> {
    let unique = dedupe_entrants(entrants);
    let slots = place_seeds(&unique, config);

    let occupant = |slot: &Option<Entrant>| slot.as_ref().map(|e| Occupant::Entrant(e.id));
    let mut matches: Vec<GameMatch> = slots
        .chunks_exact(2)
        .enumerate()
        .map(|(slot, pair)| GameMatch::new(1, slot as u32, occupant(&pair[0]), occupant(&pair[1])))
        .collect();

    let mut round = 1;
    let mut count = matches.len();
    while count > 1 {
        round += 1;
        count = count.div_ceil(2);
        matches.extend((0..count).map(|slot| GameMatch::new(round, slot as u32, None, None)));
    }

    log::info!(
        "Built bracket: {} entrants, {} slots, {} rounds, {} matches",
        unique.len(),
        slots.len(),
        round,
        matches.len()
    );
    resolve_auto_advances(&matches)
}

/// Build a full [`Bracket`] (entrants kept in seeding order).
pub fn generate_bracket(kind: BracketKind, entrants: &[Entrant], config: SeedingConfig) -> Bracket {
    let mut unique = dedupe_entrants(entrants);
    sort_for_seeding(&mut unique);
    let matches = build_bracket(&unique, config);
    Bracket::from_parts(kind, unique, matches, config)
}
