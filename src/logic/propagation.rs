//! Winner propagation: record or clear results, push winners toward the final, and auto-advance
//! matches that have no real opponent.
//!
//! Every public function takes a snapshot and returns a new, settled snapshot; the input is never
//! touched. Settling works off a queue of dirty matches instead of rescanning the whole bracket.

use crate::models::{BracketError, EntrantId, GameMatch, MatchId, Occupant, Side};
use std::collections::{HashMap, VecDeque};

/// O(1) lookups by match id and by (round, slot).
struct BracketIndex {
    by_id: HashMap<MatchId, usize>,
    by_position: HashMap<(u32, u32), usize>,
}

impl BracketIndex {
    fn new(matches: &[GameMatch]) -> Self {
        let mut by_id = HashMap::with_capacity(matches.len());
        let mut by_position = HashMap::with_capacity(matches.len());
        for (i, m) in matches.iter().enumerate() {
            by_id.insert(m.id, i);
            by_position.insert((m.round, m.slot), i);
        }
        Self { by_id, by_position }
    }
}

/// Working copy of one snapshot plus the queue of matches to re-examine.
struct Propagator {
    matches: Vec<GameMatch>,
    index: BracketIndex,
    dirty: VecDeque<usize>,
    queued: Vec<bool>,
}

impl Propagator {
    fn new(matches: &[GameMatch]) -> Self {
        Self {
            matches: matches.to_vec(),
            index: BracketIndex::new(matches),
            dirty: VecDeque::new(),
            queued: vec![false; matches.len()],
        }
    }

    fn position(&self, match_id: MatchId) -> Option<usize> {
        self.index.by_id.get(&match_id).copied()
    }

    fn parent(&self, i: usize) -> Option<usize> {
        let position = self.matches[i].parent_position();
        self.index.by_position.get(&position).copied()
    }

    fn enqueue(&mut self, i: usize) {
        if !self.queued[i] {
            self.queued[i] = true;
            self.dirty.push_back(i);
        }
    }

    /// A side that will never receive a real entrant: a round-1 bye or the pass sentinel.
    fn settled_empty(m: &GameMatch, side: Side) -> bool {
        match m.side(side) {
            None => m.round == 1,
            Some(Occupant::Pass) => true,
            Some(Occupant::Entrant(_)) => false,
        }
    }

    fn auto_winner(m: &GameMatch) -> Option<Occupant> {
        let a_empty = Self::settled_empty(m, Side::A);
        let b_empty = Self::settled_empty(m, Side::B);
        match (m.team_a, m.team_b) {
            (Some(a @ Occupant::Entrant(_)), _) if b_empty => Some(a),
            (_, Some(b @ Occupant::Entrant(_))) if a_empty => Some(b),
            _ if a_empty && b_empty => Some(Occupant::Pass),
            _ => None,
        }
    }

    fn winner_is_valid(m: &GameMatch, winner: Occupant) -> bool {
        match winner {
            Occupant::Entrant(_) => m.has_occupant(winner),
            Occupant::Pass => {
                Self::settled_empty(m, Side::A) && Self::settled_empty(m, Side::B)
            }
        }
    }

    /// Write `value` into the parent side fed by match `i`; a changed input invalidates the parent.
    fn write_to_parent(&mut self, i: usize, value: Option<Occupant>) {
        let Some(p) = self.parent(i) else {
            return;
        };
        let side = Side::for_slot(self.matches[i].slot);
        if self.matches[p].side(side) == value {
            return;
        }
        *self.matches[p].side_mut(side) = value;
        self.invalidate_from(p);
        self.enqueue(p);
    }

    /// Clear the winner of `start` and of every match its result reached, walking toward the final.
    fn invalidate_from(&mut self, start: usize) {
        let mut current = Some(start);
        while let Some(i) = current {
            let Some(old) = self.matches[i].winner.take() else {
                break;
            };
            log::debug!(
                "Invalidated result of round {} slot {} ({:?})",
                self.matches[i].round,
                self.matches[i].slot,
                old
            );
            self.enqueue(i);
            current = self.parent(i);
            if let Some(p) = current {
                let side = Side::for_slot(self.matches[i].slot);
                *self.matches[p].side_mut(side) = None;
                self.enqueue(p);
            }
        }
    }

    fn advance(&mut self, i: usize, winner: Occupant) {
        self.matches[i].winner = Some(winner);
        self.write_to_parent(i, Some(winner));
    }

    /// Drain the dirty queue: drop stale winners, auto-advance uncontested matches.
    fn settle(&mut self) {
        let bound = 4 * self.matches.len().max(1);
        let mut steps = 0usize;
        while let Some(i) = self.dirty.pop_front() {
            self.queued[i] = false;
            steps += 1;
            assert!(
                steps <= bound,
                "bracket did not settle within {} steps; match tree is inconsistent",
                bound
            );
            let winner = self.matches[i].winner;
            match winner {
                Some(w) if !Self::winner_is_valid(&self.matches[i], w) => {
                    let m = &self.matches[i];
                    log::warn!("Dropping stale winner {:?} in round {} slot {}", w, m.round, m.slot);
                    self.invalidate_from(i);
                }
                Some(_) => {}
                None => {
                    if let Some(w) = Self::auto_winner(&self.matches[i]) {
                        let m = &self.matches[i];
                        log::debug!("Auto-advancing {:?} from round {} slot {}", w, m.round, m.slot);
                        self.advance(i, w);
                    }
                }
            }
        }
    }

    fn finish(mut self) -> Vec<GameMatch> {
        self.settle();
        self.matches
    }
}

/// Resolve every bye and pass-through in a freshly built (or loaded) snapshot.
pub fn resolve_auto_advances(matches: &[GameMatch]) -> Vec<GameMatch> {
    let mut engine = Propagator::new(matches);
    for i in 0..engine.matches.len() {
        engine.enqueue(i);
    }
    engine.finish()
}

/// Record `winner_id` as the winner of `match_id` and return the updated snapshot.
///
/// Unknown match ids and already-recorded winners return the input unchanged. A winner who is not in
/// the match is an error. If the winner already stands on the other side of the next match (a broken
/// bracket), nothing advances and the next match is cleared instead.
pub fn set_match_winner(
    matches: &[GameMatch],
    match_id: MatchId,
    winner_id: EntrantId,
) -> Result<Vec<GameMatch>, BracketError> {
    let mut engine = Propagator::new(matches);
    let Some(i) = engine.position(match_id) else {
        log::warn!("set_match_winner: unknown match {}", match_id);
        return Ok(matches.to_vec());
    };
    let winner = Occupant::Entrant(winner_id);
    let m = &engine.matches[i];
    if m.winner == Some(winner) {
        return Ok(matches.to_vec());
    }
    if !m.has_occupant(winner) {
        return Err(BracketError::InvalidWinner {
            match_id,
            winner: winner_id,
        });
    }
    if m.round > 1 && (m.team_a.is_none() || m.team_b.is_none()) {
        return Err(BracketError::MatchNotReady(match_id));
    }

    let self_match = engine.parent(i).is_some_and(|p| {
        let side = Side::for_slot(engine.matches[i].slot);
        engine.matches[p].side(side.opposite()) == Some(winner)
    });
    if self_match {
        log::warn!(
            "Refusing to advance {} from match {}: already on the other side of the next match",
            winner_id,
            match_id
        );
        if let Some(p) = engine.parent(i) {
            engine.invalidate_from(p);
        }
        return Ok(engine.finish());
    }

    log::debug!("Match {} won by {}", match_id, winner_id);
    engine.advance(i, winner);
    engine.enqueue(i);
    Ok(engine.finish())
}

/// Clear the result of `match_id` and everything that depended on it.
///
/// Unknown or undecided matches return the input unchanged, and so do auto-advanced matches (byes and
/// pass-throughs), which would resolve to the same winner again.
pub fn clear_match_winner(matches: &[GameMatch], match_id: MatchId) -> Vec<GameMatch> {
    let mut engine = Propagator::new(matches);
    let Some(i) = engine.position(match_id) else {
        log::warn!("clear_match_winner: unknown match {}", match_id);
        return matches.to_vec();
    };
    if !engine.matches[i].is_decided() {
        return matches.to_vec();
    }
    let previous = engine.matches[i].winner.take();
    if Propagator::auto_winner(&engine.matches[i]) == previous {
        log::debug!("Match {} resolves itself again; nothing to clear", match_id);
        return matches.to_vec();
    }
    log::debug!("Clearing result of match {}", match_id);
    engine.write_to_parent(i, None);
    engine.enqueue(i);
    engine.finish()
}
