//! Seed placement: assign entrants (and byes) to round-1 slots.
//!
//! Constraints, strongest first, judged per round-1 pair (slots `2p` and `2p + 1`):
//! 1. two priority entrants do not meet,
//! 2. two entrants of the same origin do not meet,
//! 3. a priority entrant does not face a bye while a non-priority entrant could fill that slot,
//! 4. no pair is left without any entrant,
//! 5. priority entrants are spread over the draw.
//!
//! Placement is greedy (priority entrants first, then everybody else), followed by repair passes and a
//! swap-based local search. None of it is guaranteed optimal, but every loop strictly shrinks a bounded
//! measure, so it always terminates.

use crate::models::{sort_for_seeding, Entrant, SeedingConfig};
use std::ops::Add;

/// Smallest power of two >= `count`. A lone entrant still gets a two-slot draw.
pub fn bracket_size(count: usize) -> usize {
    match count {
        0 => 0,
        1 => 2,
        n => n.next_power_of_two(),
    }
}

/// Seed rank held by each slot of a standard draw of `size` slots.
///
/// Seed `k` faces seed `size - 1 - k`, and the top half of the seeds all land in different pairs.
pub fn seed_order(size: usize) -> Vec<usize> {
    let mut order = vec![0usize];
    while order.len() < size {
        let n = order.len() * 2;
        order = order.iter().flat_map(|&s| [s, n - 1 - s]).collect();
    }
    order.truncate(size);
    order
}

/// Constraint violations of a round-1 layout, compared lexicographically (field order matters).
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub struct SeedingScore {
    pub priority_conflicts: u32,
    pub name_conflicts: u32,
    pub priority_byes: u32,
    pub double_byes: u32,
}

impl Add for SeedingScore {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            priority_conflicts: self.priority_conflicts + rhs.priority_conflicts,
            name_conflicts: self.name_conflicts + rhs.name_conflicts,
            priority_byes: self.priority_byes + rhs.priority_byes,
            double_byes: self.double_byes + rhs.double_byes,
        }
    }
}

/// Score an already placed layout (as returned by [`place_seeds`]).
pub fn score_slots(slots: &[Option<Entrant>]) -> SeedingScore {
    slots
        .chunks(2)
        .map(|pair| match pair {
            [Some(a), Some(b)] => SeedingScore {
                priority_conflicts: (a.priority && b.priority) as u32,
                name_conflicts: (a.origin_key() == b.origin_key()) as u32,
                ..Default::default()
            },
            [Some(x), None] | [None, Some(x)] => SeedingScore {
                priority_byes: x.priority as u32,
                ..Default::default()
            },
            _ => SeedingScore {
                double_byes: 1,
                ..Default::default()
            },
        })
        .fold(SeedingScore::default(), |acc, s| acc + s)
}

/// Rank of one candidate slot during greedy placement; lower is better.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
struct PlacementScore {
    priority_conflict: u8,
    name_conflict: u8,
    bye: u8,
    opponent: u8,
    spread: usize,
    slot: usize,
}

/// Working state: slots hold indexes into `entrants`.
struct Layout<'a> {
    entrants: &'a [Entrant],
    origins: Vec<String>,
    slots: Vec<Option<usize>>,
    rank: Vec<usize>,
    consolidate: bool,
}

impl<'a> Layout<'a> {
    fn new(entrants: &'a [Entrant], size: usize, config: SeedingConfig) -> Self {
        Self {
            entrants,
            origins: entrants.iter().map(Entrant::origin_key).collect(),
            slots: vec![None; size],
            rank: seed_order(size),
            consolidate: config.consolidate_byes,
        }
    }

    fn pair_count(&self) -> usize {
        self.slots.len() / 2
    }

    fn is_priority(&self, entrant: usize) -> bool {
        self.entrants[entrant].priority
    }

    fn same_origin(&self, a: usize, b: usize) -> bool {
        self.origins[a] == self.origins[b]
    }

    fn pair(&self, pair: usize) -> (Option<usize>, Option<usize>) {
        (self.slots[2 * pair], self.slots[2 * pair + 1])
    }

    /// The single entrant of a pair with exactly one occupant, with its slot.
    fn lone(&self, pair: usize) -> Option<(usize, usize)> {
        match self.pair(pair) {
            (Some(x), None) => Some((2 * pair, x)),
            (None, Some(x)) => Some((2 * pair + 1, x)),
            _ => None,
        }
    }

    fn lone_priority(&self, pair: usize) -> Option<usize> {
        self.lone(pair)
            .map(|(_, x)| x)
            .filter(|&x| self.is_priority(x))
    }

    fn empty_pairs(&self) -> usize {
        (0..self.pair_count())
            .filter(|&p| self.pair(p) == (None, None))
            .count()
    }

    fn pair_score(&self, pair: usize) -> SeedingScore {
        match self.pair(pair) {
            (Some(a), Some(b)) => SeedingScore {
                priority_conflicts: (self.is_priority(a) && self.is_priority(b)) as u32,
                name_conflicts: self.same_origin(a, b) as u32,
                ..Default::default()
            },
            (Some(x), None) | (None, Some(x)) => SeedingScore {
                priority_byes: self.is_priority(x) as u32,
                ..Default::default()
            },
            (None, None) => SeedingScore {
                double_byes: (!self.consolidate) as u32,
                ..Default::default()
            },
        }
    }

    fn score(&self) -> SeedingScore {
        (0..self.pair_count())
            .map(|p| self.pair_score(p))
            .fold(SeedingScore::default(), |acc, s| acc + s)
    }

    fn open_slots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.slots.len()).filter(|&s| self.slots[s].is_none())
    }

    fn place(&mut self, entrant: usize, score: impl Fn(&Self, usize, usize) -> PlacementScore) {
        let this: &Self = self;
        let best = this
            .open_slots()
            .map(|slot| score(this, entrant, slot))
            .min();
        if let Some(best) = best {
            self.slots[best.slot] = Some(entrant);
        }
    }

    fn priority_score(&self, entrant: usize, slot: usize, shields: usize) -> PlacementScore {
        let opponent = self.slots[slot ^ 1];
        let pair = slot / 2;
        let lone_priority = (0..self.pair_count())
            .filter(|&p| self.lone_priority(p).is_some())
            .count();
        let bye = match opponent {
            Some(_) => 0,
            None => (lone_priority + 1 > shields) as u8,
        };
        let sibling = pair ^ 1;
        let round_two_priority = (2 * sibling..2 * sibling + 2)
            .filter_map(|s| self.slots.get(s).copied().flatten())
            .filter(|&x| self.is_priority(x))
            .count();
        PlacementScore {
            priority_conflict: opponent.map_or(0, |o| self.is_priority(o) as u8),
            name_conflict: opponent.map_or(0, |o| self.same_origin(entrant, o) as u8),
            bye,
            opponent: round_two_priority.min(u8::MAX as usize) as u8,
            spread: self.rank[slot],
            slot,
        }
    }

    fn open_score(&self, entrant: usize, slot: usize, remaining: usize) -> PlacementScore {
        let opponent = self.slots[slot ^ 1];
        let empty_after = self.empty_pairs() - opponent.is_none() as usize;
        let double_bye_risk = empty_after > remaining - 1;
        let bye = match opponent {
            Some(o) if self.is_priority(o) => 0,
            _ if double_bye_risk => 2,
            _ => 1,
        };
        PlacementScore {
            priority_conflict: 0,
            name_conflict: opponent.map_or(0, |o| self.same_origin(entrant, o) as u8),
            bye,
            opponent: opponent.is_none() as u8,
            spread: self.rank[slot],
            slot,
        }
    }

    fn greedy(&mut self) {
        let (priority, rest): (Vec<usize>, Vec<usize>) =
            (0..self.entrants.len()).partition(|&i| self.is_priority(i));
        let shields = rest.len();
        for &e in &priority {
            self.place(e, |l, e, s| l.priority_score(e, s, shields));
        }
        for (placed, &e) in rest.iter().enumerate() {
            let remaining = rest.len() - placed;
            self.place(e, |l, e, s| l.open_score(e, s, remaining));
        }
    }

    /// Best non-priority entrant outside `exclude` pairs that sits in a pair without priority entrants
    /// and does not share an origin with `against`. Full pairs give first, then weaker seeds.
    fn free_donor(&self, exclude: [usize; 2], against: usize) -> Option<usize> {
        (0..self.slots.len())
            .filter(|&d| !exclude.contains(&(d / 2)))
            .filter_map(|d| {
                let y = self.slots[d]?;
                if self.is_priority(y) || self.same_origin(y, against) {
                    return None;
                }
                let category = match self.slots[d ^ 1] {
                    Some(z) if !self.is_priority(z) => 0,
                    None => 1,
                    Some(_) => return None,
                };
                Some((category, std::cmp::Reverse(self.rank[d]), d))
            })
            .min()
            .map(|(_, _, d)| d)
    }

    /// Move a non-priority entrant in front of every priority entrant that faces a bye.
    ///
    /// When only shields of other priority entrants fit, one of them is taken and its old spot is
    /// refilled from a free donor that fits that other priority entrant.
    fn donor_pass(&mut self) -> bool {
        let mut changed = false;
        for pair in 0..self.pair_count() {
            let Some((slot, needy)) = self.lone(pair) else {
                continue;
            };
            if !self.is_priority(needy) {
                continue;
            }
            if let Some(d) = self.free_donor([pair, pair], needy) {
                log::debug!("Donor pass: slot {} fills bye opposite slot {}", d, slot);
                self.slots[slot ^ 1] = self.slots[d].take();
                changed = true;
                continue;
            }
            let relay = (0..self.slots.len())
                .filter(|&d| d / 2 != pair)
                .filter_map(|d| {
                    let y = self.slots[d]?;
                    let shielded = self.slots[d ^ 1]?;
                    if self.is_priority(y) || !self.is_priority(shielded) || self.same_origin(y, needy)
                    {
                        return None;
                    }
                    let refill = self.free_donor([pair, d / 2], shielded)?;
                    Some((std::cmp::Reverse(self.rank[d]), d, refill))
                })
                .min();
            if let Some((_, d, refill)) = relay {
                log::debug!(
                    "Donor pass: slot {} fills bye opposite slot {}, slot {} takes its place",
                    d,
                    slot,
                    refill
                );
                self.slots[slot ^ 1] = self.slots[d].take();
                self.slots[d] = self.slots[refill].take();
                changed = true;
            }
        }
        changed
    }

    /// Merge two single-entrant pairs into one full pair plus one empty pair.
    fn collapse_pass(&mut self) -> bool {
        let mut changed = false;
        loop {
            let singles: Vec<(usize, usize)> = (0..self.pair_count())
                .filter_map(|p| self.lone(p))
                .collect();
            if singles.len() < 2 {
                return changed;
            }
            let movers = singles.iter().filter(|&&(_, x)| !self.is_priority(x));
            let best = movers
                .flat_map(|&(from, x)| {
                    singles
                        .iter()
                        .filter(move |&&(to, _)| to / 2 != from / 2)
                        .map(move |&(to, target)| (from, x, to, target))
                })
                .filter(|&(_, x, _, target)| !self.same_origin(x, target))
                .min_by_key(|&(from, _, to, target)| {
                    (
                        !self.is_priority(target),
                        std::cmp::Reverse(self.rank[from]),
                        to,
                    )
                });
            let Some((from, _, to, _)) = best else {
                return changed;
            };
            log::debug!("Collapsing bye: slot {} moves opposite slot {}", from, to);
            self.slots[to ^ 1] = self.slots[from].take();
            changed = true;
        }
    }

    /// Pair up two priority entrants that both face a bye, leaving an empty pair behind.
    fn priority_bye_pass(&mut self) -> bool {
        let lonely: Vec<usize> = (0..self.pair_count())
            .filter_map(|p| self.lone(p))
            .filter(|&(_, x)| self.is_priority(x))
            .map(|(slot, _)| slot)
            .collect();
        let mut changed = false;
        for chunk in lonely.chunks_exact(2) {
            let (keep, from) = (chunk[0], chunk[1]);
            let (a, b) = match (self.slots[keep], self.slots[from]) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };
            if self.same_origin(a, b) {
                continue;
            }
            log::debug!("Pairing priority byes: slot {} moves opposite slot {}", from, keep);
            self.slots[keep ^ 1] = self.slots[from].take();
            changed = true;
        }
        changed
    }

    /// Accept pairwise swaps that strictly lower the score and never leave a priority entrant newly
    /// facing a bye.
    fn local_search(&mut self) {
        let size = self.slots.len();
        loop {
            let mut improved = false;
            for i in 0..size {
                for j in (i + 1)..size {
                    if i / 2 == j / 2 || (self.slots[i].is_none() && self.slots[j].is_none()) {
                        continue;
                    }
                    let (pi, pj) = (i / 2, j / 2);
                    let before = self.pair_score(pi) + self.pair_score(pj);
                    let lonely_before = [self.lone_priority(pi), self.lone_priority(pj)];
                    self.slots.swap(i, j);
                    let after = self.pair_score(pi) + self.pair_score(pj);
                    let newly_lonely = [self.lone_priority(pi), self.lone_priority(pj)]
                        .into_iter()
                        .flatten()
                        .any(|x| !lonely_before.contains(&Some(x)));
                    if after < before && !newly_lonely {
                        improved = true;
                    } else {
                        self.slots.swap(i, j);
                    }
                }
            }
            if !improved {
                break;
            }
        }
    }

    fn repair(&mut self) {
        loop {
            let mut changed = self.donor_pass();
            if self.consolidate {
                changed |= self.collapse_pass();
                changed |= self.priority_bye_pass();
            }
            if !changed {
                break;
            }
        }
        self.local_search();
    }
}

/// Assign every entrant to exactly one round-1 slot; unfilled slots are byes.
///
/// The input is sorted priority-first, then alphabetically, before placement, so the result does not
/// depend on the caller's ordering (apart from ties in name).
pub fn place_seeds(entrants: &[Entrant], config: SeedingConfig) -> Vec<Option<Entrant>> {
    let mut sorted = entrants.to_vec();
    sort_for_seeding(&mut sorted);
    let size = bracket_size(sorted.len());

    let mut layout = Layout::new(&sorted, size, config);
    layout.greedy();
    layout.repair();

    let score = layout.score();
    log::debug!(
        "Placed {} entrants into {} slots: {} priority conflicts, {} name conflicts, {} priority byes",
        sorted.len(),
        size,
        score.priority_conflicts,
        score.name_conflicts,
        score.priority_byes
    );

    layout
        .slots
        .iter()
        .map(|slot| slot.map(|i| sorted[i].clone()))
        .collect()
}
