//! GameMatch, its occupants, and which side of the parent a match feeds.

use crate::models::entrant::EntrantId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// What can stand in a side of a match (or be its winner).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupant {
    Entrant(EntrantId),
    /// No real opponent will ever arrive here; the other side advances automatically.
    Pass,
}

impl Occupant {
    pub fn entrant_id(&self) -> Option<EntrantId> {
        match self {
            Occupant::Entrant(id) => Some(*id),
            Occupant::Pass => None,
        }
    }
}

/// Which side of a match: A is fed by the even child slot, B by the odd one.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    A,
    B,
}

impl Side {
    /// Side of the parent match fed by the match at `slot`.
    pub fn for_slot(slot: u32) -> Self {
        if slot % 2 == 0 {
            Side::A
        } else {
            Side::B
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// A single bracket match. Round 1 is seeded; later rounds fill in through propagation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    /// 1-based round number.
    pub round: u32,
    /// 0-based position within the round.
    pub slot: u32,
    pub team_a: Option<Occupant>,
    pub team_b: Option<Occupant>,
    /// None while undecided.
    pub winner: Option<Occupant>,
}

impl GameMatch {
    pub fn new(round: u32, slot: u32, team_a: Option<Occupant>, team_b: Option<Occupant>) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            slot,
            team_a,
            team_b,
            winner: None,
        }
    }

    pub fn side(&self, side: Side) -> Option<Occupant> {
        match side {
            Side::A => self.team_a,
            Side::B => self.team_b,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut Option<Occupant> {
        match side {
            Side::A => &mut self.team_a,
            Side::B => &mut self.team_b,
        }
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Whether `occupant` stands in either side.
    pub fn has_occupant(&self, occupant: Occupant) -> bool {
        self.team_a == Some(occupant) || self.team_b == Some(occupant)
    }

    /// Position of the match this one feeds.
    pub fn parent_position(&self) -> (u32, u32) {
        (self.round + 1, self.slot / 2)
    }

    /// The real entrant that lost, if the match was decided between two entrants.
    pub fn loser(&self) -> Option<EntrantId> {
        let winner = self.winner?.entrant_id()?;
        let a = self.team_a?.entrant_id()?;
        let b = self.team_b?.entrant_id()?;
        if winner == a {
            Some(b)
        } else if winner == b {
            Some(a)
        } else {
            None
        }
    }
}
