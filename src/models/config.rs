//! Seeding options.

use serde::{Deserialize, Serialize};

/// Knobs for the seed placement engine.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeedingConfig {
    /// Collapse single-bye pairs into full pairs plus double-bye pairs, and pair up priority entrants
    /// that would otherwise both receive a bye. Off: every pair keeps at least one entrant where the
    /// entrant count allows it.
    #[serde(default)]
    pub consolidate_byes: bool,
}

impl SeedingConfig {
    pub fn consolidating() -> Self {
        Self {
            consolidate_byes: true,
        }
    }
}
