//! Read-only views of ledger state

use crate::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reconciled energy state of a single player
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergySnapshot {
    /// Player the snapshot belongs to
    pub player_id: PlayerId,
    /// Energy available right now
    pub energy: u32,
    /// Energy cap
    pub max_energy: u32,
    /// Progress banked toward the next unit
    pub carry: Duration,
    /// Instant of the reconciliation that produced this snapshot
    pub last_update: DateTime<Utc>,
    /// Time until the next unit arrives; `None` when already full
    pub next_unit_in: Option<Duration>,
    /// Time until the cap is reached; zero when already full
    pub full_in: Duration,
}

impl EnergySnapshot {
    /// Check if the player is at the cap
    pub fn is_full(&self) -> bool {
        self.energy >= self.max_energy
    }
}

/// Aggregate statistics over every tracked player
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Number of tracked players
    pub player_count: u64,
    /// Sum of reconciled energy across players
    pub total_energy: u64,
    /// Players currently at the cap
    pub full_players: u64,
}
