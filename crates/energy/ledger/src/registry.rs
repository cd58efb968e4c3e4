//! Single-owner energy registry
//!
//! Maps player IDs to their accumulators. Players are created full on first
//! reference, so unknown IDs are never an error.

use crate::accumulator::EnergyAccumulator;
use chrono::{DateTime, Utc};
use energy_types::{
    Clock, EnergyConfig, EnergyResult, EnergySnapshot, PlayerId, RegistryStats, SystemClock,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Registry of per-player energy, owned by a single caller
pub struct EnergyRegistry {
    /// Cap and regeneration period shared by every player
    config: EnergyConfig,
    /// Source of the current instant
    clock: Arc<dyn Clock>,
    /// Energy state per player
    players: HashMap<PlayerId, EnergyAccumulator>,
}

impl EnergyRegistry {
    /// Create a registry with an injected clock
    pub fn new(config: EnergyConfig, clock: Arc<dyn Clock>) -> EnergyResult<Self> {
        config.validate()?;

        info!(
            max_energy = config.max_energy,
            unit_period_secs = config.unit_period.as_secs(),
            "Energy registry initialized"
        );

        Ok(Self {
            config,
            clock,
            players: HashMap::new(),
        })
    }

    /// Create a registry driven by the wall clock
    pub fn with_system_clock(config: EnergyConfig) -> EnergyResult<Self> {
        Self::new(config, Arc::new(SystemClock))
    }

    /// Energy cap shared by every player
    pub fn max_energy(&self) -> u32 {
        self.config.max_energy
    }

    /// Time needed to regenerate one unit
    pub fn unit_period(&self) -> Duration {
        self.config.unit_period
    }

    /// Get the configuration
    pub fn config(&self) -> &EnergyConfig {
        &self.config
    }

    /// Current instant according to the injected clock
    pub fn current_time(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Get a player's energy after crediting elapsed time
    pub fn get_energy(&mut self, player_id: &PlayerId) -> u32 {
        self.with_player(player_id, |acc, config, now| acc.reconcile(config, now))
    }

    /// Spend energy if the player has at least `amount` and `amount` is positive
    pub fn try_spend(&mut self, player_id: &PlayerId, amount: i64) -> bool {
        let spent = self.with_player(player_id, |acc, config, now| {
            acc.try_spend(config, now, amount)
        });

        debug!(player = %player_id, amount, spent, "Energy spend requested");
        spent
    }

    /// Get the reconciled state of a player, including regeneration ETAs
    pub fn snapshot(&mut self, player_id: &PlayerId) -> EnergySnapshot {
        self.with_player(player_id, |acc, config, now| {
            acc.snapshot(player_id, config, now)
        })
    }

    /// Check if a player has been seen, without creating it
    pub fn is_tracked(&self, player_id: &PlayerId) -> bool {
        self.players.contains_key(player_id)
    }

    /// Number of players seen so far
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Reconcile every tracked player and aggregate the result
    pub fn stats(&mut self) -> RegistryStats {
        let now = self.clock.now();
        let mut stats = RegistryStats {
            player_count: self.players.len() as u64,
            ..Default::default()
        };

        for acc in self.players.values_mut() {
            let energy = acc.reconcile(&self.config, now);
            stats.total_energy += u64::from(energy);
            if energy >= self.config.max_energy {
                stats.full_players += 1;
            }
        }

        stats
    }

    fn with_player<R>(
        &mut self,
        player_id: &PlayerId,
        f: impl FnOnce(&mut EnergyAccumulator, &EnergyConfig, DateTime<Utc>) -> R,
    ) -> R {
        let now = self.clock.now();
        let config = &self.config;

        let acc = self.players.entry(player_id.clone()).or_insert_with(|| {
            debug!(player = %player_id, energy = config.max_energy, "Tracking new player");
            EnergyAccumulator::full(config, now)
        });

        f(acc, config, now)
    }
}

impl std::fmt::Debug for EnergyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnergyRegistry")
            .field("config", &self.config)
            .field("players", &self.players.len())
            .finish()
    }
}
