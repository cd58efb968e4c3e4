//! Thread-safe energy registry
//!
//! Same semantics as [`EnergyRegistry`](crate::EnergyRegistry), but every
//! method takes `&self`. Each player's reconciliation and spend run while
//! holding that player's map entry exclusively, so a concurrent caller can
//! never slip in between the reconciled read and the decrement.

use crate::accumulator::EnergyAccumulator;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use energy_types::{
    Clock, EnergyConfig, EnergyResult, EnergySnapshot, PlayerId, RegistryStats, SystemClock,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of per-player energy, shareable across threads
pub struct SharedEnergyRegistry {
    config: EnergyConfig,
    clock: Arc<dyn Clock>,
    players: DashMap<PlayerId, EnergyAccumulator>,
}

impl SharedEnergyRegistry {
    /// Create a shared registry with an injected clock
    pub fn new(config: EnergyConfig, clock: Arc<dyn Clock>) -> EnergyResult<Self> {
        config.validate()?;

        info!(
            max_energy = config.max_energy,
            unit_period_secs = config.unit_period.as_secs(),
            "Shared energy registry initialized"
        );

        Ok(Self {
            config,
            clock,
            players: DashMap::new(),
        })
    }

    /// Create a shared registry driven by the wall clock
    pub fn with_system_clock(config: EnergyConfig) -> EnergyResult<Self> {
        Self::new(config, Arc::new(SystemClock))
    }

    /// Energy cap shared by every player
    pub fn max_energy(&self) -> u32 {
        self.config.max_energy
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
    pub fn get_energy(&self, player_id: &PlayerId) -> u32 {
        self.with_player(player_id, |acc, now| acc.reconcile(&self.config, now))
    }

    /// Spend energy if the player has at least `amount` and `amount` is positive
    pub fn try_spend(&self, player_id: &PlayerId, amount: i64) -> bool {
        let spent = self.with_player(player_id, |acc, now| {
            acc.try_spend(&self.config, now, amount)
        });

        debug!(player = %player_id, amount, spent, "Energy spend requested");
        spent
    }

    /// Get the reconciled state of a player, including regeneration ETAs
    pub fn snapshot(&self, player_id: &PlayerId) -> EnergySnapshot {
        self.with_player(player_id, |acc, now| {
            acc.snapshot(player_id, &self.config, now)
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
    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats::default();

        for mut entry in self.players.iter_mut() {
            let energy = entry.value_mut().reconcile(&self.config, self.clock.now());
            stats.player_count += 1;
            stats.total_energy += u64::from(energy);
            if energy >= self.config.max_energy {
                stats.full_players += 1;
            }
        }

        stats
    }

    fn with_player<R>(
        &self,
        player_id: &PlayerId,
        f: impl FnOnce(&mut EnergyAccumulator, DateTime<Utc>) -> R,
    ) -> R {
        let mut entry = self.players.entry(player_id.clone()).or_insert_with(|| {
            debug!(player = %player_id, energy = self.config.max_energy, "Tracking new player");
            EnergyAccumulator::full(&self.config, self.clock.now())
        });

        // Read the clock under the entry guard so callers racing on one
        // player observe non-decreasing instants.
        let now = self.clock.now();
        f(entry.value_mut(), now)
    }
}

impl std::fmt::Debug for SharedEnergyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEnergyRegistry")
            .field("config", &self.config)
            .field("players", &self.players.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use energy_types::ManualClock;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn registry() -> (SharedEnergyRegistry, ManualClock) {
        let clock = ManualClock::starting_now();
        let registry =
            SharedEnergyRegistry::new(EnergyConfig::default(), Arc::new(clock.clone())).unwrap();
        (registry, clock)
    }

    #[test]
    fn test_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedEnergyRegistry>();
    }

    #[test]
    fn test_concurrent_spends_never_overdraw() {
        let (registry, _clock) = registry();
        let player = PlayerId::new("contended");
        let successes = AtomicU32::new(0);

        std::thread::scope(|scope| {
            for _ in 0..16 {
                scope.spawn(|| {
                    if registry.try_spend(&player, 1) {
                        successes.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(successes.load(Ordering::SeqCst), 5);
        assert_eq!(registry.get_energy(&player), 0);
        assert_eq!(registry.player_count(), 1);
    }

    #[test]
    fn test_concurrent_players_are_isolated() {
        let (registry, _clock) = registry();

        std::thread::scope(|scope| {
            for i in 0..8 {
                let registry = &registry;
                scope.spawn(move || {
                    let player = PlayerId::new(format!("player-{}", i));
                    assert!(registry.try_spend(&player, 3));
                });
            }
        });

        let stats = registry.stats();
        assert_eq!(stats.player_count, 8);
        assert_eq!(stats.total_energy, 8 * 2);
        assert_eq!(stats.full_players, 0);
    }

    #[test]
    fn test_regenerates_like_single_owner() {
        let (registry, clock) = registry();
        let player = PlayerId::new("player1");

        assert!(registry.try_spend(&player, 5));
        clock.advance(Duration::from_secs(60 * 60));
        assert_eq!(registry.get_energy(&player), 2);

        let snapshot = registry.snapshot(&player);
        assert_eq!(snapshot.carry, Duration::ZERO);
        assert_eq!(snapshot.next_unit_in, Some(Duration::from_secs(30 * 60)));
    }
}
