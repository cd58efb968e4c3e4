//! Per-player energy accumulator
//!
//! Holds the discrete energy count, the time banked toward the next unit
//! and the instant of the last reconciliation. Every read reconciles:
//!
//! 1. Add the time elapsed since `last_update` to the carry
//! 2. Convert whole `unit_period`s of carry into energy (integer division)
//! 3. Clamp energy to the cap
//! 4. Drop the carry once the cap is reached
//!
//! Arithmetic is done in `u128` nanoseconds, so there is no drift however
//! long a player stays away.

use chrono::{DateTime, Utc};
use energy_types::{EnergyConfig, EnergySnapshot, PlayerId};
use std::time::Duration;
use tracing::{trace, warn};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Energy state of a single player
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnergyAccumulator {
    /// Energy available as of `last_update`
    current: u32,
    /// Progress toward the next unit, always below `unit_period`
    carry: Duration,
    /// Instant of the last reconciliation; never moves backwards
    last_update: DateTime<Utc>,
}

impl EnergyAccumulator {
    /// Create an accumulator at the cap, as every new player starts
    pub fn full(config: &EnergyConfig, now: DateTime<Utc>) -> Self {
        Self {
            current: config.max_energy,
            carry: Duration::ZERO,
            last_update: now,
        }
    }

    /// Energy as of the last reconciliation
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Banked progress toward the next unit
    pub fn carry(&self) -> Duration {
        self.carry
    }

    /// Instant of the last reconciliation
    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    /// Fold the time elapsed up to `now` into whole units and return the
    /// reconciled energy.
    ///
    /// A `now` earlier than the last reconciliation credits nothing and
    /// leaves the state untouched. `config` must have passed
    /// [`EnergyConfig::validate`].
    pub fn reconcile(&mut self, config: &EnergyConfig, now: DateTime<Utc>) -> u32 {
        let elapsed = match (now - self.last_update).to_std() {
            Ok(elapsed) => elapsed,
            Err(_) => {
                warn!(
                    last_update = %self.last_update,
                    now = %now,
                    "Clock moved backwards, crediting no energy"
                );
                return self.current;
            }
        };

        let period = config.unit_period.as_nanos();
        let banked = self.carry.as_nanos() + elapsed.as_nanos();
        let units = banked / period;
        let remainder = banked % period;

        let refilled = (u128::from(self.current) + units).min(u128::from(config.max_energy));
        self.current = refilled as u32;

        // Progress toward a unit that cannot be held is discarded; the
        // next unit takes a full period from the moment of saturation.
        self.carry = if self.current >= config.max_energy {
            Duration::ZERO
        } else {
            duration_from_nanos(remainder)
        };
        self.last_update = now;

        if units > 0 {
            trace!(
                units = %units,
                energy = self.current,
                carry_ms = self.carry.as_millis() as u64,
                "Energy regenerated"
            );
        }

        self.current
    }

    /// Reconcile, then spend `amount` if it is positive and available.
    ///
    /// Returns whether the energy was spent. A rejected spend changes
    /// nothing beyond the reconciliation; a successful one leaves the carry
    /// untouched.
    pub fn try_spend(&mut self, config: &EnergyConfig, now: DateTime<Utc>, amount: i64) -> bool {
        let available = self.reconcile(config, now);

        if amount <= 0 {
            return false;
        }

        match u32::try_from(amount) {
            Ok(amount) if amount <= available => {
                self.current -= amount;
                true
            }
            _ => false,
        }
    }

    /// Reconcile and describe the state, including regeneration ETAs
    pub fn snapshot(
        &mut self,
        player_id: &PlayerId,
        config: &EnergyConfig,
        now: DateTime<Utc>,
    ) -> EnergySnapshot {
        let energy = self.reconcile(config, now);
        let missing = config.max_energy.saturating_sub(energy);

        let (next_unit_in, full_in) = if missing == 0 {
            (None, Duration::ZERO)
        } else {
            let next = config.unit_period.saturating_sub(self.carry);
            let rest = config.unit_period.saturating_mul(missing - 1);
            (Some(next), next.saturating_add(rest))
        };

        EnergySnapshot {
            player_id: player_id.clone(),
            energy,
            max_energy: config.max_energy,
            carry: self.carry,
            last_update: self.last_update,
            next_unit_in,
            full_in,
        }
    }
}

fn duration_from_nanos(nanos: u128) -> Duration {
    Duration::new(
        (nanos / NANOS_PER_SEC) as u64,
        (nanos % NANOS_PER_SEC) as u32,
    )
}
