//! Energy configuration
//!
//! One configuration is shared by every player in a ledger: the cap and
//! the time it takes to regenerate a single unit.

use crate::errors::{EnergyError, EnergyResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for an energy ledger
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyConfig {
    /// Maximum energy a player can hold; new players start here
    pub max_energy: u32,

    /// Time required to regenerate exactly one unit
    pub unit_period: Duration,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            max_energy: 5,
            unit_period: Duration::from_secs(30 * 60),
        }
    }
}

impl EnergyConfig {
    /// Create a new energy configuration
    pub fn new(max_energy: u32, unit_period: Duration) -> Self {
        Self {
            max_energy,
            unit_period,
        }
    }

    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> EnergyResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the energy cap
    pub fn with_max_energy(mut self, max_energy: u32) -> Self {
        self.max_energy = max_energy;
        self
    }

    /// Set the regeneration period for one unit
    pub fn with_unit_period(mut self, unit_period: Duration) -> Self {
        self.unit_period = unit_period;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> EnergyResult<()> {
        if self.max_energy == 0 {
            return Err(EnergyError::InvalidConfiguration {
                reason: "max_energy must be greater than 0".to_string(),
            });
        }

        if self.unit_period.is_zero() {
            return Err(EnergyError::InvalidConfiguration {
                reason: "unit_period must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
