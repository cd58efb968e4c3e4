//! Energy Ledger - capped, regenerating energy tracked per player
//!
//! Energy refills one unit every `unit_period` up to `max_energy`. Nothing
//! ticks in the background: each read converts the time elapsed since the
//! previous read into whole units and banks the remainder, so a player who
//! returns after a month sees exactly the energy they earned.
//!
//! Two front doors share the same [`EnergyAccumulator`]:
//! - [`EnergyRegistry`]: single owner, `&mut self`
//! - [`SharedEnergyRegistry`]: `Send + Sync`, per-player exclusion

#![deny(unsafe_code)]

pub mod accumulator;
pub mod registry;
pub mod shared;

pub use accumulator::EnergyAccumulator;
pub use energy_types::{
    Clock, EnergyConfig, EnergyError, EnergyResult, EnergySnapshot, ManualClock, PlayerId,
    RegistryStats, SystemClock,
};
pub use registry::EnergyRegistry;
pub use shared::SharedEnergyRegistry;
