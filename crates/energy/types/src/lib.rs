//! Energy Types - shared vocabulary for the regenerating energy ledger
//!
//! Energy is a capped, discrete resource that refills passively over
//! wall-clock time. This crate holds the pieces every ledger shares:
//! - [`PlayerId`]: the key an energy pool is tracked under
//! - [`EnergyConfig`]: the cap and the time needed to regenerate one unit
//! - [`Clock`]: the injected source of the current instant
//! - [`EnergySnapshot`] / [`RegistryStats`]: read-only views of ledger state

#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod errors;
pub mod player;
pub mod snapshot;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EnergyConfig;
pub use errors::{EnergyError, EnergyResult};
pub use player::PlayerId;
pub use snapshot::{EnergySnapshot, RegistryStats};
