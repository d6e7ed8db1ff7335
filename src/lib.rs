pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::clock::{FixedClock, SystemClock};
pub use crate::adapters::store::{InMemorySlotStore, JsonFileSlotStore};
pub use crate::config::EngineSettings;
pub use crate::core::calendar::match_dates;
pub use crate::core::conflict::partition;
pub use crate::core::distribution::select_evenly_distributed;
pub use crate::core::pricing::{compute_pricing, PricingCalculator};
pub use crate::core::scheduler::{GenerationOutcome, SlotScheduler};
pub use crate::core::slot_generator::{next_available, plan};
pub use crate::utils::error::{Result, TourError};
