pub mod calendar;
pub mod conflict;
pub mod distribution;
pub mod pricing;
pub mod scheduler;
pub mod slot_generator;

pub use crate::domain::model::{
    AvailabilityQuery, AvailableSlots, CandidateDate, PricingInput, PricingResult,
    SlotGenerationPlan, SlotGenerationRequest, WeekdayMask,
};
pub use crate::domain::ports::{Clock, ExistingSlotDatesProvider, SlotWriter};
pub use crate::utils::error::Result;
