use crate::domain::model::ExistingDates;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Read-only view of the slots already persisted for a template.
#[async_trait]
pub trait ExistingSlotDatesProvider: Send + Sync {
    async fn existing_dates(&self, template_id: &str, year: i32, month: u32)
        -> Result<ExistingDates>;
}

/// Persists the dates of a conflict-free plan. Returns how many slots were written.
#[async_trait]
pub trait SlotWriter: Send + Sync {
    async fn create_slots(&self, template_id: &str, dates: &[NaiveDate]) -> Result<usize>;
}

/// Source of "today" in the host's local calendar.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
