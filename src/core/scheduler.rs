use crate::config::EngineSettings;
use crate::core::pricing::PricingCalculator;
use crate::core::slot_generator::{self, AvailabilitySearch};
use crate::domain::model::{
    AvailabilityQuery, AvailableSlots, PricingInput, PricingResult, SlotDecision,
    SlotGenerationPlan, SlotGenerationRequest,
};
use crate::domain::ports::{Clock, ExistingSlotDatesProvider, SlotWriter};
use crate::utils::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub template_id: String,
    pub created: Vec<NaiveDate>,
    pub skipped: Vec<NaiveDate>,
}

/// Binds the pure slot and pricing logic to a slot store and a clock.
///
/// "Today" is read once per call.
pub struct SlotScheduler<P: ExistingSlotDatesProvider, C: Clock> {
    settings: EngineSettings,
    provider: P,
    clock: C,
    pricing: PricingCalculator,
}

impl<P: ExistingSlotDatesProvider, C: Clock> SlotScheduler<P, C> {
    pub fn new(settings: EngineSettings, provider: P, clock: C) -> Self {
        let pricing = PricingCalculator::new(settings.pricing);
        Self {
            settings,
            provider,
            clock,
            pricing,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub async fn preview(&self, request: &SlotGenerationRequest) -> Result<SlotGenerationPlan> {
        let today = self.clock.today();
        self.preview_at(request, today).await
    }

    async fn preview_at(
        &self,
        request: &SlotGenerationRequest,
        today: NaiveDate,
    ) -> Result<SlotGenerationPlan> {
        let existing = self
            .provider
            .existing_dates(&request.template_id, request.year, request.month)
            .await?;
        slot_generator::plan(&self.settings, request, &existing, today)
    }

    /// Plans and, when no date conflicts, hands the `Create` dates to `writer`.
    pub async fn generate<W: SlotWriter>(
        &self,
        request: &SlotGenerationRequest,
        writer: &W,
    ) -> Result<GenerationOutcome> {
        let today = self.clock.today();
        let plan = self.preview_at(request, today).await?;

        if let Err(e) = plan.ensure_no_conflicts() {
            tracing::warn!(
                "❌ Generation for {} rejected: {}",
                request.template_id,
                e
            );
            return Err(e);
        }

        let created = plan.dates_with(SlotDecision::Create);
        let skipped = plan.dates_with(SlotDecision::SkipExisting);
        let written = if created.is_empty() {
            0
        } else {
            writer.create_slots(&request.template_id, &created).await?
        };

        tracing::info!(
            "✅ Generated {} slot(s) for {} in {:04}-{:02} ({} skipped)",
            written,
            request.template_id,
            request.year,
            request.month,
            skipped.len()
        );

        Ok(GenerationOutcome {
            template_id: request.template_id.clone(),
            created,
            skipped,
        })
    }

    pub async fn next_available(&self, query: &AvailabilityQuery) -> Result<AvailableSlots> {
        let today = self.clock.today();
        let mut search = AvailabilitySearch::new(&self.settings, query, today)?;

        while let Some(month) = search.next_month() {
            let existing = self
                .provider
                .existing_dates(&query.template_id, month.year, month.month)
                .await?;
            search.absorb(month, &existing)?;
        }

        let result = search.finish();
        if result.has_enough_slots {
            tracing::info!(
                "🔍 Found {} slot(s) for {} within {} month(s)",
                result.dates.len(),
                query.template_id,
                result.months_searched
            );
        } else {
            tracing::warn!(
                "⚠️ Only {} of {} slot(s) available for {} after {} month(s)",
                result.dates.len(),
                query.desired_count,
                query.template_id,
                result.months_searched
            );
        }
        Ok(result)
    }

    pub fn price(&self, input: &PricingInput) -> Result<PricingResult> {
        self.pricing.compute(input)
    }
}
