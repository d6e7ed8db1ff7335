//! Turns a template request into a per-date generation plan, and searches forward across
//! months for the next free dates of a template.

use crate::config::EngineSettings;
use crate::core::calendar::{match_dates, match_schedule};
use crate::core::conflict::partition;
use crate::core::distribution::select_evenly_distributed;
use crate::domain::model::{
    AvailabilityQuery, AvailableSlots, ExistingDates, PlannedSlot, SlotDecision,
    SlotGenerationPlan, SlotGenerationRequest, YearMonth,
};
use crate::utils::error::{Result, TourError};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, Validate};
use chrono::NaiveDate;

impl Validate for SlotGenerationRequest {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("template_id", &self.template_id)?;
        validate_positive_number("desired_count", self.desired_count, 1)
    }
}

/// Builds the plan for one template/month. Conflicting dates are marked `SkipExisting` when the
/// request allows skipping and `Conflict` otherwise; see [`SlotGenerationPlan::ensure_no_conflicts`].
pub fn plan(
    settings: &EngineSettings,
    request: &SlotGenerationRequest,
    existing: &ExistingDates,
    today: NaiveDate,
) -> Result<SlotGenerationPlan> {
    request.validate()?;

    let matched = match_schedule(
        &settings.calendar,
        &request.schedule(),
        request.exclude_past,
        today,
    )?;
    let selected = select_evenly_distributed(&matched, request.desired_count as usize);
    let split = partition(&selected, existing);

    let conflict_decision = if request.skip_existing {
        SlotDecision::SkipExisting
    } else {
        SlotDecision::Conflict
    };

    let mut result = SlotGenerationPlan {
        template_id: request.template_id.clone(),
        ..Default::default()
    };
    for candidate in &selected {
        let decision = if split.conflicting.contains(candidate) {
            conflict_decision
        } else {
            SlotDecision::Create
        };
        match decision {
            SlotDecision::Create => result.create_count += 1,
            SlotDecision::SkipExisting => result.skip_count += 1,
            SlotDecision::Conflict => result.conflict_count += 1,
        }
        result.slots.push(PlannedSlot {
            date: candidate.date,
            decision,
        });
    }

    tracing::debug!(
        "Plan for {} {:04}-{:02}: {} matched, {} selected, {} create, {} skip, {} conflict",
        request.template_id,
        request.year,
        request.month,
        matched.len(),
        selected.len(),
        result.create_count,
        result.skip_count,
        result.conflict_count
    );

    Ok(result)
}

impl SlotGenerationPlan {
    /// A plan with any `Conflict` entry is rejected as a whole, listing every conflicting date.
    pub fn ensure_no_conflicts(&self) -> Result<()> {
        if self.has_conflicts() {
            return Err(TourError::Conflict {
                template_id: self.template_id.clone(),
                dates: self.dates_with(SlotDecision::Conflict),
            });
        }
        Ok(())
    }
}

/// Month-by-month accumulation of free dates for an [`AvailabilityQuery`].
///
/// Callers drive it with [`AvailabilitySearch::next_month`] and feed the store's existing dates
/// for that month to [`AvailabilitySearch::absorb`]. Dates before the query's `from` date or before
/// `today` are never returned.
#[derive(Debug)]
pub struct AvailabilitySearch<'a> {
    settings: &'a EngineSettings,
    query: &'a AvailabilityQuery,
    floor: NaiveDate,
    cursor: YearMonth,
    months_searched: u32,
    last_month: Option<YearMonth>,
    found: Vec<NaiveDate>,
}

impl<'a> AvailabilitySearch<'a> {
    pub fn new(
        settings: &'a EngineSettings,
        query: &'a AvailabilityQuery,
        today: NaiveDate,
    ) -> Result<Self> {
        validate_non_empty_string("template_id", &query.template_id)?;
        validate_positive_number("desired_count", query.desired_count, 1)?;
        if query.weekday_mask.is_empty() {
            return Err(TourError::invalid_range(
                "weekday_mask",
                "[]",
                "at least one weekday is required",
            ));
        }

        let floor = query.from.max(today);
        let cursor = YearMonth::of(floor).max(YearMonth::new(settings.calendar.min_year, 1));

        Ok(Self {
            settings,
            query,
            floor,
            cursor,
            months_searched: 0,
            last_month: None,
            found: Vec::new(),
        })
    }

    fn is_satisfied(&self) -> bool {
        self.found.len() >= self.query.desired_count as usize
    }

    /// The next month to inspect, or `None` once enough dates were found or the look-ahead
    /// (or the supported year range) is exhausted.
    pub fn next_month(&self) -> Option<YearMonth> {
        if self.is_satisfied()
            || self.months_searched >= self.settings.search.max_look_ahead_months
            || self.cursor.year > self.settings.calendar.max_year
        {
            return None;
        }
        Some(self.cursor)
    }

    pub fn absorb(&mut self, month: YearMonth, existing: &ExistingDates) -> Result<()> {
        let candidates = match_dates(
            &self.settings.calendar,
            month.year,
            month.month,
            self.query.weekday_mask,
            true,
            self.floor,
        )?;
        let split = partition(&candidates, existing);

        let wanted = (self.query.desired_count as usize).saturating_sub(self.found.len());
        self.found
            .extend(split.creatable.iter().take(wanted).map(|c| c.date));

        tracing::debug!(
            "Searched {} for {}: {} free, {} taken, {} total so far",
            month,
            self.query.template_id,
            split.creatable.len(),
            split.conflicting.len(),
            self.found.len()
        );

        self.months_searched += 1;
        self.last_month = Some(month);
        self.cursor = month.next();
        Ok(())
    }

    pub fn finish(self) -> AvailableSlots {
        AvailableSlots {
            has_enough_slots: self.is_satisfied(),
            dates: self.found,
            months_searched: self.months_searched,
            last_month: self.last_month,
        }
    }
}

/// Runs an [`AvailabilitySearch`] to completion with a synchronous lookup of existing dates.
pub fn next_available<F>(
    settings: &EngineSettings,
    query: &AvailabilityQuery,
    today: NaiveDate,
    mut existing_for: F,
) -> Result<AvailableSlots>
where
    F: FnMut(YearMonth) -> Result<ExistingDates>,
{
    let mut search = AvailabilitySearch::new(settings, query, today)?;
    while let Some(month) = search.next_month() {
        let existing = existing_for(month)?;
        search.absorb(month, &existing)?;
    }
    Ok(search.finish())
}
