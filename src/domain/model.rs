use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Set of weekdays a template runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct WeekdayMask(u8);

impl WeekdayMask {
    pub const EMPTY: WeekdayMask = WeekdayMask(0);

    pub fn weekends() -> Self {
        Self::from_days(&[Weekday::Sat, Weekday::Sun])
    }

    pub fn from_days(days: &[Weekday]) -> Self {
        days.iter().fold(Self::EMPTY, |mask, day| mask.with(*day))
    }

    pub fn with(self, day: Weekday) -> Self {
        WeekdayMask(self.0 | (1 << day.num_days_from_monday()))
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn days(&self) -> Vec<Weekday> {
        let mut day = Weekday::Mon;
        let mut days = Vec::new();
        for _ in 0..7 {
            if self.contains(day) {
                days.push(day);
            }
            day = day.succ();
        }
        days
    }
}

impl FromStr for WeekdayMask {
    type Err = String;

    /// Accepts comma separated names, e.g. `"sat,sun"` or `"Saturday, Sunday"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .try_fold(Self::EMPTY, |mask, part| {
                part.parse::<Weekday>()
                    .map(|day| mask.with(day))
                    .map_err(|_| format!("unknown weekday '{}'", part))
            })
    }
}

impl TryFrom<Vec<String>> for WeekdayMask {
    type Error = String;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        names.join(",").parse()
    }
}

impl From<WeekdayMask> for Vec<String> {
    fn from(mask: WeekdayMask) -> Self {
        mask.days().iter().map(|d| d.to_string()).collect()
    }
}

impl fmt::Display for WeekdayMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = (*self).into();
        write!(f, "{}", names.join(","))
    }
}

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn next(self) -> Self {
        if self.month >= 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSchedule {
    pub weekday_mask: WeekdayMask,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDate {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub is_past: bool,
}

impl CandidateDate {
    pub fn new(date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            date,
            weekday: date.weekday(),
            is_past: date < today,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGenerationRequest {
    pub template_id: String,
    pub month: u32,
    pub year: i32,
    pub weekday_mask: WeekdayMask,
    pub desired_count: u32,
    pub skip_existing: bool,
    pub exclude_past: bool,
}

impl SlotGenerationRequest {
    pub fn schedule(&self) -> TemplateSchedule {
        TemplateSchedule {
            weekday_mask: self.weekday_mask,
            month: self.month,
            year: self.year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotDecision {
    Create,
    SkipExisting,
    Conflict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedSlot {
    pub date: NaiveDate,
    pub decision: SlotDecision,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGenerationPlan {
    pub template_id: String,
    pub slots: Vec<PlannedSlot>,
    pub create_count: usize,
    pub skip_count: usize,
    pub conflict_count: usize,
}

impl SlotGenerationPlan {
    pub fn dates_with(&self, decision: SlotDecision) -> Vec<NaiveDate> {
        self.slots
            .iter()
            .filter(|slot| slot.decision == decision)
            .map(|slot| slot.date)
            .collect()
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflict_count > 0
    }
}

/// A date already materialized for a template by the slot store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExistingSlotDate {
    pub template_id: String,
    pub date: NaiveDate,
}

pub type ExistingDates = BTreeSet<NaiveDate>;

/// Multi-month "next available slots" query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub template_id: String,
    pub weekday_mask: WeekdayMask,
    pub from: NaiveDate,
    pub desired_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlots {
    pub dates: Vec<NaiveDate>,
    pub has_enough_slots: bool,
    pub months_searched: u32,
    /// Last month inspected; resume from the month after it.
    pub last_month: Option<YearMonth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingInput {
    pub original_price: Decimal,
    pub published_at: NaiveDate,
    pub booking_at: NaiveDate,
    pub tour_starts_at: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricingType {
    EarlyBird,
    Standard,
}

impl fmt::Display for PricingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingType::EarlyBird => write!(f, "EarlyBird"),
            PricingType::Standard => write!(f, "Standard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub is_early_bird: bool,
    pub discount_percent: Decimal,
    pub discount_amount: Decimal,
    pub final_price: Decimal,
    pub pricing_type: PricingType,
    pub days_since_published: i64,
    pub days_until_tour: i64,
    pub early_bird_window_days: i64,
    /// Last booking date that still earns the discount.
    pub early_bird_end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_mask_parsing() {
        let mask: WeekdayMask = "sat, Sunday".parse().unwrap();
        assert_eq!(mask, WeekdayMask::weekends());
        assert_eq!(mask.days(), vec![Weekday::Sat, Weekday::Sun]);
        assert!(!mask.contains(Weekday::Fri));

        assert!("".parse::<WeekdayMask>().unwrap().is_empty());
        assert!("funday".parse::<WeekdayMask>().is_err());
    }

    #[test]
    fn test_weekday_mask_serde() {
        let json = serde_json::to_string(&WeekdayMask::weekends()).unwrap();
        assert_eq!(json, r#"["Sat","Sun"]"#);
        let back: WeekdayMask = serde_json::from_str(r#"["saturday"]"#).unwrap();
        assert_eq!(back, WeekdayMask::from_days(&[Weekday::Sat]));
    }

    #[test]
    fn test_year_month_rolls_over() {
        assert_eq!(YearMonth::new(2025, 12).next(), YearMonth::new(2026, 1));
        assert_eq!(YearMonth::new(2025, 3).next(), YearMonth::new(2025, 4));
        assert!(YearMonth::new(2025, 12) < YearMonth::new(2026, 1));
    }
}
