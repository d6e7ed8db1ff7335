#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{config_error, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_YEAR: i32 = 2024;
pub const DEFAULT_MAX_YEAR: i32 = 2030;
pub const DEFAULT_WINDOW_DAYS: u32 = 15;
pub const DEFAULT_MIN_NOTICE_DAYS: u32 = 30;
pub const DEFAULT_DISCOUNT_PERCENT: u32 = 25;
pub const DEFAULT_MAX_LOOK_AHEAD_MONTHS: u32 = 12;

/// Host-supplied tuning for the slot and pricing engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub calendar: CalendarSettings,
    pub pricing: PricingSettings,
    pub search: SearchSettings,
}

/// Years outside `min_year..=max_year` are rejected by the calendar matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub min_year: i32,
    pub max_year: i32,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Length of the early-bird window that opens on the publish date.
    pub default_window_days: u32,
    /// Minimum gap between booking and departure for the discount to apply.
    pub min_notice_days: u32,
    pub discount_percent: Decimal,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            default_window_days: DEFAULT_WINDOW_DAYS,
            min_notice_days: DEFAULT_MIN_NOTICE_DAYS,
            discount_percent: Decimal::from(DEFAULT_DISCOUNT_PERCENT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub max_look_ahead_months: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_look_ahead_months: DEFAULT_MAX_LOOK_AHEAD_MONTHS,
        }
    }
}

impl Validate for EngineSettings {
    fn validate(&self) -> Result<()> {
        if self.calendar.min_year > self.calendar.max_year {
            return Err(config_error(
                "calendar.min_year",
                format!(
                    "min_year {} is after max_year {}",
                    self.calendar.min_year, self.calendar.max_year
                ),
            ));
        }

        let pct = self.pricing.discount_percent;
        if pct < Decimal::ZERO || pct >= Decimal::ONE_HUNDRED {
            return Err(config_error(
                "pricing.discount_percent",
                format!("{} is outside [0, 100)", pct),
            ));
        }

        if self.search.max_look_ahead_months == 0 {
            return Err(config_error(
                "search.max_look_ahead_months",
                "must search at least one month",
            ));
        }

        Ok(())
    }
}
