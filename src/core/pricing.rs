//! Early-bird pricing.
//!
//! A booking earns the discount when it is made inside the window that opens on the publish
//! date AND still leaves the minimum notice before departure. The two edges compare
//! differently: the publish window is half-open (day `window_days` after publishing is already
//! too late) while the notice edge is closed (exactly `min_notice_days` before departure still
//! qualifies).

use crate::config::PricingSettings;
use crate::domain::model::{PricingInput, PricingResult, PricingType};
use crate::utils::error::{Result, TourError};
use chrono::{Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// How a day count is compared against its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// `value <= limit`
    Inclusive,
    /// `value < limit`
    Exclusive,
}

impl Boundary {
    pub fn holds(self, value: i64, limit: i64) -> bool {
        match self {
            Boundary::Inclusive => value <= limit,
            Boundary::Exclusive => value < limit,
        }
    }

    /// Distance between the limit and the last admitted value.
    pub fn slack(self) -> i64 {
        match self {
            Boundary::Inclusive => 0,
            Boundary::Exclusive => 1,
        }
    }

    /// Largest `value` for which `holds(value, limit)` is true.
    pub fn last_admitted(self, limit: i64) -> i64 {
        limit - self.slack()
    }
}

/// `days_since_published < default_window_days`
pub const PUBLISH_WINDOW_EDGE: Boundary = Boundary::Exclusive;
/// `min_notice_days <= days_until_tour`
pub const MIN_NOTICE_EDGE: Boundary = Boundary::Inclusive;

#[derive(Debug, Clone, Copy, Default)]
pub struct PricingCalculator {
    settings: PricingSettings,
}

impl PricingCalculator {
    pub fn new(settings: PricingSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PricingSettings {
        &self.settings
    }

    pub fn compute(&self, input: &PricingInput) -> Result<PricingResult> {
        compute_pricing(&self.settings, input)
    }
}

fn shift(date: NaiveDate, days: i64, field: &str) -> Result<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
        .ok_or_else(|| TourError::invalid_input(field, date, "date arithmetic overflowed"))
}

pub fn compute_pricing(settings: &PricingSettings, input: &PricingInput) -> Result<PricingResult> {
    if input.original_price <= Decimal::ZERO {
        return Err(TourError::invalid_input(
            "original_price",
            input.original_price,
            "price must be positive",
        ));
    }
    if input.booking_at < input.published_at {
        return Err(TourError::invalid_input(
            "booking_at",
            input.booking_at,
            format!("booking precedes publish date {}", input.published_at),
        ));
    }

    let window_days = i64::from(settings.default_window_days);
    let min_notice_days = i64::from(settings.min_notice_days);

    let days_since_published = (input.booking_at - input.published_at).num_days();
    let days_until_tour = (input.tour_starts_at - input.booking_at).num_days();

    let last_in_window = shift(
        input.published_at,
        PUBLISH_WINDOW_EDGE.last_admitted(window_days),
        "published_at",
    )?;
    // min_notice <= tour - booking  <=>  booking <= tour - min_notice
    let latest_eligible_booking = shift(
        input.tour_starts_at,
        -(min_notice_days + MIN_NOTICE_EDGE.slack()),
        "tour_starts_at",
    )?;
    let early_bird_end_date = last_in_window.min(latest_eligible_booking);
    let early_bird_window_days = if early_bird_end_date < input.published_at {
        0
    } else {
        (early_bird_end_date - input.published_at).num_days() + 1
    };

    let is_early_bird = PUBLISH_WINDOW_EDGE.holds(days_since_published, window_days)
        && MIN_NOTICE_EDGE.holds(min_notice_days, days_until_tour);

    let (discount_percent, pricing_type) = if is_early_bird {
        (settings.discount_percent, PricingType::EarlyBird)
    } else {
        (Decimal::ZERO, PricingType::Standard)
    };

    let discounted = if discount_percent.is_zero() {
        input.original_price
    } else {
        (Decimal::ONE_HUNDRED - discount_percent)
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|factor| input.original_price.checked_mul(factor))
            .ok_or_else(|| {
                TourError::invalid_input("original_price", input.original_price, "price too large")
            })?
    };
    let final_price =
        discounted.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let discount_amount = input.original_price - final_price;

    tracing::debug!(
        "Pricing: {} day(s) since publish, {} day(s) to departure, window ends {} -> {}",
        days_since_published,
        days_until_tour,
        early_bird_end_date,
        pricing_type
    );

    Ok(PricingResult {
        is_early_bird,
        discount_percent,
        discount_amount,
        final_price,
        pricing_type,
        days_since_published,
        days_until_tour,
        early_bird_window_days,
        early_bird_end_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(published: NaiveDate, booking: NaiveDate, tour: NaiveDate) -> PricingInput {
        PricingInput {
            original_price: Decimal::from(1_000_000),
            published_at: published,
            booking_at: booking,
            tour_starts_at: tour,
        }
    }

    #[test]
    fn test_boundary_operators() {
        assert!(PUBLISH_WINDOW_EDGE.holds(14, 15));
        assert!(!PUBLISH_WINDOW_EDGE.holds(15, 15));
        assert!(MIN_NOTICE_EDGE.holds(30, 30));
        assert!(!MIN_NOTICE_EDGE.holds(30, 29));
    }

    #[test]
    fn test_day_15_is_outside_window() {
        let settings = PricingSettings::default();
        let result = compute_pricing(
            &settings,
            &input(ymd(2024, 1, 1), ymd(2024, 1, 16), ymd(2024, 2, 15)),
        )
        .unwrap();

        assert!(!result.is_early_bird);
        assert_eq!(result.pricing_type, PricingType::Standard);
        assert_eq!(result.days_since_published, 15);
        assert_eq!(result.early_bird_end_date, ymd(2024, 1, 15));
        assert_eq!(result.early_bird_window_days, 15);
    }

    #[test]
    fn test_day_14_is_inside_window() {
        let settings = PricingSettings::default();
        let result = compute_pricing(
            &settings,
            &input(ymd(2024, 1, 1), ymd(2024, 1, 15), ymd(2024, 3, 1)),
        )
        .unwrap();
        assert!(result.is_early_bird);
    }

    #[test]
    fn test_exactly_30_days_notice_qualifies() {
        let settings = PricingSettings::default();
        let result = compute_pricing(
            &settings,
            &input(ymd(2024, 1, 1), ymd(2024, 1, 5), ymd(2024, 2, 4)),
        )
        .unwrap();

        assert!(result.is_early_bird);
        assert_eq!(result.days_until_tour, 30);
        assert_eq!(result.discount_percent, Decimal::from(25));
        assert_eq!(result.final_price, Decimal::from(750_000));
        assert_eq!(result.discount_amount, Decimal::from(250_000));
        assert_eq!(result.pricing_type, PricingType::EarlyBird);
        assert_eq!(result.early_bird_end_date, ymd(2024, 1, 5));
        assert_eq!(result.early_bird_window_days, 5);
    }

    #[test]
    fn test_29_days_notice_fails() {
        let settings = PricingSettings::default();
        let result = compute_pricing(
            &settings,
            &input(ymd(2024, 1, 1), ymd(2024, 1, 5), ymd(2024, 2, 3)),
        )
        .unwrap();

        assert!(!result.is_early_bird);
        assert_eq!(result.final_price, Decimal::from(1_000_000));
        assert_eq!(result.discount_amount, Decimal::ZERO);
        assert_eq!(result.discount_percent, Decimal::ZERO);
    }

    #[test]
    fn test_empty_window_when_tour_departs_soon() {
        let settings = PricingSettings::default();
        let result = compute_pricing(
            &settings,
            &input(ymd(2024, 1, 1), ymd(2024, 1, 1), ymd(2024, 1, 20)),
        )
        .unwrap();

        assert!(!result.is_early_bird);
        assert_eq!(result.early_bird_window_days, 0);
        assert!(result.early_bird_end_date < ymd(2024, 1, 1));
    }

    #[test]
    fn test_departure_before_booking_is_standard() {
        let settings = PricingSettings::default();
        let result = compute_pricing(
            &settings,
            &input(ymd(2024, 1, 1), ymd(2024, 1, 3), ymd(2024, 1, 2)),
        )
        .unwrap();
        assert!(!result.is_early_bird);
        assert_eq!(result.days_until_tour, -1);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let settings = PricingSettings::default();

        let mut free = input(ymd(2024, 1, 1), ymd(2024, 1, 2), ymd(2024, 3, 1));
        free.original_price = Decimal::ZERO;
        assert!(matches!(
            compute_pricing(&settings, &free),
            Err(TourError::InvalidInput { .. })
        ));

        let early = input(ymd(2024, 1, 10), ymd(2024, 1, 9), ymd(2024, 3, 1));
        assert!(matches!(
            compute_pricing(&settings, &early),
            Err(TourError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_huge_price_does_not_panic() {
        let settings = PricingSettings::default();

        let mut standard = input(ymd(2024, 1, 1), ymd(2024, 1, 20), ymd(2024, 3, 1));
        standard.original_price = Decimal::MAX;
        let result = compute_pricing(&settings, &standard).unwrap();
        assert_eq!(result.final_price, Decimal::MAX);
        assert_eq!(result.discount_amount, Decimal::ZERO);

        let mut early = input(ymd(2024, 1, 1), ymd(2024, 1, 2), ymd(2024, 3, 1));
        early.original_price = Decimal::MAX / Decimal::TEN;
        match compute_pricing(&settings, &early) {
            Ok(result) => {
                assert!(result.is_early_bird);
                assert!(result.final_price < early.original_price);
            }
            Err(TourError::InvalidInput { field, .. }) => assert_eq!(field, "original_price"),
            Err(other) => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_boundary_slack() {
        assert_eq!(Boundary::Inclusive.slack(), 0);
        assert_eq!(Boundary::Exclusive.slack(), 1);
        assert_eq!(Boundary::Exclusive.last_admitted(15), 14);
        assert_eq!(Boundary::Inclusive.last_admitted(30), 30);
    }

    #[test]
    fn test_configured_discount_and_rounding() {
        let settings = PricingSettings {
            discount_percent: Decimal::new(125, 1),
            ..PricingSettings::default()
        };
        let mut priced = input(ymd(2024, 1, 1), ymd(2024, 1, 2), ymd(2024, 3, 1));
        priced.original_price = Decimal::new(9999, 2);

        let result = PricingCalculator::new(settings).compute(&priced).unwrap();
        // 99.99 * 0.875 = 87.49125
        assert_eq!(result.final_price, Decimal::new(8749, 2));
        assert_eq!(result.discount_amount, Decimal::new(1250, 2));
    }
}
