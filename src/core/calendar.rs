//! Calendar matching: every day of a month whose weekday is in the template's mask.

use crate::config::CalendarSettings;
use crate::domain::model::{CandidateDate, TemplateSchedule, WeekdayMask};
use crate::utils::error::{Result, TourError};
use crate::utils::validation::validate_range;
use chrono::{Datelike, NaiveDate};

/// Enumerates the dates of `year`/`month` that fall on a weekday in `weekday_mask`,
/// ascending. With `exclude_past`, dates strictly before `today` are dropped.
pub fn match_dates(
    settings: &CalendarSettings,
    year: i32,
    month: u32,
    weekday_mask: WeekdayMask,
    exclude_past: bool,
    today: NaiveDate,
) -> Result<Vec<CandidateDate>> {
    validate_range("month", month, 1, 12)?;
    validate_range("year", year, settings.min_year, settings.max_year)?;
    if weekday_mask.is_empty() {
        return Err(TourError::invalid_range(
            "weekday_mask",
            "[]",
            "at least one weekday is required",
        ));
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| TourError::invalid_range("year", year, "date is not representable"))?;

    let candidates: Vec<CandidateDate> = first
        .iter_days()
        .take_while(|date| date.month() == month)
        .filter(|date| weekday_mask.contains(date.weekday()))
        .map(|date| CandidateDate::new(date, today))
        .filter(|candidate| !(exclude_past && candidate.is_past))
        .collect();

    tracing::debug!(
        "Matched {} {} date(s) in {:04}-{:02} (exclude_past={})",
        candidates.len(),
        weekday_mask,
        year,
        month,
        exclude_past
    );

    Ok(candidates)
}

pub fn match_schedule(
    settings: &CalendarSettings,
    schedule: &TemplateSchedule,
    exclude_past: bool,
    today: NaiveDate,
) -> Result<Vec<CandidateDate>> {
    match_dates(
        settings,
        schedule.year,
        schedule.month,
        schedule.weekday_mask,
        exclude_past,
        today,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dates(candidates: &[CandidateDate]) -> Vec<NaiveDate> {
        candidates.iter().map(|c| c.date).collect()
    }

    #[test]
    fn test_january_2025_weekends() {
        let settings = CalendarSettings::default();
        let found =
            match_dates(&settings, 2025, 1, WeekdayMask::weekends(), false, ymd(2024, 6, 1))
                .unwrap();

        assert_eq!(
            dates(&found),
            vec![
                ymd(2025, 1, 4),
                ymd(2025, 1, 5),
                ymd(2025, 1, 11),
                ymd(2025, 1, 12),
                ymd(2025, 1, 18),
                ymd(2025, 1, 19),
                ymd(2025, 1, 25),
                ymd(2025, 1, 26),
            ]
        );
        assert!(found.iter().all(|c| !c.is_past));
    }

    #[test]
    fn test_saturday_only() {
        let settings = CalendarSettings::default();
        let mask = WeekdayMask::from_days(&[Weekday::Sat]);
        let found = match_dates(&settings, 2025, 1, mask, false, ymd(2024, 6, 1)).unwrap();

        assert_eq!(found.len(), 4);
        assert!(found.iter().all(|c| c.weekday == Weekday::Sat));
        assert!(found.iter().all(|c| c.date.weekday() == Weekday::Sat));
    }

    #[test]
    fn test_is_idempotent() {
        let settings = CalendarSettings::default();
        let today = ymd(2025, 1, 10);
        let first = match_dates(&settings, 2025, 3, WeekdayMask::weekends(), false, today).unwrap();
        let second = match_dates(&settings, 2025, 3, WeekdayMask::weekends(), false, today).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_exclude_past_keeps_today() {
        let settings = CalendarSettings::default();
        let today = ymd(2025, 1, 12);

        let all = match_dates(&settings, 2025, 1, WeekdayMask::weekends(), false, today).unwrap();
        assert_eq!(all.iter().filter(|c| c.is_past).count(), 3);

        let upcoming =
            match_dates(&settings, 2025, 1, WeekdayMask::weekends(), true, today).unwrap();
        assert_eq!(upcoming.first().map(|c| c.date), Some(ymd(2025, 1, 12)));
        assert_eq!(upcoming.len(), 5);
    }

    #[test]
    fn test_leap_february() {
        let settings = CalendarSettings::default();
        let mask = WeekdayMask::from_days(&[Weekday::Thu]);
        let found = match_dates(&settings, 2024, 2, mask, false, ymd(2024, 1, 1)).unwrap();
        assert_eq!(found.last().map(|c| c.date), Some(ymd(2024, 2, 29)));
        assert_eq!(found.len(), 5);
    }

    #[test]
    fn test_rejects_out_of_range_inputs() {
        let settings = CalendarSettings::default();
        let today = ymd(2025, 1, 1);
        let mask = WeekdayMask::weekends();

        for (year, month) in [(2025, 0), (2025, 13), (2023, 5), (2031, 5)] {
            assert!(matches!(
                match_dates(&settings, year, month, mask, false, today),
                Err(TourError::InvalidRange { .. })
            ));
        }
        assert!(matches!(
            match_dates(&settings, 2025, 1, WeekdayMask::EMPTY, false, today),
            Err(TourError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_year_bounds_come_from_settings() {
        let settings = CalendarSettings {
            min_year: 2035,
            max_year: 2040,
        };
        let found = match_dates(
            &settings,
            2036,
            1,
            WeekdayMask::weekends(),
            false,
            ymd(2025, 1, 1),
        );
        assert!(found.is_ok());
    }
}
