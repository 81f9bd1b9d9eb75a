//! Boundary validation for calculator input.
//!
//! Raw strings from the user are checked once here. Everything downstream
//! takes a [`CycleInput`] and trusts it.

use crate::landmarks::{FERTILE_LEAD_DAYS, GESTATION_DAYS, LUTEAL_PHASE_DAYS};
use crate::{Error, Result};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Date format accepted at the boundary and used for all rendered dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest accepted cycle; also bounds the hormone series length
pub const MAX_CYCLE_LENGTH: u32 = 365;

/// Validated calculator input: first day of the last period plus cycle length
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CycleInput {
    start_date: NaiveDate,
    cycle_length: u32,
}

impl CycleInput {
    /// Build an input from already-typed values
    ///
    /// Fails with `InvalidCycleLength` when `cycle_length` is zero, above
    /// [`MAX_CYCLE_LENGTH`], or would put a landmark date outside the
    /// representable calendar range.
    pub fn new(start_date: NaiveDate, cycle_length: u32) -> Result<Self> {
        if cycle_length == 0 || cycle_length > MAX_CYCLE_LENGTH {
            return Err(Error::InvalidCycleLength(cycle_length.to_string()));
        }

        // Earliest landmark is the first fertile window opening (cycle_length >= 1),
        // latest is the due date
        let len = i64::from(cycle_length);
        let earliest = Duration::days(LUTEAL_PHASE_DAYS - 1 + FERTILE_LEAD_DAYS);
        let latest = Duration::days(len - LUTEAL_PHASE_DAYS + GESTATION_DAYS);
        if start_date.checked_sub_signed(earliest).is_none()
            || start_date.checked_add_signed(latest).is_none()
        {
            return Err(Error::InvalidCycleLength(cycle_length.to_string()));
        }

        Ok(Self {
            start_date,
            cycle_length,
        })
    }

    /// Build an input from raw user text
    pub fn parse(start_date: &str, cycle_length: &str) -> Result<Self> {
        let start_date = parse_date(start_date)?;
        let cycle_length = parse_cycle_length(cycle_length)?;
        Self::new(start_date, cycle_length)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn cycle_length(&self) -> u32 {
        self.cycle_length
    }
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    // chrono accepts signs and unpadded fields ("+2024-01-1"); require digits in place
    let shape_ok = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(Error::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Parse a positive whole number of days
pub fn parse_cycle_length(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidCycleLength(s.to_string())),
        Ok(days) => Ok(days),
    }
}

/// Render a date in the boundary format
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_input() {
        let input = CycleInput::parse("2024-01-01", "28").unwrap();
        assert_eq!(input.start_date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(input.cycle_length(), 28);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let input = CycleInput::parse(" 2024-03-01 ", " 21\n").unwrap();
        assert_eq!(input.cycle_length(), 21);
    }

    #[test]
    fn test_rejects_malformed_dates() {
        for bad in [
            "",
            "2024/01/01",
            "01-01-2024",
            "2024-02-30",
            "2024-1-5",
            "+2024-01-1",
            "2024-01-+1",
            "tomorrow",
        ] {
            let err = parse_date(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidDate(_)), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_accepts_leap_day() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("2023-02-29").is_err());
    }

    #[test]
    fn test_rejects_bad_cycle_lengths() {
        for bad in ["", "0", "-28", "28.5", "twenty", "1e2"] {
            let err = parse_cycle_length(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidCycleLength(_)), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_new_rejects_zero_length() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(CycleInput::new(start, 0).is_err());
        assert!(CycleInput::new(start, 1).is_ok());
    }

    #[test]
    fn test_rejects_cycle_lengths_above_max() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(CycleInput::new(start, MAX_CYCLE_LENGTH).is_ok());
        assert!(CycleInput::new(start, MAX_CYCLE_LENGTH + 1).is_err());

        let err = CycleInput::parse("2024-01-01", "4000000000").unwrap_err();
        assert!(matches!(err, Error::InvalidCycleLength(_)));
    }

    #[test]
    fn test_every_accepted_length_computes() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for cycle_length in 1..=MAX_CYCLE_LENGTH {
            let input = CycleInput::new(start, cycle_length).unwrap();
            let result = crate::landmarks::compute(&input);
            assert_eq!((result.next_period_date - start).num_days(), i64::from(cycle_length));
        }
    }

    #[test]
    fn test_rejects_landmarks_outside_calendar_range() {
        assert!(matches!(
            CycleInput::new(NaiveDate::MAX, 28),
            Err(Error::InvalidCycleLength(_))
        ));
        assert!(matches!(
            CycleInput::new(NaiveDate::MIN, 28),
            Err(Error::InvalidCycleLength(_))
        ));
    }

    #[test]
    fn test_short_cycles_are_allowed() {
        // Lengths under 14 put ovulation before the start date; still valid input
        let input = CycleInput::parse("2024-01-01", "10").unwrap();
        assert_eq!(input.cycle_length(), 10);
    }

    #[test]
    fn test_format_date_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        assert_eq!(format_date(date), "2024-03-08");
    }
}
