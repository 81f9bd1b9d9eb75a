//! Landmark calculator for cycle dates.
//!
//! Given a validated [`CycleInput`], derives:
//! - Ovulation date (fixed 14-day luteal phase before the next period)
//! - Three successive fertile windows
//! - Next period, pregnancy test and estimated due dates

use crate::CycleInput;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days between ovulation and the next period, independent of cycle length
pub const LUTEAL_PHASE_DAYS: i64 = 14;

/// Fertile window opens this many days before ovulation
pub const FERTILE_LEAD_DAYS: i64 = 5;

/// Fertile window end minus start (7 days inclusive)
pub const FERTILE_SPAN_DAYS: i64 = 6;

/// Later windows assume 28-day cycles regardless of the input length
pub const WINDOW_SHIFT_DAYS: i64 = 28;

pub const FERTILE_WINDOW_COUNT: usize = 3;

/// Test is recommended one week after the missed period
pub const PREGNANCY_TEST_DELAY_DAYS: i64 = 7;

/// 40 weeks from ovulation
pub const GESTATION_DAYS: i64 = 280;

/// A span of elevated fertility, both ends inclusive
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FertileWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FertileWindow {
    /// Window opening on `start`
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start,
            end: start + Duration::days(FERTILE_SPAN_DAYS),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, inclusive
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Every date derived from one cycle input
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LandmarkResult {
    pub ovulation_date: NaiveDate,
    /// Chronological, always [`FERTILE_WINDOW_COUNT`] entries
    pub fertile_windows: Vec<FertileWindow>,
    pub next_period_date: NaiveDate,
    pub pregnancy_test_date: NaiveDate,
    pub due_date: NaiveDate,
}

impl LandmarkResult {
    /// The window around the predicted ovulation of the current cycle
    pub fn first_fertile_window(&self) -> Option<&FertileWindow> {
        self.fertile_windows.first()
    }
}

/// Compute all landmark dates for a cycle
///
/// ## Rules
///
/// 1. **Ovulation**: `start + (cycle_length - 14)` days. Short cycles
///    (< 14 days) put it before the start date.
/// 2. **Fertile windows**: first opens 5 days before ovulation; each later
///    window is shifted a further 28 days.
/// 3. **Next period**: `start + cycle_length` days.
/// 4. **Pregnancy test**: next period + 7 days.
/// 5. **Due date**: ovulation + 280 days.
pub fn compute(input: &CycleInput) -> LandmarkResult {
    let start = input.start_date();
    let cycle_length = i64::from(input.cycle_length());

    let ovulation_date = start + Duration::days(cycle_length - LUTEAL_PHASE_DAYS);

    let first_open = ovulation_date - Duration::days(FERTILE_LEAD_DAYS);
    let fertile_windows = (0..FERTILE_WINDOW_COUNT as i64)
        .map(|i| FertileWindow::starting(first_open + Duration::days(WINDOW_SHIFT_DAYS * i)))
        .collect();

    let next_period_date = start + Duration::days(cycle_length);
    let pregnancy_test_date = next_period_date + Duration::days(PREGNANCY_TEST_DELAY_DAYS);
    let due_date = ovulation_date + Duration::days(GESTATION_DAYS);

    tracing::debug!(
        "Computed landmarks for {} (+{} days): ovulation {}, next period {}",
        start,
        cycle_length,
        ovulation_date,
        next_period_date
    );

    LandmarkResult {
        ovulation_date,
        fertile_windows,
        next_period_date,
        pregnancy_test_date,
        due_date,
    }
}
