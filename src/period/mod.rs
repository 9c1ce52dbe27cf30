//! Calendar periods and the lookup of monthly tables by period.

pub mod resolver;
pub mod vocabulary;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub use resolver::{resolve_current_period, resolve_previous_period, MatchPolicy, PeriodResolver};
pub use vocabulary::{normalize_locale, MonthVocabulary, DEFAULT_LOCALE};

/// One calendar month. `month` is zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Option<Self> {
        (month < 12).then_some(Self { month, year })
    }

    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            month: date.month0(),
            year: date.year(),
        }
    }

    /// The calendar month before this one, rolling January back a year.
    pub fn previous(self) -> Self {
        if self.month == 0 {
            Self {
                month: 11,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }

    /// Number of days in the month; `0` if the year is outside chrono's range.
    pub fn days_in_month(self) -> u32 {
        let (next_year, next_month) = if self.month == 11 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 2)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first_next| first_next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(0)
    }

    pub fn contains<D: Datelike>(self, date: &D) -> bool {
        date.month0() == self.month && date.year() == self.year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_rolls_back_over_january() {
        let january = Period::new(0, 2026).unwrap();
        assert_eq!(january.previous(), Period::new(11, 2025).unwrap());
        let march = Period::new(2, 2026).unwrap();
        assert_eq!(march.previous(), Period::new(1, 2026).unwrap());
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(Period::new(1, 2024).unwrap().days_in_month(), 29);
        assert_eq!(Period::new(1, 2026).unwrap().days_in_month(), 28);
        assert_eq!(Period::new(11, 2026).unwrap().days_in_month(), 31);
        assert_eq!(Period::new(3, 2026).unwrap().days_in_month(), 30);
    }

    #[test]
    fn rejects_out_of_range_month() {
        assert!(Period::new(12, 2026).is_none());
    }

    #[test]
    fn contains_matches_month_and_year() {
        let period = Period::from_date(&NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert_eq!(period, Period::new(0, 2026).unwrap());
        assert!(period.contains(&NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
        assert!(!period.contains(&NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()));
        assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2026, 1, 1));
    }
}
