use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::ledger::Expense;
use crate::period::Period;

/// Spending per elapsed day of a month; index 0 is day 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals(Vec<f64>);

impl DailyTotals {
    pub fn new(totals: Vec<f64>) -> Self {
        Self(totals)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn days(&self) -> usize {
        self.0.len()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Days with a strictly positive total.
    pub fn days_with_expenses(&self) -> usize {
        self.0.iter().filter(|total| **total > 0.0).count()
    }

    /// The last `window` days, or every day when fewer have elapsed.
    pub fn recent(&self, window: usize) -> &[f64] {
        &self.0[self.0.len().saturating_sub(window)..]
    }
}

impl From<Vec<f64>> for DailyTotals {
    fn from(totals: Vec<f64>) -> Self {
        Self::new(totals)
    }
}

/// Buckets `expenses` into one total per elapsed day of `period`.
///
/// Expenses dated outside the period, or on a day past `days_elapsed`, are
/// skipped. Dates are taken in UTC.
pub fn bucket_by_day(expenses: &[Expense], period: Period, days_elapsed: u32) -> DailyTotals {
    let mut totals = vec![0.0; days_elapsed as usize];
    for expense in expenses {
        let date = expense.created_at.date_naive();
        if !period.contains(&date) {
            trace!(expense = %expense.id, %date, "expense outside period");
            continue;
        }
        let index = date.day0() as usize;
        match totals.get_mut(index) {
            Some(bucket) => *bucket += expense.amount,
            None => trace!(expense = %expense.id, %date, "expense past elapsed days"),
        }
    }
    DailyTotals(totals)
}

/// Total of the expenses dated outside `period`, e.g. backfilled entries whose
/// timestamp is the import time rather than the spending date.
pub fn outside_period_total(expenses: &[Expense], period: Period) -> f64 {
    expenses
        .iter()
        .filter(|expense| !period.contains(&expense.created_at.date_naive()))
        .map(|expense| expense.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn expense(amount: f64, year: i32, month: u32, day: u32) -> Expense {
        let at = Utc.with_ymd_and_hms(year, month, day, 10, 0, 0).unwrap();
        Expense::new("item", amount, vec![], at).unwrap()
    }

    fn january() -> Period {
        Period::new(0, 2026).unwrap()
    }

    #[test]
    fn sums_expenses_on_the_same_day() {
        let expenses = vec![
            expense(100.0, 2026, 1, 1),
            expense(50.0, 2026, 1, 1),
            expense(25.0, 2026, 1, 3),
        ];
        let totals = bucket_by_day(&expenses, january(), 5);
        assert_eq!(totals.as_slice(), &[150.0, 0.0, 25.0, 0.0, 0.0]);
        assert_eq!(totals.total(), 175.0);
        assert_eq!(totals.days_with_expenses(), 2);
    }

    #[test]
    fn skips_other_months_and_future_days() {
        let expenses = vec![
            expense(10.0, 2025, 12, 31),
            expense(20.0, 2025, 1, 2),
            expense(30.0, 2026, 2, 1),
            expense(40.0, 2026, 1, 20),
            expense(5.0, 2026, 1, 2),
        ];
        let totals = bucket_by_day(&expenses, january(), 10);
        assert_eq!(totals.days(), 10);
        assert_eq!(totals.total(), 5.0);
    }

    #[test]
    fn zero_elapsed_days_yield_no_buckets() {
        let totals = bucket_by_day(&[expense(10.0, 2026, 1, 1)], january(), 0);
        assert_eq!(totals.days(), 0);
        assert_eq!(totals.days_with_expenses(), 0);
    }

    #[test]
    fn zero_amount_days_are_not_active() {
        let totals = bucket_by_day(&[expense(0.0, 2026, 1, 2)], january(), 3);
        assert_eq!(totals.days_with_expenses(), 0);
    }

    #[test]
    fn outside_period_total_ignores_in_month_and_future_days() {
        let expenses = vec![
            expense(10.0, 2025, 12, 31),
            expense(30.0, 2026, 2, 1),
            expense(40.0, 2026, 1, 20),
            expense(5.0, 2026, 1, 2),
        ];
        assert_eq!(outside_period_total(&expenses, january()), 40.0);
    }

    #[test]
    fn recent_window_is_clamped() {
        let totals = DailyTotals::from(vec![1.0, 2.0, 3.0]);
        assert_eq!(totals.recent(2), &[2.0, 3.0]);
        assert_eq!(totals.recent(7), &[1.0, 2.0, 3.0]);
    }
}
