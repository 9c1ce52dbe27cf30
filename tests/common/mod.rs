#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use month_status::ledger::{Expense, MonthlyTable};

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Builds a table created on `created` holding one untagged expense per `(amount, day)`.
pub fn table_with_spending(
    name: &str,
    budget: f64,
    created: DateTime<Utc>,
    year: i32,
    month: u32,
    spending: &[(f64, u32)],
) -> MonthlyTable {
    let mut table = MonthlyTable::new(name, created)
        .with_budget(budget)
        .expect("non-negative budget");
    for (amount, day) in spending {
        let expense =
            Expense::new("expense", *amount, vec![], at(year, month, *day)).expect("valid expense");
        table.add_expense(expense);
    }
    table
}
