//! Expense and monthly table models.

pub mod expense;
pub mod monthly_table;

pub use expense::{Expense, UNCATEGORIZED};
pub use monthly_table::{sort_tables_newest_first, MonthlyTable};
