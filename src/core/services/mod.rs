pub mod month_status_service;
pub mod summary_service;

pub use month_status_service::{MonthStatusReport, MonthStatusService};
pub use summary_service::{
    BudgetBand, CategoryBudget, CategoryBudgetStatus, CategoryTotal, PeriodComparison,
    SummaryService,
};
