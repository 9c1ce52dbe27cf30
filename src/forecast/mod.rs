//! Daily aggregation and month-end projection.

pub mod daily;
pub mod engine;

pub use daily::{bucket_by_day, outside_period_total, DailyTotals};
pub use engine::{
    classify, Confidence, ConfidenceThresholds, ForecastConfig, ForecastEngine, ForecastResult,
    MonthStatus, ProjectionModel,
};
