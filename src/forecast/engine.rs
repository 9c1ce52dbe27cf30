//! Month-end projection and budget status classification.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::daily::DailyTotals;

/// Reliability label for a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        };
        f.write_str(label)
    }
}

/// Budget status for the month. Only defined when a budget is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthStatus {
    OnTrack,
    AtRisk,
    Exceeded,
}

impl fmt::Display for MonthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MonthStatus::OnTrack => "On Track",
            MonthStatus::AtRisk => "At Risk",
            MonthStatus::Exceeded => "Exceeded",
        };
        f.write_str(label)
    }
}

/// How the daily run-rate behind a projection was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionModel {
    /// Whole-month average blended with the recent-window average.
    #[default]
    Blended,
    /// Whole-month average only, used when no per-day history exists.
    Flat,
}

/// Elapsed-day and active-day cut-offs for the confidence tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceThresholds {
    /// Fewer elapsed days than this is `Low`.
    pub low_days: u32,
    /// Fewer days with spending than this is `Low`.
    pub low_active_days: usize,
    pub medium_days: u32,
    pub medium_active_days: usize,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            low_days: 5,
            low_active_days: 3,
            medium_days: 12,
            medium_active_days: 6,
        }
    }
}

impl ConfidenceThresholds {
    pub fn tier(&self, days_elapsed: u32, days_with_expenses: usize) -> Confidence {
        if days_elapsed < self.low_days || days_with_expenses < self.low_active_days {
            Confidence::Low
        } else if days_elapsed < self.medium_days || days_with_expenses < self.medium_active_days
        {
            Confidence::Medium
        } else {
            Confidence::High
        }
    }
}

/// Numeric policy of the run-rate blend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Length of the recent window; up to this many elapsed days the plain
    /// whole-month average is used.
    pub recent_window_days: u32,
    pub baseline_weight: f64,
    pub recent_weight: f64,
    pub confidence: ConfidenceThresholds,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            recent_window_days: 7,
            baseline_weight: 0.65,
            recent_weight: 0.35,
            confidence: ConfidenceThresholds::default(),
        }
    }
}

/// Month-end forecast for one table. Recomputed on every read.
///
/// Budget-relative fields are computed against `0.0` when no budget is set;
/// check [`ForecastResult::has_budget`] before trusting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub total_budget: f64,
    pub total_spent: f64,
    pub remaining: f64,
    pub percentage_used: f64,
    pub projected_total: f64,
    /// Spending still expected before month end.
    pub projection_delta: f64,
    /// Projected overage when positive, margin when negative, `0.0` without a budget.
    pub projected_gap: f64,
    pub projection_confidence: Confidence,
    pub is_exceeded: bool,
    pub is_risk: bool,
    pub is_on_track: bool,
    pub days_elapsed: u32,
    pub days_in_month: u32,
    pub days_with_expenses: usize,
    #[serde(default)]
    pub model: ProjectionModel,
}

impl ForecastResult {
    pub fn has_budget(&self) -> bool {
        self.total_budget > 0.0
    }

    pub fn status(&self) -> Option<MonthStatus> {
        if self.is_exceeded {
            Some(MonthStatus::Exceeded)
        } else if self.is_risk {
            Some(MonthStatus::AtRisk)
        } else if self.is_on_track {
            Some(MonthStatus::OnTrack)
        } else {
            None
        }
    }

    /// Usage percentage clamped to 100 for progress displays.
    pub fn display_percentage(&self) -> f64 {
        self.percentage_used.min(100.0)
    }
}

/// Exceeded beats at-risk: overspend already incurred is reported even when
/// the projection alone would not cross the budget.
pub fn classify(total_spent: f64, projected_total: f64, total_budget: f64) -> Option<MonthStatus> {
    if total_budget <= 0.0 {
        None
    } else if total_spent > total_budget {
        Some(MonthStatus::Exceeded)
    } else if projected_total > total_budget {
        Some(MonthStatus::AtRisk)
    } else {
        Some(MonthStatus::OnTrack)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Whole-month run-rate; elapsed days floored at one.
    pub fn daily_average(&self, total_spent: f64, days_elapsed: u32) -> f64 {
        total_spent / days_elapsed.max(1) as f64
    }

    /// Average over the last `min(recent_window_days, days_elapsed)` days.
    pub fn recent_average(&self, daily: &DailyTotals, days_elapsed: u32) -> f64 {
        let window = self.config.recent_window_days.min(days_elapsed) as usize;
        let recent: f64 = daily.recent(window).iter().sum();
        recent / window.max(1) as f64
    }

    pub fn blended_daily_average(&self, daily: &DailyTotals, days_elapsed: u32) -> f64 {
        let daily_avg = self.daily_average(daily.total(), days_elapsed);
        if days_elapsed <= self.config.recent_window_days {
            return daily_avg;
        }
        let recent_avg = self.recent_average(daily, days_elapsed);
        daily_avg * self.config.baseline_weight + recent_avg * self.config.recent_weight
    }

    pub fn confidence(&self, days_elapsed: u32, days_with_expenses: usize) -> Confidence {
        self.config.confidence.tier(days_elapsed, days_with_expenses)
    }

    /// Projects the month from per-day totals.
    pub fn project(
        &self,
        total_budget: f64,
        daily: &DailyTotals,
        days_elapsed: u32,
        days_in_month: u32,
    ) -> ForecastResult {
        let total_spent = daily.total();
        let days_with_expenses = daily.days_with_expenses();
        let blended = self.blended_daily_average(daily, days_elapsed);
        let confidence = self.confidence(days_elapsed, days_with_expenses);
        debug!(
            total_spent,
            blended, days_elapsed, days_in_month, days_with_expenses, %confidence,
            "projected month from daily totals"
        );
        build_result(
            total_budget,
            total_spent,
            blended * days_in_month as f64,
            confidence,
            (days_elapsed, days_in_month, days_with_expenses),
            ProjectionModel::Blended,
        )
    }

    /// Degraded projection from a spent total alone, without per-day history.
    ///
    /// Uses the flat whole-month average and always reports `Low` confidence.
    pub fn project_from_total(
        &self,
        total_budget: f64,
        total_spent: f64,
        days_elapsed: u32,
        days_in_month: u32,
    ) -> ForecastResult {
        let daily_avg = self.daily_average(total_spent, days_elapsed);
        debug!(total_spent, daily_avg, days_elapsed, "flat projection");
        build_result(
            total_budget,
            total_spent,
            daily_avg * days_in_month as f64,
            Confidence::Low,
            (days_elapsed, days_in_month, 0),
            ProjectionModel::Flat,
        )
    }
}

fn build_result(
    total_budget: f64,
    total_spent: f64,
    projected_total: f64,
    confidence: Confidence,
    (days_elapsed, days_in_month, days_with_expenses): (u32, u32, usize),
    model: ProjectionModel,
) -> ForecastResult {
    let has_budget = total_budget > 0.0;
    let status = classify(total_spent, projected_total, total_budget);
    ForecastResult {
        total_budget,
        total_spent,
        remaining: total_budget - total_spent,
        percentage_used: if has_budget {
            total_spent / total_budget * 100.0
        } else {
            0.0
        },
        projected_total,
        projection_delta: projected_total - total_spent,
        projected_gap: if has_budget {
            projected_total - total_budget
        } else {
            0.0
        },
        projection_confidence: confidence,
        is_exceeded: status == Some(MonthStatus::Exceeded),
        is_risk: status == Some(MonthStatus::AtRisk),
        is_on_track: status == Some(MonthStatus::OnTrack),
        days_elapsed,
        days_in_month,
        days_with_expenses,
        model,
    }
}
