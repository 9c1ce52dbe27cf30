//! Runs period resolution, daily aggregation and projection for "now".

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::summary_service::{CategoryTotal, PeriodComparison, SummaryService};
use crate::config::Config;
use crate::errors::TrackerResult;
use crate::forecast::{
    bucket_by_day, outside_period_total, DailyTotals, ForecastEngine, ForecastResult,
};
use crate::ledger::{sort_tables_newest_first, MonthlyTable};
use crate::period::{MonthVocabulary, Period, PeriodResolver};
use crate::storage::TableSource;
use crate::time::Clock;

/// Categories shown alongside the month status.
const TOP_CATEGORIES: usize = 8;

/// Everything presentation needs for the current month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStatusReport {
    pub reference_date: NaiveDate,
    pub period: Period,
    /// `None` when no table matches the current month.
    pub table_id: Option<Uuid>,
    pub table_name: Option<String>,
    pub forecast: ForecastResult,
    pub daily_totals: DailyTotals,
    pub top_categories: Vec<CategoryTotal>,
    pub comparison: Option<PeriodComparison>,
}

impl MonthStatusReport {
    /// `true` when the caller should prompt the user to set a budget.
    pub fn needs_budget(&self) -> bool {
        !self.forecast.has_budget()
    }
}

pub struct MonthStatusService;

impl MonthStatusService {
    /// Evaluates the month containing `today`. `tables` are expected newest-first.
    pub fn evaluate(
        tables: &[MonthlyTable],
        today: NaiveDate,
        config: &Config,
        vocabulary: &MonthVocabulary,
    ) -> MonthStatusReport {
        let resolver = PeriodResolver::new(vocabulary, config.match_policy);
        let engine = ForecastEngine::new(config.forecast);
        let period = Period::from_date(&today);
        let days_elapsed = today.day();
        let days_in_month = period.days_in_month();

        let table = resolver.resolve_current(tables, today, &config.locale);
        let daily_totals = match table {
            Some(table) => bucket_by_day(&table.expenses, period, days_elapsed),
            None => DailyTotals::new(vec![0.0; days_elapsed as usize]),
        };
        let budget = table.map_or(0.0, |table| table.budget);

        let undated = table.map_or(0.0, |table| outside_period_total(&table.expenses, period));

        // Spending dated outside the period has no day to land on, so it is added
        // to the bucket sum and the month is projected flat from the combined total.
        let forecast = match table {
            Some(table) if undated > 0.0 => {
                warn!(
                    table = %table.name,
                    undated,
                    "expenses dated outside the month, using flat projection"
                );
                engine.project_from_total(
                    budget,
                    daily_totals.total() + undated,
                    days_elapsed,
                    days_in_month,
                )
            }
            _ => engine.project(budget, &daily_totals, days_elapsed, days_in_month),
        };

        info!(
            %today,
            table = table.map(|table| table.name.as_str()),
            status = ?forecast.status(),
            confidence = %forecast.projection_confidence,
            "evaluated month status"
        );

        MonthStatusReport {
            reference_date: today,
            period,
            table_id: table.map(|table| table.id),
            table_name: table.map(|table| table.name.clone()),
            top_categories: table
                .map(|table| SummaryService::category_breakdown(&table.expenses, Some(TOP_CATEGORIES)))
                .unwrap_or_default(),
            comparison: table
                .and_then(|table| SummaryService::compare_with_previous(&resolver, tables, table)),
            forecast,
            daily_totals,
        }
    }

    pub fn evaluate_now(
        tables: &[MonthlyTable],
        clock: &dyn Clock,
        config: &Config,
        vocabulary: &MonthVocabulary,
    ) -> MonthStatusReport {
        Self::evaluate(tables, clock.today(), config, vocabulary)
    }

    /// Fetches the user's tables, orders them newest-first and evaluates "now".
    pub fn evaluate_for_user(
        source: &dyn TableSource,
        user_id: &str,
        clock: &dyn Clock,
        config: &Config,
        vocabulary: &MonthVocabulary,
    ) -> TrackerResult<MonthStatusReport> {
        let mut tables = source.list_tables_for_user(user_id)?;
        sort_tables_newest_first(&mut tables);
        Ok(Self::evaluate_now(&tables, clock, config, vocabulary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{Confidence, MonthStatus, ProjectionModel};
    use crate::ledger::Expense;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn table(name: &str, budget: f64, expenses: &[(f64, DateTime<Utc>)]) -> MonthlyTable {
        let mut table = MonthlyTable::new(name, at(2026, 1, 1)).with_budget(budget).unwrap();
        for (amount, when) in expenses {
            table.add_expense(Expense::new("item", *amount, vec![], *when).unwrap());
        }
        table
    }

    fn evaluate(tables: &[MonthlyTable], today: NaiveDate) -> MonthStatusReport {
        MonthStatusService::evaluate(tables, today, &Config::default(), MonthVocabulary::shared())
    }

    #[test]
    fn evaluates_matching_table() {
        let expenses: Vec<_> = [(1000.0, 1), (500.0, 3), (2000.0, 6), (3000.0, 10)]
            .iter()
            .map(|(amount, day)| (*amount, at(2026, 1, *day)))
            .collect();
        let tables = vec![table("Enero 2026", 20000.0, &expenses)];
        let report = evaluate(&tables, NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());

        assert_eq!(report.table_name.as_deref(), Some("Enero 2026"));
        assert_eq!(report.forecast.total_spent, 6500.0);
        assert_eq!(report.forecast.days_in_month, 31);
        assert_eq!(report.forecast.days_elapsed, 10);
        assert_eq!(report.forecast.projection_confidence, Confidence::Medium);
        assert_eq!(report.daily_totals.days(), 10);
        assert!(!report.needs_budget());
    }

    #[test]
    fn missing_table_yields_neutral_report() {
        let tables = vec![table("Febrero 2026", 1000.0, &[])];
        let report = evaluate(&tables, NaiveDate::from_ymd_opt(2026, 1, 20).unwrap());
        assert!(report.table_id.is_none());
        assert!(report.needs_budget());
        assert_eq!(report.forecast.status(), None);
        assert_eq!(report.forecast.projected_total, 0.0);
        assert!(report.top_categories.is_empty());
        assert!(report.comparison.is_none());
    }

    #[test]
    fn undated_spending_falls_back_to_flat_projection() {
        let tables = vec![table("Enero 2026", 100.0, &[(300.0, at(2025, 6, 1))])];
        let report = evaluate(&tables, NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
        assert_eq!(report.forecast.model, ProjectionModel::Flat);
        assert_eq!(report.forecast.total_spent, 300.0);
        assert_eq!(report.forecast.status(), Some(MonthStatus::Exceeded));
    }

    #[test]
    fn adding_spending_never_lowers_reported_spend() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let mut tables = vec![table("Enero 2026", 1000.0, &[(5000.0, at(2025, 12, 20))])];
        let before = evaluate(&tables, today);
        assert_eq!(before.forecast.total_spent, 5000.0);
        assert_eq!(before.forecast.status(), Some(MonthStatus::Exceeded));

        tables[0].add_expense(Expense::new("Coffee", 10.0, vec![], at(2026, 1, 5)).unwrap());
        let after = evaluate(&tables, today);
        assert_eq!(after.forecast.model, ProjectionModel::Flat);
        assert_eq!(after.forecast.total_spent, 5010.0);
        assert_eq!(after.forecast.status(), Some(MonthStatus::Exceeded));
    }

    #[test]
    fn in_month_spending_uses_blended_projection() {
        let tables = vec![table(
            "Enero 2026",
            1000.0,
            &[(100.0, at(2026, 1, 2)), (50.0, at(2026, 1, 25))],
        )];
        let report = evaluate(&tables, NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
        assert_eq!(report.forecast.model, ProjectionModel::Blended);
        assert_eq!(report.forecast.total_spent, 100.0);
    }

    #[test]
    fn includes_previous_month_comparison() {
        let tables = vec![
            table("Febrero 2026", 0.0, &[(400.0, at(2026, 2, 2))]),
            table("Enero 2026", 0.0, &[(200.0, at(2026, 1, 2))]),
        ];
        let report = evaluate(&tables, NaiveDate::from_ymd_opt(2026, 2, 5).unwrap());
        let comparison = report.comparison.expect("january comparison");
        assert_eq!(comparison.previous_table_name, "Enero 2026");
        assert_eq!(comparison.percent_change, Some(100.0));
    }
}
