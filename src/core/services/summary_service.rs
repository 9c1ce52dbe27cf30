//! Category and period-over-period reports built from the same table data as
//! the month forecast.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::{Expense, MonthlyTable};
use crate::period::PeriodResolver;

const WARNING_PERCENT: f64 = 70.0;
const DANGER_PERCENT: f64 = 90.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
    /// Share of the total spending, in percent.
    pub share: f64,
}

/// A spending limit for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetBand {
    Safe,
    Warning,
    Danger,
}

impl fmt::Display for BudgetBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetBand::Safe => "Safe",
            BudgetBand::Warning => "Warning",
            BudgetBand::Danger => "Danger",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudgetStatus {
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    pub percentage: f64,
    pub band: BudgetBand,
    pub remaining: f64,
    pub is_exceeded: bool,
}

impl CategoryBudgetStatus {
    pub fn display_percentage(&self) -> f64 {
        self.percentage.min(100.0)
    }
}

/// Spending of one table against the table for the month before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub previous_table_id: Uuid,
    pub previous_table_name: String,
    pub previous_spent: f64,
    pub current_spent: f64,
    pub delta: f64,
    /// `None` when nothing was spent in the previous month.
    pub percent_change: Option<f64>,
}

pub struct SummaryService;

impl SummaryService {
    /// Totals per primary category, largest first, optionally truncated.
    pub fn category_breakdown(expenses: &[Expense], limit: Option<usize>) -> Vec<CategoryTotal> {
        let by_category = Self::spending_by_category(expenses);
        let total: f64 = by_category.values().sum();
        let mut rows: Vec<CategoryTotal> = by_category
            .into_iter()
            .map(|(category, amount)| CategoryTotal {
                category,
                amount,
                share: if total > 0.0 {
                    amount / total * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        rows.sort_by(|a, b| {
            b.amount
                .total_cmp(&a.amount)
                .then_with(|| a.category.cmp(&b.category))
        });
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        rows
    }

    pub fn budget_status(category: &str, spent: f64, limit: f64) -> CategoryBudgetStatus {
        let percentage = if limit > 0.0 {
            spent / limit * 100.0
        } else {
            0.0
        };
        let band = if percentage >= DANGER_PERCENT {
            BudgetBand::Danger
        } else if percentage >= WARNING_PERCENT {
            BudgetBand::Warning
        } else {
            BudgetBand::Safe
        };
        let remaining = limit - spent;
        CategoryBudgetStatus {
            category: category.to_string(),
            spent,
            limit,
            percentage,
            band,
            remaining,
            is_exceeded: remaining < 0.0,
        }
    }

    /// Status of every category budget against `expenses`.
    pub fn category_budget_statuses(
        expenses: &[Expense],
        budgets: &[CategoryBudget],
    ) -> Vec<CategoryBudgetStatus> {
        let spending = Self::spending_by_category(expenses);
        budgets
            .iter()
            .map(|budget| {
                let spent = spending.get(&budget.category).copied().unwrap_or(0.0);
                Self::budget_status(&budget.category, spent, budget.amount)
            })
            .collect()
    }

    pub fn compare_with_previous(
        resolver: &PeriodResolver<'_>,
        tables: &[MonthlyTable],
        current: &MonthlyTable,
    ) -> Option<PeriodComparison> {
        let previous = resolver.resolve_previous(tables, &current.name)?;
        let previous_spent = previous.total_spent();
        let current_spent = current.total_spent();
        let delta = current_spent - previous_spent;
        Some(PeriodComparison {
            previous_table_id: previous.id,
            previous_table_name: previous.name.clone(),
            previous_spent,
            current_spent,
            delta,
            percent_change: (previous_spent > 0.0).then(|| delta / previous_spent * 100.0),
        })
    }

    fn spending_by_category(expenses: &[Expense]) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for expense in expenses {
            *totals
                .entry(expense.category_label().to_string())
                .or_insert(0.0) += expense.amount;
        }
        totals
    }
}
