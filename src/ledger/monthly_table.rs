use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::expense::{validate_amount, Expense};
use crate::errors::{TrackerError, TrackerResult};

/// A named container of expenses scoped to one calendar month.
///
/// The name is free text but is expected to embed a month name and a
/// four-digit year, e.g. `"Enero 2026"`. Nothing enforces one table per
/// month; period lookup is done on the name alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTable {
    pub id: Uuid,
    pub name: String,
    /// Monthly spending limit. `0.0` means no budget has been set.
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MonthlyTable {
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            budget: 0.0,
            expenses: Vec::new(),
            created_at,
            updated_at: None,
        }
    }

    pub fn with_budget(mut self, budget: f64) -> TrackerResult<Self> {
        validate_amount(budget)?;
        self.budget = budget;
        Ok(self)
    }

    pub fn has_budget(&self) -> bool {
        self.budget > 0.0
    }

    pub fn set_budget(&mut self, budget: f64, at: DateTime<Utc>) -> TrackerResult<()> {
        validate_amount(budget)?;
        self.budget = budget;
        self.updated_at = Some(at);
        Ok(())
    }

    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        id
    }

    pub fn remove_expense(&mut self, id: Uuid) -> TrackerResult<Expense> {
        let index = self
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or_else(|| TrackerError::Validation(format!("expense {id} not found")))?;
        Ok(self.expenses.remove(index))
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    /// Checks the budget and every expense amount, e.g. after deserializing.
    pub fn validate(&self) -> TrackerResult<()> {
        validate_amount(self.budget).map_err(|err| {
            TrackerError::Validation(format!("table `{}` budget: {err}", self.name))
        })?;
        for expense in &self.expenses {
            validate_amount(expense.amount).map_err(|err| {
                TrackerError::Validation(format!(
                    "table `{}` expense `{}`: {err}",
                    self.name, expense.name
                ))
            })?;
        }
        Ok(())
    }

    /// Sum of every expense amount in the table, regardless of date.
    pub fn total_spent(&self) -> f64 {
        self.expenses.iter().map(|expense| expense.amount).sum()
    }
}

/// Orders tables by creation time, newest first.
///
/// Period resolution returns the first match in list order, so callers sort
/// with this before resolving to get "most recently created wins".
pub fn sort_tables_newest_first(tables: &mut [MonthlyTable]) {
    tables.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
