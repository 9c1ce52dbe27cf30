use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{TrackerError, TrackerResult};

/// Label used for expenses that carry no tags.
pub const UNCATEGORIZED: &str = "uncategorized";

/// A single spending event inside a monthly table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Expense {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        tags: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> TrackerResult<Self> {
        validate_amount(amount)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            tags,
            created_at,
            updated_at: None,
        })
    }

    /// First tag, treated as the primary category by convention.
    pub fn primary_category(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }

    /// Primary category, or [`UNCATEGORIZED`] when the expense has no tags.
    pub fn category_label(&self) -> &str {
        self.primary_category().unwrap_or(UNCATEGORIZED)
    }

    /// Replaces the amount, rejecting negative values.
    pub fn set_amount(&mut self, amount: f64, at: DateTime<Utc>) -> TrackerResult<()> {
        validate_amount(amount)?;
        self.amount = amount;
        self.updated_at = Some(at);
        Ok(())
    }
}

pub(crate) fn validate_amount(amount: f64) -> TrackerResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(TrackerError::Validation(format!(
            "amount must be a non-negative number, got {amount}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 3, 12, 0, 0).unwrap()
    }

    #[test]
    fn rejects_negative_amounts() {
        let err = Expense::new("Coffee", -1.0, vec![], at()).expect_err("negative amount");
        assert!(format!("{err}").contains("non-negative"));
    }

    #[test]
    fn untagged_expense_is_uncategorized() {
        let expense = Expense::new("Rent", 500.0, vec![], at()).unwrap();
        assert_eq!(expense.primary_category(), None);
        assert_eq!(expense.category_label(), UNCATEGORIZED);
    }

    #[test]
    fn first_tag_is_primary_category() {
        let tags = vec!["Food".to_string(), "Weekend".to_string()];
        let expense = Expense::new("Dinner", 80.0, tags, at()).unwrap();
        assert_eq!(expense.category_label(), "Food");
    }

    #[test]
    fn set_amount_stamps_update_time() {
        let mut expense = Expense::new("Bus", 2.0, vec![], at()).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 1, 4, 8, 0, 0).unwrap();
        expense.set_amount(3.5, later).unwrap();
        assert_eq!(expense.amount, 3.5);
        assert_eq!(expense.updated_at, Some(later));
        assert!(expense.set_amount(f64::NAN, later).is_err());
    }
}
