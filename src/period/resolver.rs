//! Finds the monthly table for a calendar period.
//!
//! Two matchers live here and are intentionally separate:
//!
//! * [`PeriodResolver::resolve_current`] accepts a table when its name merely
//!   *contains* the month name and the year, anywhere and in any case.
//! * [`PeriodResolver::resolve_previous`] parses names strictly: the first word
//!   must be a month name and the last word the year.
//!
//! Both return the first matching table in the order given. Callers sort
//! tables newest-first, so duplicates for one period resolve to the most
//! recently created table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{vocabulary::MonthVocabulary, Period};
use crate::ledger::MonthlyTable;

/// Which month-name vocabularies count when matching the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Any registered language matches, whatever the active locale.
    #[default]
    AnyLanguage,
    /// Only the active locale's month name matches.
    ActiveLocale,
}

#[derive(Debug, Clone, Copy)]
pub struct PeriodResolver<'v> {
    vocabulary: &'v MonthVocabulary,
    policy: MatchPolicy,
}

impl<'v> PeriodResolver<'v> {
    pub fn new(vocabulary: &'v MonthVocabulary, policy: MatchPolicy) -> Self {
        Self { vocabulary, policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Returns the table whose name mentions the month and year of `reference`.
    pub fn resolve_current<'t>(
        &self,
        tables: &'t [MonthlyTable],
        reference: NaiveDate,
        locale: &str,
    ) -> Option<&'t MonthlyTable> {
        let period = Period::from_date(&reference);
        let year = period.year.to_string();
        let month_names: Vec<&str> = match self.policy {
            MatchPolicy::AnyLanguage => self.vocabulary.month_names(period.month).collect(),
            MatchPolicy::ActiveLocale => self
                .vocabulary
                .month_name(locale, period.month)
                .into_iter()
                .collect(),
        };

        let found = tables.iter().find(|table| {
            let name = table.name.to_lowercase();
            name.contains(&year) && month_names.iter().any(|month| name.contains(month))
        });
        debug!(
            ?period,
            policy = ?self.policy,
            locale,
            matched = found.map(|table| table.name.as_str()),
            "resolved current period"
        );
        found
    }

    /// Returns the table for the calendar month before `current_table_name`.
    ///
    /// `None` when the name does not parse or no table carries that period.
    pub fn resolve_previous<'t>(
        &self,
        tables: &'t [MonthlyTable],
        current_table_name: &str,
    ) -> Option<&'t MonthlyTable> {
        let Some(current) = self.parse_table_period(current_table_name) else {
            debug!(name = current_table_name, "table name carries no period");
            return None;
        };
        let previous = current.previous();
        tables
            .iter()
            .find(|table| self.parse_table_period(&table.name) == Some(previous))
    }

    /// Parses `"<month> ... <year>"`, month first and year last.
    pub fn parse_table_period(&self, name: &str) -> Option<Period> {
        let normalized = name.trim().to_lowercase();
        let parts: Vec<&str> = normalized.split_whitespace().collect();
        if parts.len() < 2 {
            return None;
        }
        let month = self.vocabulary.month_index(parts[0])?;
        let year = leading_year(parts[parts.len() - 1])?;
        Period::new(month, year)
    }
}

/// Leading ASCII digits of `token` as a year; `"2026,"` reads as 2026 while
/// signed or non-numeric tokens are rejected.
fn leading_year(token: &str) -> Option<i32> {
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    token[..end].parse().ok()
}

/// [`PeriodResolver::resolve_current`] with the built-in vocabulary and the
/// permissive any-language policy.
pub fn resolve_current_period<'t>(
    tables: &'t [MonthlyTable],
    reference: NaiveDate,
    locale: &str,
) -> Option<&'t MonthlyTable> {
    PeriodResolver::new(MonthVocabulary::shared(), MatchPolicy::AnyLanguage)
        .resolve_current(tables, reference, locale)
}

/// [`PeriodResolver::resolve_previous`] with the built-in vocabulary.
pub fn resolve_previous_period<'t>(
    tables: &'t [MonthlyTable],
    current_table_name: &str,
) -> Option<&'t MonthlyTable> {
    PeriodResolver::new(MonthVocabulary::shared(), MatchPolicy::AnyLanguage)
        .resolve_previous(tables, current_table_name)
}
