//! Plain-text rendering of a [`MonthStatusReport`] for the terminal.

use std::fmt::Write;

use colored::{Color, Colorize};

use crate::core::services::MonthStatusReport;
use crate::forecast::MonthStatus;

fn status_color(status: MonthStatus) -> Color {
    match status {
        MonthStatus::OnTrack => Color::Green,
        MonthStatus::AtRisk => Color::Yellow,
        MonthStatus::Exceeded => Color::Red,
    }
}

/// Formats an amount with two decimals and the currency code.
pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

pub fn render_report(report: &MonthStatusReport, currency: &str) -> String {
    let mut out = String::new();
    let forecast = &report.forecast;
    let title = report.table_name.as_deref().unwrap_or("(no table for this month)");
    let _ = writeln!(out, "{} {}", "Month status:".bold(), title);

    let Some(status) = forecast.status() else {
        let _ = writeln!(
            out,
            "{}",
            "No budget set for this month. Set one to track your progress.".yellow()
        );
        let _ = writeln!(out, "Spent: {}", format_amount(forecast.total_spent, currency));
        return out;
    };

    let label = status.to_string().to_uppercase();
    let _ = writeln!(out, "Status: {}", label.color(status_color(status)).bold());
    let _ = writeln!(
        out,
        "Progress: {:.0}% of {}",
        forecast.display_percentage(),
        format_amount(forecast.total_budget, currency)
    );
    let _ = writeln!(out, "Spent: {}", format_amount(forecast.total_spent, currency));
    if forecast.remaining < 0.0 {
        let _ = writeln!(
            out,
            "Remaining: {} (over)",
            format_amount(forecast.remaining.abs(), currency).red()
        );
    } else {
        let _ = writeln!(
            out,
            "Remaining: {}",
            format_amount(forecast.remaining, currency).green()
        );
    }
    let _ = writeln!(
        out,
        "End of month forecast: {} ({} confidence, {} spending days)",
        format_amount(forecast.projected_total, currency),
        forecast.projection_confidence,
        forecast.days_with_expenses
    );
    if forecast.projected_gap > 0.0 {
        let _ = writeln!(
            out,
            "At this pace you may exceed your budget by {}.",
            format_amount(forecast.projected_gap, currency)
        );
    } else {
        let _ = writeln!(
            out,
            "At this pace you may finish with {} remaining.",
            format_amount(forecast.projected_gap.abs(), currency)
        );
    }

    if let Some(comparison) = &report.comparison {
        let change = comparison
            .percent_change
            .map(|pct| format!(" ({pct:+.1}%)"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "Versus {}: {}{}",
            comparison.previous_table_name,
            format_amount(comparison.delta, currency),
            change
        );
    }

    if !report.top_categories.is_empty() {
        let _ = writeln!(out, "{}", "Top categories:".bold());
        for row in &report.top_categories {
            let _ = writeln!(
                out,
                "  {:<16} {:>14} {:>5.1}%",
                row.category,
                format_amount(row.amount, currency),
                row.share
            );
        }
    }
    out
}
