//! Text presentation of calculation results
//!
//! Builds the label/value breakdowns shown by the CLI and returned by the web
//! handler. Nothing here computes returns; figures come from the result structs.

use crate::calculator::{MmfResult, SaccoResult};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

const PANEL_WIDTH: usize = 60;

/// Display settings shared by every surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Label printed in front of every amount
    pub currency: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { currency: "KES".to_string() }
    }
}

impl ReportConfig {
    pub fn with_currency(currency: impl Into<String>) -> Self {
        Self { currency: currency.into() }
    }

    /// `KES 1,234.56`
    pub fn money(&self, value: f64) -> String {
        format!("{} {}", self.currency, format_amount(value))
    }
}

/// One line of a breakdown table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub item: String,
    pub value: String,
}

impl BreakdownRow {
    fn new(item: &str, value: String) -> Self {
        Self { item: item.to_string(), value }
    }
}

/// Two decimals with comma thousands grouping: `1234567.891` -> `1,234,567.89`
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

fn percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

pub fn sacco_breakdown(result: &SaccoResult, config: &ReportConfig) -> Vec<BreakdownRow> {
    vec![
        BreakdownRow::new("Initial Principal", config.money(result.principal)),
        BreakdownRow::new("Monthly Contribution × 12", config.money(result.annual_contributions())),
        BreakdownRow::new("Total Contributions", config.money(result.total_contributions)),
        BreakdownRow::new("Interest Rate", percent(result.annual_rate_percent, 2)),
        BreakdownRow::new("Interest Earned", config.money(result.interest_earned)),
        BreakdownRow::new("Final Amount", config.money(result.final_amount)),
    ]
}

pub fn mmf_breakdown(result: &MmfResult, config: &ReportConfig) -> Vec<BreakdownRow> {
    let return_pct = result
        .return_percent()
        .map(|r| percent(r, 3))
        .unwrap_or_else(|| "n/a".to_string());

    vec![
        BreakdownRow::new("Investment Amount", config.money(result.principal)),
        BreakdownRow::new("Days Invested", format!("{} days", result.days_invested)),
        BreakdownRow::new("Annual Rate", percent(result.annual_rate_percent, 2)),
        BreakdownRow::new("Daily Rate", percent(result.daily_rate_percent, 4)),
        BreakdownRow::new("Interest Earned", config.money(result.interest_earned)),
        BreakdownRow::new("Final Value", config.money(result.final_amount)),
        BreakdownRow::new("Return %", return_pct),
    ]
}

/// Render a titled panel with labels left-aligned and values right-aligned
pub fn render_table(title: &str, rows: &[BreakdownRow]) -> String {
    let rule = "-".repeat(PANEL_WIDTH);
    let mut out = format!("{}\n{}\n{}\n", rule, title, rule);
    for row in rows {
        let label_width = PANEL_WIDTH.saturating_sub(row.value.chars().count()).max(row.item.chars().count() + 1);
        out.push_str(&format!("{:<width$}{}\n", row.item, row.value, width = label_width));
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

/// Calendar date on which a holding of `days` starting on `start` matures
pub fn maturity_date(start: NaiveDate, days: i32) -> Option<NaiveDate> {
    let days = u64::try_from(days).ok()?;
    start.checked_add_days(Days::new(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{compute_mmf, compute_sacco};

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(118_800.0), "118,800.00");
        assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
        assert_eq!(format_amount(-2_500.5), "-2,500.50");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn test_sacco_breakdown() {
        let rows = sacco_breakdown(&compute_sacco(50_000.0, 5_000.0, 8.0), &ReportConfig::default());
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[1].value, "KES 60,000.00");
        assert_eq!(rows[3].value, "8.00%");
        assert_eq!(rows[5], BreakdownRow::new("Final Amount", "KES 118,800.00".to_string()));
    }

    #[test]
    fn test_mmf_breakdown() {
        let config = ReportConfig::with_currency("USD");
        let rows = mmf_breakdown(&compute_mmf(100_000.0, 90, 6.0), &config);
        assert_eq!(rows[1].value, "90 days");
        assert_eq!(rows[3].value, "0.0164%");
        assert_eq!(rows[5].value, "USD 101,490.33");
        assert_eq!(rows[6].value, "1.490%");
    }

    #[test]
    fn test_mmf_breakdown_zero_principal() {
        let rows = mmf_breakdown(&compute_mmf(0.0, 30, 6.0), &ReportConfig::default());
        assert_eq!(rows[6].value, "n/a");
    }

    #[test]
    fn test_render_table_alignment() {
        let rows = vec![BreakdownRow::new("Interest Earned", "KES 8,800.00".to_string())];
        let table = render_table("SACCO RESULTS", &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "SACCO RESULTS");
        assert_eq!(lines[3].chars().count(), PANEL_WIDTH);
        assert!(lines[3].starts_with("Interest Earned "));
        assert!(lines[3].ends_with("KES 8,800.00"));
    }

    #[test]
    fn test_maturity_date() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(maturity_date(start, 90), NaiveDate::from_ymd_opt(2024, 3, 31));
        assert_eq!(maturity_date(start, 0), Some(start));
        assert_eq!(maturity_date(start, -1), None);
    }
}
