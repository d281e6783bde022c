//! Display helpers shared by the components.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

pub const NOT_AVAILABLE: &str = "N/A";

/// `1200.0` → `$1,200`, `99.5` → `$99.50`
pub fn money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if frac == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{frac:02}")
    }
}

pub fn date(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%m/%d/%Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

/// `2024-03` for the month containing `day`.
pub fn month_value(day: NaiveDate) -> String {
    format!("{}-{:02}", day.year(), day.month())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthOption {
    /// `YYYY-MM`
    pub value: String,
    /// `March 2024`
    pub label: String,
}

/// `count` consecutive months starting with the one containing `today`.
pub fn month_options(today: NaiveDate, count: u32) -> Vec<MonthOption> {
    let Some(first) = today.with_day(1) else {
        return Vec::new();
    };
    (0..count)
        .filter_map(|i| first.checked_add_months(Months::new(i)))
        .map(|d| MonthOption {
            value: month_value(d),
            label: d.format("%B %Y").to_string(),
        })
        .collect()
}
