//! Format - Display Formatting

use std::fmt;

use chrono::{DateTime, Local, Utc};

/// Relative age of a snapshot, before it is put into words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Age {
    JustNow,
    Minutes(i64),
    Hours(i64),
    /// Local capture date once a day has passed
    Date(String),
}

pub fn age_of(captured_at: DateTime<Utc>, now: DateTime<Utc>) -> Age {
    let minutes = (now - captured_at).num_minutes().max(0);
    if minutes < 1 {
        return Age::JustNow;
    }
    if minutes < 60 {
        return Age::Minutes(minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return Age::Hours(hours);
    }
    Age::Date(captured_at.with_timezone(&Local).format("%Y-%m-%d").to_string())
}

/// "just now", "12m ago", "3h ago", or the local capture date
impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Age::JustNow => f.write_str("just now"),
            Age::Minutes(n) => write!(f, "{n}m ago"),
            Age::Hours(n) => write!(f, "{n}h ago"),
            Age::Date(date) => f.write_str(date),
        }
    }
}

/// Thousands separators: 12500 -> "12,500"
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Trim trailing zeros of a metric: 91.0 -> "91", 6.80 -> "6.8"
pub fn format_metric(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
