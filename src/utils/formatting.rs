//! Formatting utilities used for CLI outputs.

use crate::models::anomaly::Severity;
use crate::utils::colors::{GREEN, MAGENTA, RED, RESET, YELLOW};
use rust_decimal::Decimal;

/// "1234.5" → "1234.50"
pub fn money(v: Decimal) -> String {
    format!("{:.2}", v)
}

/// Hours with two decimals, never rounded before this point.
pub fn hours(v: Decimal) -> String {
    format!("{:.2}", v)
}

/// Severity label painted by urgency.
pub fn severity_colored(s: Severity) -> String {
    let color = match s {
        Severity::Low => GREEN,
        Severity::Medium => YELLOW,
        Severity::High => RED,
        Severity::Critical => MAGENTA,
    };
    format!("{color}{s}{RESET}")
}

pub fn separator(ch: &str, width: usize) -> String {
    let c = if ch.is_empty() { "-" } else { ch };
    c.repeat(width)
}

/// Remove ANSI colour sequences, for width computations.
pub fn strip_ansi(s: &str) -> String {
    match regex::Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

pub fn visible_len(s: &str) -> usize {
    strip_ansi(s).chars().count()
}
