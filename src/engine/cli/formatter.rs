//! CLI Output Formatting Module
//! Colorized text output for the themereg CLI

use chrono::{TimeZone, Utc};
use colored::Colorize;

use crate::engine::options::OptionValue;

pub struct CliFormatter;

impl CliFormatter {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green().bold(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue().bold(), message);
    }

    /// Print a section header
    pub fn header(title: &str) {
        println!("\n{}", title.bright_cyan().bold());
        println!("{}", "─".repeat(title.chars().count()).bright_black());
    }

    /// Print a key-value pair
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", key.bright_white().bold(), value);
    }

    /// Print a list item
    pub fn item(text: &str) {
        println!("  {} {}", "•".bright_black(), text);
    }
}

/// Render an optional stored value, `(unset)` when absent
pub fn format_value(value: Option<&OptionValue>) -> String {
    match value {
        None => "(unset)".to_string(),
        Some(OptionValue::String(s)) if s.is_empty() => "\"\"".to_string(),
        Some(v) => v.to_string(),
    }
}

/// Render unix seconds as an RFC 3339 UTC timestamp
pub fn format_timestamp(seconds: i64) -> String {
    match Utc.timestamp_opt(seconds, 0).single() {
        Some(ts) => ts.to_rfc3339(),
        None => seconds.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(None), "(unset)");
        assert_eq!(format_value(Some(&OptionValue::from(""))), "\"\"");
        assert_eq!(format_value(Some(&OptionValue::Bool(true))), "true");
        assert_eq!(
            format_value(Some(&OptionValue::List(vec!["a".into(), "b".into()]))),
            "[a, b]"
        );
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00+00:00");
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }
}
