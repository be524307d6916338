//! Localizable display text.
//!
//! Display strings are looked up by `(namespace, key)` with an English
//! fallback baked in at the call site. Config may override entries per key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number formatting rules for the active culture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Separator inserted every three integer digits; `None` disables it.
    pub grouping_separator: Option<char>,
    pub negative_sign: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            grouping_separator: Some(','),
            negative_sign: '-',
        }
    }
}

impl NumberFormat {
    /// Formats an integer with digit grouping, e.g. `-12345` -> `-12,345`.
    pub fn format_int(&self, n: i64) -> String {
        let digits = n.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if n < 0 {
            out.push(self.negative_sign);
        }
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                if let Some(sep) = self.grouping_separator {
                    out.push(sep);
                }
            }
            out.push(ch);
        }
        out
    }
}

/// Localized string table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextTable {
    /// Overrides keyed as `"Namespace.Key"`.
    #[serde(default)]
    pub entries: HashMap<String, String>,
    #[serde(default)]
    pub numbers: NumberFormat,
}

impl TextTable {
    /// Returns the localized entry or `fallback` when none is registered.
    pub fn get<'a>(&'a self, namespace: &str, key: &str, fallback: &'a str) -> &'a str {
        self.entries
            .get(&format!("{namespace}.{key}"))
            .map(String::as_str)
            .unwrap_or(fallback)
    }

    /// Looks up a pattern and substitutes `{0}`, `{1}`, ... with `args`.
    pub fn format(&self, namespace: &str, key: &str, fallback: &str, args: &[String]) -> String {
        let mut out = self.get(namespace, key, fallback).to_string();
        for (i, arg) in args.iter().enumerate() {
            out = out.replace(&format!("{{{i}}}"), arg);
        }
        out
    }

    pub fn as_number(&self, n: i64) -> String {
        self.numbers.format_int(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_inserts_separators() {
        let f = NumberFormat::default();
        assert_eq!(f.format_int(0), "0");
        assert_eq!(f.format_int(999), "999");
        assert_eq!(f.format_int(1000), "1,000");
        assert_eq!(f.format_int(-1234567), "-1,234,567");
    }

    #[test]
    fn grouping_can_be_disabled() {
        let f = NumberFormat {
            grouping_separator: None,
            negative_sign: '-',
        };
        assert_eq!(f.format_int(12345), "12345");
    }

    #[test]
    fn format_uses_override_when_present() {
        let mut table = TextTable::default();
        assert_eq!(
            table.format("VehiclePawn", "SpeedFormat", "{0} km/h", &["42".into()]),
            "42 km/h"
        );
        table
            .entries
            .insert("VehiclePawn.SpeedFormat".into(), "{0} км/ч".into());
        assert_eq!(
            table.format("VehiclePawn", "SpeedFormat", "{0} km/h", &["42".into()]),
            "42 км/ч"
        );
    }
}
