//! Data-type formatting
//!
//! [`ValueFormat::format`] is the single place a raw [`Value`] becomes the
//! text written into a cell; every insert operation defers to it instead of
//! formatting inline.

use crate::value::Value;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write as _;

/// Separators used when rendering numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberLocale {
    /// Decimal separator (e.g. '.' or ',')
    pub decimal_separator: char,
    /// Digit-group separator (e.g. ',' or '.')
    pub group_separator: char,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: ',',
        }
    }
}

/// Numeric rendering rules
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberFormatSpec {
    /// Decimal places to round and pad to
    pub decimals: u32,
    /// Insert digit-group separators in the integer part
    pub use_grouping: bool,
    /// Separator characters
    pub locale: NumberLocale,
    /// Written instead of the value when the input cannot be read as a number
    pub error_value: String,
}

impl Default for NumberFormatSpec {
    fn default() -> Self {
        Self {
            decimals: 2,
            use_grouping: false,
            locale: NumberLocale::default(),
            error_value: "#VALUE!".to_string(),
        }
    }
}

impl NumberFormatSpec {
    /// Create a spec with the given decimal places
    pub fn with_decimals(decimals: u32) -> Self {
        Self {
            decimals,
            ..Self::default()
        }
    }

    /// Enable digit grouping
    pub fn grouped(mut self) -> Self {
        self.use_grouping = true;
        self
    }

    /// Set the separator characters
    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the error fallback text
    pub fn with_error_value<S: Into<String>>(mut self, error_value: S) -> Self {
        self.error_value = error_value.into();
        self
    }
}

/// Date-time rendering rules (strftime pattern)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateTimeFormatSpec {
    /// strftime-style pattern (e.g. "%Y-%m-%d")
    pub pattern: String,
    /// Written instead of the value when the input is not a date-time
    pub error_value: String,
}

impl Default for DateTimeFormatSpec {
    fn default() -> Self {
        Self {
            pattern: "%Y-%m-%d".to_string(),
            error_value: "#VALUE!".to_string(),
        }
    }
}

impl DateTimeFormatSpec {
    /// Create a spec with the given pattern
    pub fn with_pattern<S: Into<String>>(pattern: S) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }
}

/// The data-type/format part of a style
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueFormat {
    /// Pass text through unchanged; other values use their plain rendering
    #[default]
    Text,
    /// Round/pad/group numbers
    Number(NumberFormatSpec),
    /// Render date-times with a pattern
    DateTime(DateTimeFormatSpec),
}

impl ValueFormat {
    /// Shorthand for a numeric format with the given decimal places
    pub fn number(decimals: u32) -> Self {
        ValueFormat::Number(NumberFormatSpec::with_decimals(decimals))
    }

    /// Shorthand for a date-time format with the given pattern
    pub fn date_time<S: Into<String>>(pattern: S) -> Self {
        ValueFormat::DateTime(DateTimeFormatSpec::with_pattern(pattern))
    }

    /// Produce the exact text representation written into the target cell.
    ///
    /// Empty values always render as the empty string; a value the format
    /// cannot interpret renders as the format's error fallback.
    pub fn format(&self, value: &Value) -> String {
        if value.is_empty() {
            return String::new();
        }
        match self {
            ValueFormat::Text => value.to_string(),
            ValueFormat::Number(spec) => match value.as_number() {
                Some(n) => format_number(n, spec),
                None => spec.error_value.clone(),
            },
            ValueFormat::DateTime(spec) => match value {
                Value::DateTime(dt) => {
                    let mut out = String::new();
                    if write!(out, "{}", dt.format(&spec.pattern)).is_err() {
                        spec.error_value.clone()
                    } else {
                        out
                    }
                }
                _ => spec.error_value.clone(),
            },
        }
    }

    /// The SpreadsheetML number-format code registered for this format
    pub fn xlsx_code(&self) -> String {
        match self {
            ValueFormat::Text => "@".to_string(),
            ValueFormat::Number(spec) => {
                let mut code = if spec.use_grouping {
                    "#,##0".to_string()
                } else {
                    "0".to_string()
                };
                if spec.decimals > 0 {
                    code.push('.');
                    for _ in 0..spec.decimals {
                        code.push('0');
                    }
                }
                code
            }
            ValueFormat::DateTime(_) => "yyyy-mm-dd hh:mm:ss".to_string(),
        }
    }
}

fn format_number(n: f64, spec: &NumberFormatSpec) -> String {
    let Some(dec) = Decimal::from_f64(n) else {
        return spec.error_value.clone();
    };
    let rounded = dec.round_dp_with_strategy(spec.decimals, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", spec.decimals as usize, rounded);

    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::from(sign);
    if spec.use_grouping {
        out.push_str(&group_digits(int_part, spec.locale.group_separator));
    } else {
        out.push_str(int_part);
    }
    if let Some(frac) = frac_part {
        out.push(spec.locale.decimal_separator);
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_passthrough() {
        assert_eq!(ValueFormat::Text.format(&Value::from("Hello")), "Hello");
        assert_eq!(ValueFormat::Text.format(&Value::from(42.0)), "42");
        assert_eq!(ValueFormat::Text.format(&Value::Empty), "");
    }

    #[test]
    fn test_number_rounding_and_padding() {
        let format = ValueFormat::number(2);
        assert_eq!(format.format(&Value::from(3.14159)), "3.14");
        assert_eq!(format.format(&Value::from(2.0)), "2.00");
        assert_eq!(format.format(&Value::from(2.345)), "2.35");
        assert_eq!(format.format(&Value::from(-1.005)), "-1.01");
    }

    #[test]
    fn test_number_grouping() {
        let format = ValueFormat::Number(NumberFormatSpec::with_decimals(2).grouped());
        assert_eq!(format.format(&Value::from(1234567.891)), "1,234,567.89");
        assert_eq!(format.format(&Value::from(-1234.5)), "-1,234.50");
        assert_eq!(format.format(&Value::from(999.0)), "999.00");
    }

    #[test]
    fn test_number_locale_separators() {
        let locale = NumberLocale {
            decimal_separator: ',',
            group_separator: '.',
        };
        let format =
            ValueFormat::Number(NumberFormatSpec::with_decimals(2).grouped().with_locale(locale));
        assert_eq!(format.format(&Value::from(1234.5)), "1.234,50");
    }

    #[test]
    fn test_number_parses_text_input() {
        let format = ValueFormat::number(1);
        assert_eq!(format.format(&Value::from("12.34")), "12.3");
    }

    #[test]
    fn test_number_error_fallback() {
        let format = ValueFormat::Number(
            NumberFormatSpec::with_decimals(2).with_error_value("n/a"),
        );
        assert_eq!(format.format(&Value::from("not a number")), "n/a");
    }

    #[test]
    fn test_date_time_pattern() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(13, 45, 0)
            .unwrap();
        let format = ValueFormat::date_time("%d.%m.%Y %H:%M");
        assert_eq!(format.format(&Value::DateTime(dt)), "07.03.2024 13:45");
    }

    #[test]
    fn test_date_time_rejects_non_dates() {
        let format = ValueFormat::date_time("%Y-%m-%d");
        assert_eq!(format.format(&Value::from("hello")), "#VALUE!");
    }

    #[test]
    fn test_xlsx_codes() {
        assert_eq!(ValueFormat::Text.xlsx_code(), "@");
        assert_eq!(ValueFormat::number(0).xlsx_code(), "0");
        assert_eq!(ValueFormat::number(2).xlsx_code(), "0.00");
        assert_eq!(
            ValueFormat::Number(NumberFormatSpec::with_decimals(2).grouped()).xlsx_code(),
            "#,##0.00"
        );
    }
}
