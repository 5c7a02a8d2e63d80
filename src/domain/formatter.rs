//! Stateless display transforms for mapped field values.
//!
//! Formatting never fails: unparseable or unexpected inputs degrade to a
//! best-effort string. The tag strings on [`Formatter`] are the wire contract
//! for persisted configuration and must not change.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named transform applied when displaying or storing a mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatter {
    #[default]
    None,
    DateSlash,
    DateDash,
    Currency,
    BooleanYn,
    Uppercase,
    Lowercase,
}

/// Apply `formatter` to a JSON value, producing display text.
pub fn format_value(value: &Value, formatter: Formatter) -> String {
    let text = plain_text(value);
    match formatter {
        Formatter::None => text,
        Formatter::DateSlash => drop_time_component(&text.replace('-', "/")),
        Formatter::DateDash => drop_time_component(&text.replace('/', "-")),
        Formatter::Currency => format_currency(&text),
        Formatter::BooleanYn => {
            if matches!(text.as_str(), "true" | "1" | "Y") {
                "Y".to_string()
            } else {
                "N".to_string()
            }
        }
        Formatter::Uppercase => text.to_uppercase(),
        Formatter::Lowercase => text.to_lowercase(),
    }
}

/// Plain stringification: empty for null, verbatim for strings, canonical
/// JSON rendering otherwise.
fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn drop_time_component(text: &str) -> String {
    match text.split_once('T') {
        Some((date, _time)) => date.to_string(),
        None => text.to_string(),
    }
}

/// `$` plus a thousands-grouped rendering when the text parses as a finite
/// number; anything else passes through unchanged.
fn format_currency(text: &str) -> String {
    let number = match text.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => number,
        _ => return text.to_string(),
    };
    let sign = if number < 0.0 { "-" } else { "" };
    let rendered = format!("{:.3}", number.abs());
    let (int_digits, frac_digits) = rendered
        .split_once('.')
        .unwrap_or((rendered.as_str(), ""));
    let fraction = frac_digits.trim_end_matches('0');
    let grouped = group_thousands(int_digits);
    if fraction.is_empty() {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_none_stringifies() {
        assert_eq!(format_value(&json!("abc"), Formatter::None), "abc");
        assert_eq!(format_value(&json!(42), Formatter::None), "42");
        assert_eq!(format_value(&json!(true), Formatter::None), "true");
        assert_eq!(format_value(&Value::Null, Formatter::None), "");
    }

    #[test]
    fn test_date_slash() {
        assert_eq!(
            format_value(&json!("2024-01-05"), Formatter::DateSlash),
            "2024/01/05"
        );
        assert_eq!(
            format_value(&json!("2024-01-05T00:00:00"), Formatter::DateSlash),
            "2024/01/05"
        );
    }

    #[test]
    fn test_date_dash() {
        assert_eq!(
            format_value(&json!("2024/01/05"), Formatter::DateDash),
            "2024-01-05"
        );
        assert_eq!(
            format_value(&json!("2024/01/05T12:30:00"), Formatter::DateDash),
            "2024-01-05"
        );
    }

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_value(&json!(1000), Formatter::Currency), "$1,000");
        assert_eq!(format_value(&json!(500), Formatter::Currency), "$500");
        assert_eq!(
            format_value(&json!(1234567), Formatter::Currency),
            "$1,234,567"
        );
        assert_eq!(
            format_value(&json!(1234.5), Formatter::Currency),
            "$1,234.5"
        );
        assert_eq!(format_value(&json!(-2500), Formatter::Currency), "-$2,500");
    }

    #[test]
    fn test_currency_passthrough() {
        assert_eq!(format_value(&json!("abc"), Formatter::Currency), "abc");
        assert_eq!(format_value(&json!(""), Formatter::Currency), "");
    }

    #[test]
    fn test_boolean_yn() {
        assert_eq!(format_value(&json!("1"), Formatter::BooleanYn), "Y");
        assert_eq!(format_value(&json!("0"), Formatter::BooleanYn), "N");
        assert_eq!(format_value(&json!(true), Formatter::BooleanYn), "Y");
        assert_eq!(format_value(&json!("Y"), Formatter::BooleanYn), "Y");
        assert_eq!(format_value(&json!("yes"), Formatter::BooleanYn), "N");
    }

    #[test]
    fn test_case_folds_are_idempotent() {
        let once = format_value(&json!("Mixed Case"), Formatter::Uppercase);
        let twice = format_value(&json!(once.clone()), Formatter::Uppercase);
        assert_eq!(once, twice);

        let once = format_value(&json!("Mixed Case"), Formatter::Lowercase);
        let twice = format_value(&json!(once.clone()), Formatter::Lowercase);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_formatter_tags() {
        // The serialized tags are a de facto wire contract.
        assert_eq!(serde_json::to_string(&Formatter::DateSlash).unwrap(), "\"date_slash\"");
        assert_eq!(serde_json::to_string(&Formatter::BooleanYn).unwrap(), "\"boolean_yn\"");
        let parsed: Formatter = serde_json::from_str("\"currency\"").unwrap();
        assert_eq!(parsed, Formatter::Currency);
    }
}
