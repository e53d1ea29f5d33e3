//! Cell text formatting.

use serde_json::Value;

/// Leaf names whose values are rendered as amounts with thousands separators.
pub const AMOUNT_FIELDS: [&str; 1] = ["amount"];

/// Whether a column path ending in `leaf` gets amount formatting.
pub fn is_amount_field(leaf: &str) -> bool {
    AMOUNT_FIELDS
        .iter()
        .any(|name| name.eq_ignore_ascii_case(leaf))
}

/// Plain text for a resolved cell value. Absent and null render empty.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Amount text with thousands separators, e.g. `1234567.5` -> `1,234,567.5`.
///
/// Numeric strings are formatted too. Anything that is not a number falls
/// back to [`display_value`].
pub fn format_amount(value: Option<&Value>) -> String {
    let text = match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if is_numeric(s.trim()) => s.trim().to_owned(),
        other => return display_value(other),
    };
    group_thousands(&text)
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.parse::<f64>().is_ok_and(f64::is_finite)
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    // Exponent notation is left alone.
    if !whole.chars().all(|c| c.is_ascii_digit()) {
        return text.to_owned();
    }

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn groups_integer_amounts() {
        assert_eq!(format_amount(Some(&json!(1234567))), "1,234,567");
        assert_eq!(format_amount(Some(&json!(999))), "999");
        assert_eq!(format_amount(Some(&json!(1000))), "1,000");
        assert_eq!(format_amount(Some(&json!(-25000))), "-25,000");
    }

    #[test]
    fn keeps_fraction_digits() {
        assert_eq!(format_amount(Some(&json!(1234567.5))), "1,234,567.5");
        assert_eq!(format_amount(Some(&json!("98765.4321"))), "98,765.4321");
    }

    #[test]
    fn non_numeric_amounts_fall_back_to_plain_text() {
        assert_eq!(format_amount(Some(&json!("n/a"))), "n/a");
        assert_eq!(format_amount(None), "");
        assert_eq!(format_amount(Some(&json!(null))), "");
    }

    #[test]
    fn amount_field_match_is_case_insensitive() {
        assert!(is_amount_field("amount"));
        assert!(is_amount_field("Amount"));
        assert!(!is_amount_field("amountCurrency"));
    }

    #[test]
    fn display_value_renders_scalars() {
        assert_eq!(display_value(Some(&json!("Acme"))), "Acme");
        assert_eq!(display_value(Some(&json!(true))), "true");
        assert_eq!(display_value(Some(&json!(42))), "42");
        assert_eq!(display_value(Some(&json!(["a"]))), r#"["a"]"#);
    }
}
