//! Loosely-typed request inputs.
//!
//! Callers of the relay send amounts either as JSON strings or as JSON
//! numbers, and payment identifiers as whatever JSON value their frontend
//! happens to hold. These types accept that shape and render it back to the
//! text the caller supplied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A human-readable amount, sent either as `"12.5"` or as `12.5`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for AmountInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountInput::Text(text) => f.write_str(text),
            AmountInput::Number(number) => write_number(number, f),
        }
    }
}

impl From<rust_decimal::Decimal> for AmountInput {
    fn from(value: rust_decimal::Decimal) -> Self {
        AmountInput::Text(value.normalize().to_string())
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_owned())
    }
}

/// A payment identifier as received on the wire.
///
/// Any JSON value is accepted here; whether it encodes to a valid on-chain
/// identifier is decided by the ledger client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentIdInput(pub serde_json::Value);

impl From<u64> for PaymentIdInput {
    fn from(value: u64) -> Self {
        PaymentIdInput(serde_json::Value::from(value))
    }
}

impl fmt::Display for PaymentIdInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_interpolated(&self.0, f)
    }
}

/// Largest magnitude at which every whole `f64` is an exact integer.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Renders a JSON number as JavaScript would: `100.0`, `1e2` and `-0` are
/// whole numbers and print without a fractional part.
fn write_number(n: &serde_json::Number, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_i64() || n.is_u64() {
        return write!(f, "{n}");
    }
    match n.as_f64() {
        Some(x) if x.fract() == 0.0 && x.abs() <= MAX_SAFE_INTEGER => {
            // `as` maps -0.0 to 0.
            write!(f, "{}", x as i64)
        }
        _ => write!(f, "{n}"),
    }
}

/// Renders a JSON value the way string interpolation would in the relay's
/// frontends: strings unquoted, arrays comma-joined, objects opaque.
fn write_interpolated(value: &serde_json::Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    use serde_json::Value;
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => write_number(n, f),
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                // Nested nulls render as empty, as Array.prototype.join does.
                if !item.is_null() {
                    write_interpolated(item, f)?;
                }
            }
            Ok(())
        }
        Value::Object(_) => f.write_str("[object Object]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_input_accepts_string_and_number() {
        let text: AmountInput = serde_json::from_str(r#""100.25""#).unwrap();
        let number: AmountInput = serde_json::from_str("100").unwrap();
        assert_eq!(text, AmountInput::Text("100.25".to_string()));
        assert_eq!(text.to_string(), "100.25");
        assert_eq!(number.to_string(), "100");

        for (json, rendered) in [
            ("100.0", "100"),
            ("1e2", "100"),
            ("-0.0", "0"),
            ("2.5", "2.5"),
        ] {
            let number: AmountInput = serde_json::from_str(json).unwrap();
            assert_eq!(number.to_string(), rendered, "rendering {json}");
        }
    }

    #[test]
    fn test_amount_input_rejects_other_json() {
        assert!(serde_json::from_str::<AmountInput>("true").is_err());
        assert!(serde_json::from_str::<AmountInput>("[1]").is_err());
    }

    #[test]
    fn test_amount_from_decimal_is_normalized() {
        let amount: AmountInput = rust_decimal::Decimal::new(1_500, 2).into();
        assert_eq!(amount.to_string(), "15");
    }

    #[test]
    fn test_payment_id_rendering() {
        let cases = [
            ("0", "0"),
            ("1.0", "1"),
            ("7e0", "7"),
            ("-0.0", "0"),
            ("[1.0,2]", "1,2"),
            (r#""42""#, "42"),
            ("null", "null"),
            ("true", "true"),
            ("[1,null,2]", "1,,2"),
            (r#"{"id":1}"#, "[object Object]"),
        ];
        for (json, rendered) in cases {
            let id: PaymentIdInput = serde_json::from_str(json).unwrap();
            assert_eq!(id.to_string(), rendered, "rendering {json}");
        }
    }
}
