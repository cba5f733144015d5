//! Fixed-point conversion between human-readable decimal strings and the
//! integer amounts the contracts work with.

use alloy::primitives::U256;
use thiserror::Error;

/// USDx uses 6 fractional digits on-chain.
pub const USDX_DECIMALS: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    #[error("invalid decimal number: {0:?}")]
    InvalidNumber(String),

    #[error("negative amount: {0:?}")]
    Negative(String),

    #[error("too many decimals for scale {decimals}: {value:?}")]
    TooManyDecimals { value: String, decimals: u8 },

    #[error("amount does not fit in 256 bits: {0:?}")]
    Overflow(String),
}

/// Parse a decimal string into a fixed-point integer with `decimals`
/// fractional digits.
///
/// The conversion is exact: significant digits past the scale are an error
/// rather than being rounded away.
pub fn parse_units(text: &str, decimals: u8) -> Result<U256, UnitsError> {
    let trimmed = text.trim();
    if trimmed.starts_with('-') {
        return Err(UnitsError::Negative(text.to_owned()));
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(UnitsError::InvalidNumber(text.to_owned()));
    }

    let fraction = fraction.trim_end_matches('0');
    let scale = usize::from(decimals);
    if fraction.len() > scale {
        return Err(UnitsError::TooManyDecimals {
            value: text.to_owned(),
            decimals,
        });
    }

    let mut digits = String::with_capacity(whole.len() + scale);
    digits.push_str(whole);
    digits.push_str(fraction);
    digits.extend(std::iter::repeat_n('0', scale - fraction.len()));

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).map_err(|_| UnitsError::Overflow(text.to_owned()))
}

/// Render a fixed-point integer as a decimal string.
///
/// Trailing fractional zeros are trimmed, keeping at least one digit after
/// the point (`100.0`, `1.5`, `0.000001`).
pub fn format_units(value: U256, decimals: u8) -> String {
    let scale = usize::from(decimals);
    let digits = value.to_string();
    let padded = if digits.len() <= scale {
        format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
    } else {
        digits
    };

    let (whole, fraction) = padded.split_at(padded.len() - scale);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{fraction}")
    }
}
