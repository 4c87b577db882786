//! Hex and wei conversions shared by every profile

use alloy_primitives::U256;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    #[error("invalid hex quantity: {0}")]
    Hex(String),

    #[error("invalid decimal quantity: {0}")]
    Decimal(String),
}

/// `0x`-prefixed hex with no leading zeros, the wire form for block tags and
/// numeric request fields.
pub fn to_hex(value: u64) -> String {
    format!("0x{:x}", value)
}

/// Decode a `0x`-prefixed (or bare) hex quantity.
pub fn parse_hex_u64(s: &str) -> Result<u64, UnitsError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u64::from_str_radix(digits, 16).map_err(|_| UnitsError::Hex(s.to_string()))
}

/// Parse a raw wei quantity. Gateways answer hex, explorers answer decimal;
/// both are accepted.
pub fn parse_wei(raw: &str) -> Result<U256, UnitsError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UnitsError::Decimal(raw.to_string()));
    }
    if let Some(digits) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        if digits.is_empty() {
            return Err(UnitsError::Hex(raw.to_string()));
        }
        U256::from_str_radix(digits, 16).map_err(|_| UnitsError::Hex(raw.to_string()))
    } else {
        U256::from_str_radix(raw, 10).map_err(|_| UnitsError::Decimal(raw.to_string()))
    }
}

/// Display amount for a raw wei value: divided by `10^decimals`, fractional
/// part trimmed of trailing zeros (`"1000000000000000000"` -> `"1"`).
pub fn wei_to_display(raw: &str, decimals: u32) -> Result<String, UnitsError> {
    let wei = parse_wei(raw)?;
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = wei / scale;
    let frac = wei % scale;
    if frac.is_zero() {
        return Ok(whole.to_string());
    }
    let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    let frac = frac.trim_end_matches('0');
    Ok(format!("{whole}.{frac}"))
}
