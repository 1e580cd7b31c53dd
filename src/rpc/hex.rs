//! Quantity decoding for the `0x`-prefixed hex strings EVM nodes return.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("empty hex value: {0:?}")]
    Empty(String),
    #[error("invalid hex value: {0:?}")]
    InvalidDigit(String),
    #[error("hex value overflows 64 bits: {0:?}")]
    Overflow(String),
}

/// Remove a leading `0x` / `0X` if there is one. Unprefixed input passes through.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex quantity into a u64.
///
/// Digits are case-insensitive and leading zeros are allowed. Anything that is
/// not an ASCII hex digit after the prefix (signs, whitespace, `_`) is rejected,
/// and values above `u64::MAX` fail instead of wrapping.
pub fn parse_hex_u64(s: &str) -> Result<u64, HexError> {
    let digits = strip_hex_prefix(s);
    if digits.is_empty() {
        return Err(HexError::Empty(s.to_string()));
    }
    // from_str_radix tolerates a leading '+', so check the digits ourselves
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexError::InvalidDigit(s.to_string()));
    }
    let significant = digits.trim_start_matches('0');
    if significant.len() > 16 {
        return Err(HexError::Overflow(s.to_string()));
    }
    if significant.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(significant, 16).map_err(|_| HexError::Overflow(s.to_string()))
}

/// Encode as a `0x`-prefixed lowercase quantity without leading zeros.
pub fn encode_hex_u64(v: u64) -> String {
    format!("0x{:x}", v)
}
