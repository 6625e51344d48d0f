//! Hex/quantity conversion and fixed-scale unit arithmetic.
//!
//! Chain quantities travel as `0x`-prefixed hex strings; native-token amounts
//! use a fixed 18-decimal scale. All decimal conversion is done with string
//! arithmetic on `u128` — no floating point anywhere in the value path.

use crate::error::CodecError;

/// Decimal places of the native token (wei scale).
pub const NATIVE_DECIMALS: u32 = 18;

/// Decimal places of gwei relative to wei.
pub const GWEI_DECIMALS: u32 = 9;

/// Parse a `0x`-prefixed (or bare) hex string into a `u64`.
pub fn parse_hex_u64(s: &str) -> Result<u64, CodecError> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(trimmed, 16).map_err(|_| CodecError::InvalidHex(s.to_string()))
}

/// Parse a `0x`-prefixed (or bare) hex string into a `u128`.
///
/// Values wider than 128 bits saturate to `u128::MAX`; transfer values that
/// large are far beyond any realistic token supply.
pub fn parse_hex_u128(s: &str) -> Result<u128, CodecError> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CodecError::InvalidHex(s.to_string()));
    }
    if trimmed.len() > 32 {
        return Ok(u128::MAX);
    }
    u128::from_str_radix(trimmed, 16).map_err(|_| CodecError::InvalidHex(s.to_string()))
}

/// Format a block number as the `0x`-hex quantity the JSON-RPC layer expects.
pub fn to_hex(n: u64) -> String {
    format!("0x{n:x}")
}

/// Parse a decimal string (e.g. `"1.5"`) into base units at `decimals` scale.
///
/// Fractional digits beyond `decimals` are rejected rather than silently
/// truncated, so a threshold is always exactly representable.
pub fn parse_units(amount: &str, decimals: u32) -> Result<u128, CodecError> {
    let invalid = || CodecError::InvalidAmount(amount.to_string());

    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }
    if frac_part.len() > decimals as usize {
        return Err(invalid());
    }

    let scale = 10u128.pow(decimals);
    let int_val: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| invalid())?
    };
    let frac_val: u128 = if frac_part.is_empty() {
        0
    } else {
        let padded = frac_part.parse::<u128>().map_err(|_| invalid())?;
        padded * 10u128.pow(decimals - frac_part.len() as u32)
    };

    int_val
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_val))
        .ok_or_else(invalid)
}

/// Format base units back into a decimal string at `decimals` scale.
///
/// Trailing fractional zeros are trimmed; whole values render without a dot.
pub fn format_units(value: u128, decimals: u32) -> String {
    let scale = 10u128.pow(decimals);
    let int_part = value / scale;
    let frac_part = value % scale;
    if frac_part == 0 {
        return int_part.to_string();
    }
    let frac_str = format!("{frac_part:0width$}", width = decimals as usize);
    format!("{int_part}.{}", frac_str.trim_end_matches('0'))
}

/// Convert a wei amount into a native-token decimal string.
pub fn format_native(wei: u128) -> String {
    format_units(wei, NATIVE_DECIMALS)
}

/// Convert a wei amount into a gwei decimal string.
pub fn format_gwei(wei: u128) -> String {
    format_units(wei, GWEI_DECIMALS)
}

/// Convert a native-token decimal string into wei.
pub fn parse_native(amount: &str) -> Result<u128, CodecError> {
    parse_units(amount, NATIVE_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_u64_roundtrip() {
        assert_eq!(parse_hex_u64("0x1").unwrap(), 1);
        assert_eq!(parse_hex_u64("0xff").unwrap(), 255);
        assert_eq!(parse_hex_u64("1234").unwrap(), 0x1234);
        assert_eq!(to_hex(255), "0xff");
        assert!(parse_hex_u64("0xzz").is_err());
    }

    #[test]
    fn hex_u128_wide_values() {
        // 1 ETH in wei
        assert_eq!(
            parse_hex_u128("0xde0b6b3a7640000").unwrap(),
            1_000_000_000_000_000_000
        );
        // Wider than 128 bits saturates
        let wide = format!("0x{}", "f".repeat(40));
        assert_eq!(parse_hex_u128(&wide).unwrap(), u128::MAX);
        assert!(parse_hex_u128("0x").is_err());
    }

    #[test]
    fn parse_units_whole_and_fractional() {
        assert_eq!(parse_units("1", 18).unwrap(), 10u128.pow(18));
        assert_eq!(parse_units("1.5", 18).unwrap(), 15 * 10u128.pow(17));
        assert_eq!(parse_units("0.000000000000000001", 18).unwrap(), 1);
        assert_eq!(parse_units(".5", 18).unwrap(), 5 * 10u128.pow(17));
    }

    #[test]
    fn parse_units_rejects_garbage() {
        assert!(parse_units("", 18).is_err());
        assert!(parse_units("1.2.3", 18).is_err());
        assert!(parse_units("-1", 18).is_err());
        assert!(parse_units("1e18", 18).is_err());
        // More fractional digits than the scale allows
        assert!(parse_units("0.0000000000000000001", 18).is_err());
    }

    #[test]
    fn format_units_trims_zeros() {
        assert_eq!(format_units(10u128.pow(18), 18), "1");
        assert_eq!(format_units(15 * 10u128.pow(17), 18), "1.5");
        assert_eq!(format_units(1, 18), "0.000000000000000001");
        assert_eq!(format_gwei(2_500_000_000), "2.5");
    }

    #[test]
    fn native_roundtrip() {
        let wei = parse_native("12.25").unwrap();
        assert_eq!(format_native(wei), "12.25");
    }
}
