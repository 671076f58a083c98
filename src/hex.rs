//! Hexadecimal Utilities
//!
//! This module provides the hex codec used across the console tool: strict
//! decoding of operator-typed hex into bytes, byte-to-hex encoding for
//! display and session logs, and a text view for responses that carry
//! printable payloads.
//!
//! Decoding is strict on purpose. Operator input goes straight to the
//! device, so a stray character is rejected instead of silently skipped.
//!
//! # Examples
//!
//! ```rust
//! use sercon_core::hex::{decode, encode_upper, format_spaced};
//!
//! let bytes = decode("4f4b").unwrap();
//! assert_eq!(bytes, vec![0x4F, 0x4B]);
//!
//! assert_eq!(encode_upper(&bytes), "4F4B");
//! assert_eq!(format_spaced(&bytes), "4F 4B");
//! ```

use std::fmt::Write;

use crate::error::{Result, SerConError};

/// Convert a hexadecimal string to a byte array
///
/// The input must contain only hex digits (both cases accepted) and have
/// even length. Anything else is rejected, including whitespace and
/// separators.
///
/// # Arguments
///
/// * `hex` - Hexadecimal string without separators
///
/// # Returns
///
/// Result containing the byte vector or an `InvalidFormat` error
///
/// # Example
///
/// ```rust
/// use sercon_core::hex::decode;
///
/// assert_eq!(decode("4A").unwrap(), vec![0x4A]);
/// assert_eq!(decode("000102ff").unwrap(), vec![0x00, 0x01, 0x02, 0xFF]);
/// assert!(decode("F").is_err());
/// assert!(decode("GG").is_err());
/// ```
pub fn decode(hex: &str) -> Result<Vec<u8>> {
    check(hex)?;
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| {
                SerConError::invalid_format(format!("Invalid hex byte '{}': {}", &hex[i..i + 2], e))
            })
        })
        .collect()
}

/// Convert a hexadecimal string to text
///
/// Each decoded byte becomes the character with that code point, so the
/// result round-trips byte-for-byte for the 8-bit range. Non-printable
/// bytes are preserved as-is.
///
/// # Arguments
///
/// * `hex` - Hexadecimal string without separators
///
/// # Returns
///
/// Result containing the decoded text or an `InvalidFormat` error
///
/// # Example
///
/// ```rust
/// use sercon_core::hex::decode_to_text;
///
/// assert_eq!(decode_to_text("4142").unwrap(), "AB");
/// assert_eq!(decode_to_text("").unwrap(), "");
/// ```
pub fn decode_to_text(hex: &str) -> Result<String> {
    let bytes = decode(hex)?;
    Ok(bytes.into_iter().map(char::from).collect())
}

/// Encode bytes to lowercase hex string
///
/// # Example
///
/// ```rust
/// use sercon_core::hex::encode;
///
/// assert_eq!(encode(&[0x01, 0x02, 0xFF]), "0102ff");
/// ```
pub fn encode(data: &[u8]) -> String {
    let mut result = String::with_capacity(data.len() * 2);
    for byte in data {
        // Writing to String buffer is infallible - no need for expect
        let _ = write!(&mut result, "{:02x}", byte);
    }
    result
}

/// Encode bytes to uppercase hex string
///
/// # Example
///
/// ```rust
/// use sercon_core::hex::encode_upper;
///
/// assert_eq!(encode_upper(&[0x12, 0x34, 0xAB]), "1234AB");
/// ```
pub fn encode_upper(data: &[u8]) -> String {
    let mut result = String::with_capacity(data.len() * 2);
    for byte in data {
        let _ = write!(&mut result, "{:02X}", byte);
    }
    result
}

/// Format byte slice as spaced hex string for logs (e.g., "00 01 AB CD")
pub fn format_spaced(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

// u8::from_str_radix accepts a leading '+', so character validation has
// to happen before the pairs are parsed.
fn check(hex: &str) -> Result<()> {
    if let Some(bad) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(SerConError::invalid_format(format!(
            "Invalid hex character '{}'",
            bad
        )));
    }
    if hex.len() % 2 != 0 {
        return Err(SerConError::invalid_format(
            "Hex string must have even length".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_decode() {
        assert_eq!(decode("4A").unwrap(), vec![0x4A]);
        assert_eq!(decode("4a").unwrap(), vec![0x4A]);
        assert_eq!(decode("000102ff").unwrap(), vec![0x00, 0x01, 0x02, 0xFF]);
        assert_eq!(decode("000102FF").unwrap(), vec![0x00, 0x01, 0x02, 0xFF]);
    }

    #[test]
    fn test_decode_errors() {
        // Odd length
        assert!(decode("F").is_err());
        assert!(decode("123").is_err());

        // Invalid characters
        assert!(decode("GG").is_err());
        assert!(decode("az").is_err());

        // Separators are not accepted
        assert!(decode("00 01").is_err());
        assert!(decode("00:01").is_err());

        // from_str_radix would take these, the validator must not
        assert!(decode("+F").is_err());
        assert!(decode("+1").is_err());
    }

    #[test]
    fn test_decode_error_kind() {
        match decode("xyz") {
            Err(SerConError::InvalidFormat(_)) => {}
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_to_text() {
        assert_eq!(decode_to_text("4142").unwrap(), "AB");
        assert_eq!(decode_to_text("6F6B").unwrap(), "ok");

        // High bytes map to the matching code points
        assert_eq!(decode_to_text("FF").unwrap(), "\u{FF}");

        // Non-printable bytes are preserved
        assert_eq!(decode_to_text("0041").unwrap(), "\0A");
    }

    #[test]
    fn test_encode() {
        let data = &[0x00, 0x01, 0x02, 0xFF];
        assert_eq!(encode(data), "000102ff");
        assert_eq!(encode_upper(data), "000102FF");
    }

    #[test]
    fn test_format_spaced() {
        let data = vec![0x00, 0x01, 0xAB, 0xCD, 0xEF];
        assert_eq!(format_spaced(&data), "00 01 AB CD EF");
    }

    #[test]
    fn test_roundtrip() {
        let original = vec![0x00, 0x01, 0x10, 0xFF, 0xAB, 0xCD];
        let recovered = decode(&encode(&original)).unwrap();
        assert_eq!(original, recovered);
        let recovered_upper = decode(&encode_upper(&original)).unwrap();
        assert_eq!(original, recovered_upper);
    }

    #[test]
    fn test_random_roundtrip() {
        const DIGITS: &[u8] = b"0123456789abcdefABCDEF";
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let len = rng.gen_range(0..64) * 2;
            let hex: String = (0..len)
                .map(|_| DIGITS[rng.gen_range(0..DIGITS.len())] as char)
                .collect();

            // Mixed-case input decodes; re-encoding differs only by case
            let bytes = decode(&hex).unwrap();
            assert_eq!(bytes.len(), hex.len() / 2);
            assert_eq!(encode(&bytes), hex.to_lowercase());
            assert_eq!(encode_upper(&bytes), hex.to_uppercase());
        }
    }

    #[test]
    fn test_empty_data() {
        let empty: &[u8] = &[];
        assert_eq!(encode(empty), "");
        assert_eq!(encode_upper(empty), "");
        assert_eq!(format_spaced(empty), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }
}
