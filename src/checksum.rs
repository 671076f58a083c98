//! Additive command checksum
//!
//! Console commands and responses carry a trailing checksum field: the low
//! byte of the sum of every character, appended after a `:` separator as
//! two uppercase hex digits (e.g. `errlog 0:DB`). The device rejects
//! commands whose field does not match, so both directions are covered
//! here: tagging outgoing commands and verifying incoming frames.

use crate::error::{Result, SerConError};

/// Separator between payload and checksum field
pub const SEPARATOR: char = ':';

/// Calculate the additive checksum of a payload
///
/// # Arguments
/// * `input` - The payload text to sum
///
/// # Returns
/// * `u8` - The sum of all character code points, masked to the low byte
pub fn compute(input: &str) -> u8 {
    let sum = input
        .chars()
        .fold(0u32, |acc, c| acc.wrapping_add(c as u32));
    (sum & 0xFF) as u8
}

/// Append the checksum field to a payload
///
/// # Arguments
///
/// * `input` - Payload text, may be empty
///
/// # Returns
///
/// The payload followed by `:` and two uppercase hex digits
///
/// # Example
///
/// ```rust
/// use sercon_core::checksum::append;
///
/// assert_eq!(append("ABC"), "ABC:C6");
/// assert_eq!(append(""), ":00");
/// ```
pub fn append(input: &str) -> String {
    format!("{}{}{:02X}", input, SEPARATOR, compute(input))
}

/// Verify a checksum-tagged frame and return its payload
///
/// The field is everything after the last `:`, so payloads containing the
/// separator verify correctly. The field must be exactly two hex digits;
/// case does not matter.
///
/// # Arguments
///
/// * `tagged` - Frame in `payload:XX` form
///
/// # Returns
///
/// Result containing the payload slice, `InvalidFormat` when the field is
/// missing or not two hex digits, `ChecksumMismatch` when it does not match
///
/// # Example
///
/// ```rust
/// use sercon_core::checksum::verify;
///
/// assert_eq!(verify("ABC:C6").unwrap(), "ABC");
/// assert!(verify("ABC:C7").is_err());
/// ```
pub fn verify(tagged: &str) -> Result<&str> {
    let (payload, field) = tagged.rsplit_once(SEPARATOR).ok_or_else(|| {
        SerConError::invalid_format(format!("Missing checksum separator in '{}'", tagged))
    })?;

    if field.len() != 2 || !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SerConError::invalid_format(format!(
            "Checksum field '{}' is not two hex digits",
            field
        )));
    }

    let expected = u8::from_str_radix(field, 16)
        .map_err(|e| SerConError::invalid_format(format!("Checksum field '{}': {}", field, e)))?;
    let actual = compute(payload);
    if actual != expected {
        return Err(SerConError::checksum_mismatch(format!(
            "Expected {:02X}, computed {:02X} for '{}'",
            expected, actual, payload
        )));
    }

    Ok(payload)
}
