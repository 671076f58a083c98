//! Byte pattern scanning
//!
//! Locates every occurrence of a byte pattern inside a larger buffer, for
//! example a marker sequence inside a dumped flash image. Matching is
//! exact and byte-wise; offsets come back in ascending order and
//! overlapping occurrences are all reported.

use crate::error::{Result, SerConError};

/// Find every offset at which `needle` occurs in `haystack`
///
/// Offsets are produced lazily in ascending order. A needle longer than
/// the haystack yields no offsets. Each call scans from the start of the
/// haystack.
///
/// # Arguments
///
/// * `haystack` - Buffer to scan
/// * `needle` - Pattern to look for, must not be empty
///
/// # Returns
///
/// Result containing the offset iterator, or `InvalidArgument` for an
/// empty needle (which would match at every position)
///
/// # Example
///
/// ```rust
/// use sercon_core::scan::find_pattern;
///
/// let data = [0x00, 0x01, 0x00, 0x01, 0x00];
/// let hits: Vec<usize> = find_pattern(&data, &[0x00, 0x01, 0x00]).unwrap().collect();
/// assert_eq!(hits, vec![0, 2]);
/// ```
pub fn find_pattern<'a>(
    haystack: &'a [u8],
    needle: &'a [u8],
) -> Result<impl Iterator<Item = usize> + 'a> {
    if needle.is_empty() {
        return Err(SerConError::invalid_argument(
            "Search pattern must not be empty",
        ));
    }

    // windows() only yields full-length slices, so a truncated match at
    // the end of the buffer can never be reported.
    Ok(haystack
        .windows(needle.len())
        .enumerate()
        .filter_map(move |(offset, window)| if window == needle { Some(offset) } else { None }))
}
