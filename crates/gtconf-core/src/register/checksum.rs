//! 8-bit register-image checksum.
//!
//! The controller guards its configuration block with a two's-complement
//! sum: the checksum byte is the value that makes the covered bytes plus
//! the checksum itself sum to 0 modulo 256.

use super::error::ConfigError;
use super::layout;
use super::reader::RegisterReader;

/// Compute the checksum byte for a covered region.
#[inline]
pub fn compute(region: &[u8]) -> u8 {
    let sum = region.iter().fold(0u8, |acc, byte| acc.wrapping_add(*byte));
    (!sum).wrapping_add(1)
}

/// Recompute a full image's checksum and compare it with the stored byte.
///
/// Fails only when the input is not exactly one image long; a checksum
/// mismatch is reported through the returned bool, not an error.
pub fn verify_image(image: &[u8]) -> Result<bool, ConfigError> {
    let reader = RegisterReader::new(image)?;
    let computed = compute(reader.read_slice(layout::CHECKSUM_RANGE));
    Ok(computed == reader.read_u8(layout::CHECKSUM_OFFSET))
}
