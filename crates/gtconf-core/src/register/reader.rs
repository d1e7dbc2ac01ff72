use super::error::ConfigError;
use super::layout;

/// Read access over a full register image.
///
/// Construction enforces the exact image length; reads then go through
/// `layout` constants, all of which fall inside the fixed-size array.
pub struct RegisterReader<'a> {
    image: &'a [u8; layout::CONFIG_LEN],
}

impl<'a> RegisterReader<'a> {
    pub fn new(image: &'a [u8]) -> Result<Self, ConfigError> {
        let image = image.try_into().map_err(|_| ConfigError::WrongLength {
            expected: layout::CONFIG_LEN,
            actual: image.len(),
        })?;
        Ok(Self { image })
    }

    pub fn read_u8(&self, offset: usize) -> u8 {
        self.image[offset]
    }

    pub fn read_u16_le(&self, range: std::ops::Range<usize>) -> u16 {
        let bytes = &self.image[range];
        u16::from_le_bytes([bytes[0], bytes[1]])
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> &'a [u8] {
        &self.image[range]
    }
}
