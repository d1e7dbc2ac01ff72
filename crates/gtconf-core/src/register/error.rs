use thiserror::Error;

/// Errors returned by register-image encoding and parsing.
///
/// Note: this error type is re-exported at the crate root; the example is
/// illustrative and not compiled as a public doctest.
///
/// # Examples
/// ```text
/// use gtconf_core::ConfigError;
///
/// let err = ConfigError::InvalidResolution { axis: "x_max", value: 801 };
/// assert!(err.to_string().contains("out of range or odd"));
/// ```
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("resolution out of range or odd: {axis} = {value}")]
    InvalidResolution { axis: &'static str, value: u16 },
    #[error("config image must be exactly {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}
