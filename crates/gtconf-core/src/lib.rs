//! Codec for the Goodix GT911 touch controller's configuration image.
//!
//! This crate implements the register-image codec used by the CLI: semantic
//! settings are validated and encoded into the 186-byte block the GT911
//! loads from firmware (registers 0x8047..=0x8100), and any 186-byte image
//! decodes back into a field view without the original settings. Encoding
//! and parsing are byte-oriented and side-effect free; all I/O lives in the
//! CLI crate. Register positions are captured once in a layout module so the
//! encoder and parser cannot drift apart.
//!
//! Invariants:
//! - Encoded images are exactly 186 bytes, checksum at offset 184 and the
//!   config-fresh sentinel 0x01 at offset 185.
//! - The checksum makes bytes 0..=184 sum to 0 modulo 256.
//! - Encoding is deterministic; equal settings yield equal images.
//!
//! Version française (résumé):
//! Cette crate encode et décode l'image de configuration (186 octets) du
//! contrôleur tactile GT911 : validation -> écriture des champs -> somme de
//! contrôle. Le décodage est une extraction pure, sans E/S. Les positions
//! des registres vivent dans un module `layout` unique.
//!
//! # Examples
//! ```
//! use gtconf_core::{ConfigSettings, encode_config, parse_config};
//!
//! let settings = ConfigSettings {
//!     x_max: 1024,
//!     y_max: 600,
//!     touch_threshold: 16,
//!     num_touch_points: 5,
//!     filter_coefficient: 4,
//! };
//! let image = encode_config(&settings)?;
//! let view = parse_config(&image)?;
//! assert_eq!(view.x_max, 1024);
//! # Ok::<(), gtconf_core::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod presets;
mod register;

pub use register::checksum::verify_image;
pub use register::encoder::validate;
pub use register::error::ConfigError;
pub use register::layout::{CONFIG_LEN, REGISTER_BASE};
pub use register::{encode_config, parse_config};

/// Semantic configuration input for the encoder.
///
/// Adjustment policy (deliberate, not errors): `num_touch_points` is
/// silently clamped into 1..=10 at encode time; `filter_coefficient` keeps
/// only its low 8 bits; `touch_threshold` is floored to 1 and then
/// truncated to a byte, so values of 256 and above wrap. Callers wanting
/// strict rejection must check those fields before encoding. Resolution is
/// the one hard-validated input: each axis must be even and in (0, 4095].
///
/// # Examples
/// ```
/// use gtconf_core::{ConfigSettings, encode_config};
///
/// let settings = ConfigSettings {
///     num_touch_points: 15,
///     ..ConfigSettings::default()
/// };
/// let image = encode_config(&settings)?;
/// assert_eq!(image[5], 10);
/// # Ok::<(), gtconf_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSettings {
    /// Horizontal resolution; even, 1..=4095.
    pub x_max: u16,
    /// Vertical resolution; even, 1..=4095.
    pub y_max: u16,
    /// Screen touch level; intended 1..=255, low byte stored.
    pub touch_threshold: u16,
    /// Simultaneous touch points; clamped into 1..=10.
    pub num_touch_points: u8,
    /// Filter coefficient; low 8 bits significant.
    pub filter_coefficient: u16,
}

impl Default for ConfigSettings {
    fn default() -> Self {
        Self {
            x_max: 1024,
            y_max: 600,
            touch_threshold: 16,
            num_touch_points: 5,
            filter_coefficient: 4,
        }
    }
}

/// Decoded field view of a register image.
///
/// Every field is read back raw from the image, including the stored
/// checksum (never recomputed here) and the config-fresh sentinel.
///
/// # Examples
/// ```
/// use gtconf_core::{ConfigSettings, encode_config, parse_config};
///
/// let image = encode_config(&ConfigSettings::default())?;
/// let view = parse_config(&image)?;
/// assert_eq!(view.config_fresh, 0x01);
/// let json = serde_json::to_value(&view).expect("view json");
/// assert_eq!(json["x_max"], 1024);
/// # Ok::<(), gtconf_core::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigView {
    /// Config version byte (register 0x8047).
    pub config_version: u8,
    /// Horizontal resolution (0x8048..0x8049, little-endian).
    pub x_max: u16,
    /// Vertical resolution (0x804A..0x804B, little-endian).
    pub y_max: u16,
    /// Touch point count (0x804C).
    pub num_touch_points: u8,
    /// Module switch 1 (0x804D).
    pub module_switch1: u8,
    /// Module switch 2 (0x804E).
    pub module_switch2: u8,
    /// Shake count (0x804F).
    pub shake_count: u8,
    /// Filter coefficient (0x8050).
    pub filter_coefficient: u8,
    /// Screen touch level (0x8053).
    pub touch_threshold: u8,
    /// Stored checksum byte (0x80FF).
    pub checksum: u8,
    /// Config-fresh sentinel (0x8100).
    pub config_fresh: u8,
}
