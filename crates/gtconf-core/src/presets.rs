//! Built-in display presets.
//!
//! Canned settings bundles for panels commonly paired with the GT911. All
//! presets validate and encode as-is; the CLI treats them exactly like
//! hand-entered settings.

use crate::ConfigSettings;

/// Preset used when the caller names none.
pub const DEFAULT_PRESET: &str = "7inch";

/// Built-in presets in stable listing order.
pub const PRESETS: &[(&str, ConfigSettings)] = &[
    (
        "7inch",
        ConfigSettings {
            x_max: 1024,
            y_max: 600,
            touch_threshold: 16,
            num_touch_points: 5,
            filter_coefficient: 4,
        },
    ),
    (
        "5inch",
        ConfigSettings {
            x_max: 800,
            y_max: 480,
            touch_threshold: 20,
            num_touch_points: 5,
            filter_coefficient: 4,
        },
    ),
    (
        "waveshare7",
        ConfigSettings {
            x_max: 1280,
            y_max: 800,
            touch_threshold: 28,
            num_touch_points: 5,
            filter_coefficient: 4,
        },
    ),
];

/// Look up a preset by name.
///
/// # Examples
/// ```
/// use gtconf_core::presets;
///
/// let seven = presets::preset("7inch").expect("known preset");
/// assert_eq!(seven.x_max, 1024);
/// assert!(presets::preset("42inch").is_none());
/// ```
pub fn preset(name: &str) -> Option<ConfigSettings> {
    PRESETS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, settings)| *settings)
}

/// Names of all built-in presets, in listing order.
pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|(name, _)| *name).collect()
}
