use super::error::ConfigError;
use super::layout;
use super::reader::RegisterReader;
use crate::ConfigView;

/// Decode a register image into its field view.
///
/// Pure extraction: the stored checksum is reported as-is and never
/// recomputed here; callers wanting integrity confirmation use
/// `checksum::verify_image`.
pub fn parse_config(image: &[u8]) -> Result<ConfigView, ConfigError> {
    let reader = RegisterReader::new(image)?;

    Ok(ConfigView {
        config_version: reader.read_u8(layout::CONFIG_VERSION_OFFSET),
        x_max: reader.read_u16_le(layout::X_MAX_RANGE),
        y_max: reader.read_u16_le(layout::Y_MAX_RANGE),
        num_touch_points: reader.read_u8(layout::TOUCH_POINTS_OFFSET),
        module_switch1: reader.read_u8(layout::MODULE_SWITCH1_OFFSET),
        module_switch2: reader.read_u8(layout::MODULE_SWITCH2_OFFSET),
        shake_count: reader.read_u8(layout::SHAKE_COUNT_OFFSET),
        filter_coefficient: reader.read_u8(layout::FILTER_OFFSET),
        touch_threshold: reader.read_u8(layout::TOUCH_LEVEL_OFFSET),
        checksum: reader.read_u8(layout::CHECKSUM_OFFSET),
        config_fresh: reader.read_u8(layout::CONFIG_FRESH_OFFSET),
    })
}
