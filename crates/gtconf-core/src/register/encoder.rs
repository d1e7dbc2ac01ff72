use super::checksum;
use super::error::ConfigError;
use super::layout;
use super::writer::RegisterWriter;
use crate::ConfigSettings;

/// Check that both resolution axes are even and inside (0, 4095].
pub fn validate(settings: &ConfigSettings) -> Result<(), ConfigError> {
    check_axis("x_max", settings.x_max)?;
    check_axis("y_max", settings.y_max)?;
    Ok(())
}

fn check_axis(axis: &'static str, value: u16) -> Result<(), ConfigError> {
    if value == 0 || value > layout::MAX_RESOLUTION || value % 2 != 0 {
        return Err(ConfigError::InvalidResolution { axis, value });
    }
    Ok(())
}

/// Encode settings into a full register image.
///
/// Deterministic: equal settings yield equal images. `num_touch_points` is
/// silently clamped into 1..=10; `filter_coefficient` keeps its low byte;
/// `touch_threshold` is floored to 1 and then truncated to a byte, so 256
/// wraps to 0. Bytes not assigned a field stay zero, the checksum lands at
/// offset 184 and the config-fresh sentinel at offset 185.
pub fn encode_config(settings: &ConfigSettings) -> Result<[u8; layout::CONFIG_LEN], ConfigError> {
    validate(settings)?;

    let mut image = [0u8; layout::CONFIG_LEN];
    {
        let mut writer = RegisterWriter::new(&mut image);
        writer.write_u8(layout::CONFIG_VERSION_OFFSET, layout::CONFIG_VERSION);
        writer.write_u16_le(layout::X_MAX_RANGE, settings.x_max);
        writer.write_u16_le(layout::Y_MAX_RANGE, settings.y_max);
        writer.write_u8(
            layout::TOUCH_POINTS_OFFSET,
            settings
                .num_touch_points
                .clamp(layout::MIN_TOUCH_POINTS, layout::MAX_TOUCH_POINTS),
        );
        writer.write_u8(layout::MODULE_SWITCH1_OFFSET, layout::MODULE_SWITCH1);
        writer.write_u8(layout::MODULE_SWITCH2_OFFSET, layout::MODULE_SWITCH2);
        writer.write_u8(layout::SHAKE_COUNT_OFFSET, layout::SHAKE_COUNT);
        writer.write_u8(layout::FILTER_OFFSET, (settings.filter_coefficient & 0xFF) as u8);
        writer.write_u8(layout::TOUCH_LEVEL_OFFSET, settings.touch_threshold.max(1) as u8);
    }

    let sum = checksum::compute(&image[layout::CHECKSUM_RANGE]);
    let mut writer = RegisterWriter::new(&mut image);
    writer.write_u8(layout::CHECKSUM_OFFSET, sum);
    writer.write_u8(layout::CONFIG_FRESH_OFFSET, layout::CONFIG_FRESH);

    Ok(image)
}
