/// Full image size: registers 0x8047..=0x8100 inclusive.
pub const CONFIG_LEN: usize = 186;
/// Register address of image index 0.
pub const REGISTER_BASE: u16 = 0x8047;

pub const CONFIG_VERSION_OFFSET: usize = 0;
pub const X_MAX_RANGE: std::ops::Range<usize> = 1..3;
pub const Y_MAX_RANGE: std::ops::Range<usize> = 3..5;
pub const TOUCH_POINTS_OFFSET: usize = 5;
pub const MODULE_SWITCH1_OFFSET: usize = 6;
pub const MODULE_SWITCH2_OFFSET: usize = 7;
pub const SHAKE_COUNT_OFFSET: usize = 8;
pub const FILTER_OFFSET: usize = 9;
pub const TOUCH_LEVEL_OFFSET: usize = 12;
pub const CHECKSUM_OFFSET: usize = 184;
pub const CONFIG_FRESH_OFFSET: usize = 185;

/// Region covered by the checksum byte.
pub const CHECKSUM_RANGE: std::ops::Range<usize> = 0..CHECKSUM_OFFSET;

pub const CONFIG_VERSION: u8 = 0x01;
pub const MODULE_SWITCH1: u8 = 0x00;
pub const MODULE_SWITCH2: u8 = 0x00;
pub const SHAKE_COUNT: u8 = 0x03;
pub const CONFIG_FRESH: u8 = 0x01;

pub const MAX_RESOLUTION: u16 = 4095;
pub const MIN_TOUCH_POINTS: u8 = 1;
pub const MAX_TOUCH_POINTS: u8 = 10;
