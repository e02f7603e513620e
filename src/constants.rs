pub const BAUD_RATE: u32 = 9600;
pub const SERIAL_TIMEOUT_MS: u64 = 1000;
pub const MAX_RESPONSE_SIZE: usize = 256;

pub const DEFAULT_PORT: &str = "/dev/ttyACM0";

/// Number of pressure sensors on the pad
pub const SENSORS_COUNT: usize = 4;

// Arduino Leonardo / Micro, application and bootloader product ids
pub const BOARD_PRODUCT_IDS: [u16; 4] = [0x8036, 0x8037, 0x0036, 0x0037];
