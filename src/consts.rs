//! Internal constants, report layouts, and bit definitions.

// Default Vendor/Product IDs
/// C-Media Electronics vendor ID.
pub const CMEDIA_VID: u16 = 0x0D8C;
/// Product ID of the CM119 USB audio codec.
pub const CM119_PID: u16 = 0x013A;
/// Product ID of the CM108 USB audio codec (same GPIO report layout).
pub const CM108_PID: u16 = 0x000C;

/// Number of GPIO pins exposed through the HID reports.
pub const GPIO_COUNT: u8 = 8;

// --- HID Output Report (host -> device) ---
// Report number (0x00) followed by 4 payload bytes. hidapi expects the
// report number as the first byte of the write buffer.
pub mod output {
    pub const REPORT_SIZE: usize = 5;
    pub const REPORT_ID: u8 = 0x00;

    // Byte offsets
    pub const BYTE_REPORT_ID: usize = 0;
    /// Mode, buzzer, and SPDIF control. Always 0: GPIO mode, buzzer off.
    #[allow(dead_code)]
    pub const BYTE_MODE: usize = 1;
    pub const BYTE_OUTPUT: usize = 2;
    pub const BYTE_DIRECTION: usize = 3;
    /// SPDIF category byte (not used).
    #[allow(dead_code)]
    pub const BYTE_SPDIF_CATEGORY: usize = 4;
}

// --- HID Input Report (device -> host) ---
pub mod input {
    pub const REPORT_SIZE: usize = 4;

    pub const BYTE_BUTTONS: usize = 0;
    pub const BYTE_GPIO: usize = 1;

    // Byte 0 bits
    pub const VOLUP: u8 = 1 << 0;
    pub const VOLDN: u8 = 1 << 1;
    pub const PLAYBACK_MUTE: u8 = 1 << 2;
    pub const RECORD_MUTE: u8 = 1 << 3;
    // Bits 5:4 generic register written by host MCU (not used)
    pub const MODE_MASK: u8 = 0b1100_0000;
    pub const MODE_SHIFT: u8 = 6;

    // Sub-mode values (bits 7:6 of byte 0)
    pub const MODE_GPIO_INPUT: u8 = 0b00;
    pub const MODE_GENERIC_REGISTERS: u8 = 0b01;
    pub const MODE_EEPROM_MAPPED: u8 = 0b10;
}
