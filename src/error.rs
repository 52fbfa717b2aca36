use crate::input::ReportMode;
use thiserror::Error;

/// Errors that can occur when using CM108/CM119 devices.
///
/// Transport failures are passed through unchanged; this crate adds no
/// retries. Pin and policy errors are raised before the shadow register is
/// touched, so a failed call never leaves a partially applied update.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from the underlying HID API layer (open, write, read, disconnect).
    #[error("HID API error: {0}")]
    Hid(#[from] hidapi::HidError),
    /// General I/O error during device communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// GPIO pin number is outside 1-8.
    #[error("Illegal GPIO number {pin}: pins are numbered 1-8")]
    InvalidPin {
        /// The invalid pin number that was specified.
        pin: u8,
    },
    /// The pin is not in the session's set of driveable pins.
    #[error("GPIO {pin} may not be driven as an output by this session's pin policy")]
    PinNotDriveable {
        /// The pin that was refused.
        pin: u8,
    },
    /// An input report arrived in a sub-mode other than GPIO input.
    #[error(
        "Unexpected input report sub-mode {mode:?} (byte 0 = 0x{byte0:02X}); expected GPIO input (bits 7:6 clear)"
    )]
    UnexpectedReportMode {
        /// Raw first byte of the report.
        byte0: u8,
        /// Sub-mode decoded from bits 7:6.
        mode: ReportMode,
    },
    /// Input report was shorter than expected.
    #[error("Invalid HID report received or unexpected size ({0} bytes)")]
    InvalidReport(usize),
}

/// Result type alias for CM108 operations.
pub type Result<T> = std::result::Result<T, Error>;
