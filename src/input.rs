//! Decoding of the 4-byte CM108 HID input report.
//!
//! Byte 0 carries the volume buttons and the report sub-mode (bits 7:6),
//! byte 1 the GPIO input levels. Bytes 2 and 3 are generic registers written
//! by a host MCU and are ignored.

use crate::consts::input;
use crate::error::{Error, Result};
use crate::gpio::{GpioLevel, GpioPin};
use log::{trace, warn};
use std::fmt;

/// Meaning of bits 7:6 of input report byte 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Byte 1 carries the GPIO input register.
    GpioInput,
    /// Bytes 0-3 are generic HID registers.
    GenericRegisters,
    /// Bytes 0-3 are mapped to the MCU_CTRL and EEPROM registers.
    EepromMapped,
    Reserved,
}

impl ReportMode {
    pub fn from_byte0(byte0: u8) -> Self {
        match (byte0 & input::MODE_MASK) >> input::MODE_SHIFT {
            input::MODE_GPIO_INPUT => ReportMode::GpioInput,
            input::MODE_GENERIC_REGISTERS => ReportMode::GenericRegisters,
            input::MODE_EEPROM_MAPPED => ReportMode::EepromMapped,
            _ => ReportMode::Reserved,
        }
    }
}

/// A named signal carried by the input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSignal {
    VolDown,
    VolUp,
    Gpio(GpioPin),
}

impl InputSignal {
    /// Signals in the fixed order used by [`InputReport::iter`]: VOLDN, VOLUP, GPIO1..GPIO8.
    pub fn all() -> impl Iterator<Item = InputSignal> {
        [InputSignal::VolDown, InputSignal::VolUp]
            .into_iter()
            .chain(GpioPin::all().map(InputSignal::Gpio))
    }
}

impl fmt::Display for InputSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSignal::VolDown => f.write_str("VOLDN"),
            InputSignal::VolUp => f.write_str("VOLUP"),
            InputSignal::Gpio(pin) => write!(f, "{}", pin),
        }
    }
}

/// A decoded GPIO input report.
///
/// The volume button bits are reported raw; on the CM119 they read 0 while
/// the button is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputReport {
    raw: [u8; input::REPORT_SIZE],
}

impl InputReport {
    /// Decodes an input report, checking its length and sub-mode.
    ///
    /// Returns `Error::InvalidReport` if fewer than 4 bytes are supplied and
    /// `Error::UnexpectedReportMode` if bits 7:6 of byte 0 are not `00`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < input::REPORT_SIZE {
            warn!("Received short input report ({} bytes)", data.len());
            return Err(Error::InvalidReport(data.len()));
        }
        let mut raw = [0u8; input::REPORT_SIZE];
        raw.copy_from_slice(&data[..input::REPORT_SIZE]);
        trace!("Input report: {:02X?}", raw);

        let byte0 = raw[input::BYTE_BUTTONS];
        let mode = ReportMode::from_byte0(byte0);
        if mode != ReportMode::GpioInput {
            warn!(
                "Input report is not in GPIO input sub-mode: byte0=0x{:02X} ({:?})",
                byte0, mode
            );
            return Err(Error::UnexpectedReportMode { byte0, mode });
        }
        Ok(Self { raw })
    }

    /// The four bytes as read from the device.
    #[inline]
    pub fn raw(&self) -> &[u8; input::REPORT_SIZE] {
        &self.raw
    }

    /// GPIO input register (bit n-1 = GPIO n).
    #[inline]
    pub fn gpio_bits(&self) -> u8 {
        self.raw[input::BYTE_GPIO]
    }

    pub fn gpio(&self, pin: GpioPin) -> GpioLevel {
        GpioLevel::from(self.gpio_bits() & pin.mask() != 0)
    }

    pub fn vol_up(&self) -> bool {
        self.raw[input::BYTE_BUTTONS] & input::VOLUP != 0
    }

    pub fn vol_down(&self) -> bool {
        self.raw[input::BYTE_BUTTONS] & input::VOLDN != 0
    }

    /// Playback mute button (1 = pressed).
    pub fn playback_mute(&self) -> bool {
        self.raw[input::BYTE_BUTTONS] & input::PLAYBACK_MUTE != 0
    }

    /// Record mute button (1 = pressed).
    pub fn record_mute(&self) -> bool {
        self.raw[input::BYTE_BUTTONS] & input::RECORD_MUTE != 0
    }

    /// Level of a single named signal.
    pub fn get(&self, signal: InputSignal) -> bool {
        match signal {
            InputSignal::VolDown => self.vol_down(),
            InputSignal::VolUp => self.vol_up(),
            InputSignal::Gpio(pin) => self.gpio(pin).is_high(),
        }
    }

    /// All signals with their levels, in the order VOLDN, VOLUP, GPIO1..GPIO8.
    pub fn iter(&self) -> impl Iterator<Item = (InputSignal, bool)> + '_ {
        InputSignal::all().map(move |signal| (signal, self.get(signal)))
    }
}
