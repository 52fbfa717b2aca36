//! Host-side copy of the CM108 GPIO output report.
//!
//! The codec never reports its GPIO direction or output configuration back
//! to the host, so every change is made against this cached frame and the
//! whole frame is written out afterwards.

use crate::consts::output;
use crate::gpio::{GpioDirection, GpioLevel, GpioPin};

/// The 5-byte HID output report last commanded by the host.
///
/// Layout: `[report id, mode/buzzer/SPDIF, output bits, direction bits, SPDIF category]`.
/// Only the output and direction bytes are ever modified; the others stay
/// zero, which selects GPIO mode with the buzzer off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowRegister {
    frame: [u8; output::REPORT_SIZE],
}

impl ShadowRegister {
    /// Returns the power-on frame: all pins inputs, all outputs low.
    pub fn new() -> Self {
        let mut frame = [0u8; output::REPORT_SIZE];
        frame[output::BYTE_REPORT_ID] = output::REPORT_ID;
        Self { frame }
    }

    /// Sets or clears the direction bit for `pin`. Does not touch the output byte.
    pub fn apply_direction(&mut self, pin: GpioPin, direction: GpioDirection) {
        let byte = &mut self.frame[output::BYTE_DIRECTION];
        match direction {
            GpioDirection::Output => *byte |= pin.mask(),
            GpioDirection::Input => *byte &= !pin.mask(),
        }
    }

    /// Sets or clears the output driver bit for `pin`. Does not touch the direction byte.
    pub fn apply_output(&mut self, pin: GpioPin, level: GpioLevel) {
        let byte = &mut self.frame[output::BYTE_OUTPUT];
        match level {
            GpioLevel::High => *byte |= pin.mask(),
            GpioLevel::Low => *byte &= !pin.mask(),
        }
    }

    /// Returns the frame exactly as it is written to the device.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; output::REPORT_SIZE] {
        &self.frame
    }

    #[inline]
    pub fn output_bits(&self) -> u8 {
        self.frame[output::BYTE_OUTPUT]
    }

    #[inline]
    pub fn direction_bits(&self) -> u8 {
        self.frame[output::BYTE_DIRECTION]
    }

    /// Last-commanded direction of `pin`.
    pub fn direction(&self, pin: GpioPin) -> GpioDirection {
        if self.direction_bits() & pin.mask() != 0 {
            GpioDirection::Output
        } else {
            GpioDirection::Input
        }
    }

    /// Last-commanded output level of `pin`. Meaningless while the pin is an input.
    pub fn output_level(&self, pin: GpioPin) -> GpioLevel {
        GpioLevel::from(self.output_bits() & pin.mask() != 0)
    }
}

impl Default for ShadowRegister {
    fn default() -> Self {
        Self::new()
    }
}
