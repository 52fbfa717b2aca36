use crate::consts;
use crate::error::{Error, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpioDirection {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpioLevel {
    Low,
    High,
}

impl GpioLevel {
    #[inline]
    pub fn is_high(self) -> bool {
        self == GpioLevel::High
    }
}

impl From<bool> for GpioLevel {
    fn from(high: bool) -> Self {
        if high {
            GpioLevel::High
        } else {
            GpioLevel::Low
        }
    }
}

impl From<GpioLevel> for bool {
    fn from(level: GpioLevel) -> Self {
        level.is_high()
    }
}

/// Represents a valid GPIO pin number (1-8), as printed on the CM108/CM119
/// datasheets (GPIO1-GPIO8).
/// Use `GpioPin::new(num)` to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GpioPin(u8);

impl GpioPin {
    /// Creates a new GpioPin, returning `Error::InvalidPin` if the number is out of range (1-8).
    pub fn new(pin_num: u8) -> Result<Self> {
        if (1..=consts::GPIO_COUNT).contains(&pin_num) {
            Ok(GpioPin(pin_num))
        } else {
            Err(Error::InvalidPin { pin: pin_num })
        }
    }

    /// Iterates over GPIO1..GPIO8 in order.
    pub fn all() -> impl Iterator<Item = GpioPin> {
        (1..=consts::GPIO_COUNT).map(GpioPin)
    }

    /// Returns the pin number (1-8).
    #[inline]
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Returns the bit index (0-7) of this pin in the report bytes.
    #[inline]
    pub fn bit_index(&self) -> u8 {
        self.0 - 1
    }

    /// Returns the bit mask (1 << bit_index) for report bytes.
    #[inline]
    pub fn mask(&self) -> u8 {
        1u8 << self.bit_index()
    }
}

impl TryFrom<u8> for GpioPin {
    type Error = Error;

    fn try_from(pin_num: u8) -> Result<Self> {
        GpioPin::new(pin_num)
    }
}

impl fmt::Display for GpioPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

/// A set of GPIO pins, stored as one bit per pin (bit n-1 = pin n).
///
/// Used by [`SessionConfig`](crate::SessionConfig) to describe which pins
/// are wired so that driving them is safe. What counts as safe depends on
/// the board the codec is soldered to, so the policy is supplied by the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinMask(u8);

impl PinMask {
    pub const NONE: PinMask = PinMask(0x00);
    pub const ALL: PinMask = PinMask(0xFF);

    /// Builds a mask from raw bits (bit n-1 = pin n).
    pub const fn from_bits(bits: u8) -> Self {
        PinMask(bits)
    }

    /// Builds a mask from pin numbers, rejecting any outside 1-8.
    pub fn from_pins(pins: &[u8]) -> Result<Self> {
        pins.iter().try_fold(PinMask::NONE, |mask, &num| {
            Ok(mask.with(GpioPin::new(num)?))
        })
    }

    #[inline]
    pub fn bits(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(&self, pin: GpioPin) -> bool {
        self.0 & pin.mask() != 0
    }

    #[must_use]
    pub fn with(self, pin: GpioPin) -> Self {
        PinMask(self.0 | pin.mask())
    }

    /// Iterates over the pins in the mask in ascending order.
    pub fn pins(&self) -> impl Iterator<Item = GpioPin> + '_ {
        GpioPin::all().filter(move |pin| self.contains(*pin))
    }
}

impl Default for PinMask {
    fn default() -> Self {
        PinMask::ALL
    }
}
