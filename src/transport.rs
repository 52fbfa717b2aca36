//! The HID channel a [`Cm108`](crate::Cm108) session talks through.

use crate::error::Result;
use hidapi::HidDevice;

/// Minimal HID capability needed by a GPIO session.
///
/// Implemented for [`hidapi::HidDevice`]. Tests and alternative backends can
/// provide their own implementation. Closing is expressed by dropping the
/// value.
pub trait HidTransport {
    /// Writes an output report. The first byte is the report number.
    /// Returns the number of bytes written.
    fn write(&self, data: &[u8]) -> Result<usize>;

    /// Blocks until an input report arrives and copies it into `buf`.
    fn read(&self, buf: &mut [u8]) -> Result<usize>;

    /// Like [`read`](Self::read) but gives up after `timeout_ms`, returning 0.
    /// A negative timeout blocks indefinitely.
    fn read_timeout(&self, buf: &mut [u8], timeout_ms: i32) -> Result<usize>;

    fn manufacturer_string(&self) -> Result<Option<String>>;
    fn product_string(&self) -> Result<Option<String>>;
    fn serial_number_string(&self) -> Result<Option<String>>;
}

impl HidTransport for HidDevice {
    fn write(&self, data: &[u8]) -> Result<usize> {
        Ok(HidDevice::write(self, data)?)
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        Ok(HidDevice::read(self, buf)?)
    }

    fn read_timeout(&self, buf: &mut [u8], timeout_ms: i32) -> Result<usize> {
        Ok(HidDevice::read_timeout(self, buf, timeout_ms)?)
    }

    fn manufacturer_string(&self) -> Result<Option<String>> {
        Ok(self.get_manufacturer_string()?)
    }

    fn product_string(&self) -> Result<Option<String>> {
        Ok(self.get_product_string()?)
    }

    fn serial_number_string(&self) -> Result<Option<String>> {
        Ok(self.get_serial_number_string()?)
    }
}

impl<T: HidTransport + ?Sized> HidTransport for Box<T> {
    fn write(&self, data: &[u8]) -> Result<usize> {
        (**self).write(data)
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }

    fn read_timeout(&self, buf: &mut [u8], timeout_ms: i32) -> Result<usize> {
        (**self).read_timeout(buf, timeout_ms)
    }

    fn manufacturer_string(&self) -> Result<Option<String>> {
        (**self).manufacturer_string()
    }

    fn product_string(&self) -> Result<Option<String>> {
        (**self).product_string()
    }

    fn serial_number_string(&self) -> Result<Option<String>> {
        (**self).serial_number_string()
    }
}
