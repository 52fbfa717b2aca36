//! GPIO session management for CM108/CM119 HID devices.

use crate::consts;
use crate::error::{Error, Result};
use crate::gpio::{GpioDirection, GpioLevel, GpioPin, PinMask};
use crate::input::InputReport;
use crate::shadow::ShadowRegister;
use crate::transport::HidTransport;
use hidapi::{HidApi, HidDevice};
use log::{debug, trace, warn};

/// Settings used when opening a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// USB vendor ID to open.
    pub vid: u16,
    /// USB product ID to open.
    pub pid: u16,
    /// Pins that may be configured as outputs or driven. Defaults to all.
    pub driveable_pins: PinMask,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            vid: consts::CMEDIA_VID,
            pid: consts::CM119_PID,
            driveable_pins: PinMask::ALL,
        }
    }
}

impl SessionConfig {
    /// Default settings for a CM108 (PID 0x000C).
    pub fn cm108() -> Self {
        Self {
            pid: consts::CM108_PID,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_vid_pid(mut self, vid: u16, pid: u16) -> Self {
        self.vid = vid;
        self.pid = pid;
        self
    }

    /// Restricts which pins this session will configure as outputs or drive.
    #[must_use]
    pub fn with_driveable_pins(mut self, pins: PinMask) -> Self {
        self.driveable_pins = pins;
        self
    }
}

/// Holds basic information about an opened device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub manufacturer_string: Option<String>,
    pub product_string: Option<String>,
    pub serial_number: Option<String>,
}

/// A GPIO session on one CM108/CM119 device.
///
/// The device cannot report its GPIO configuration, so the session keeps a
/// [`ShadowRegister`] with the last frame it sent. Each direction or output
/// change updates that copy and then writes the complete frame.
///
/// Mutating methods take `&mut self`. Callers sharing a session between
/// threads must wrap it in a mutex themselves.
#[derive(Debug)]
pub struct Cm108<T: HidTransport = HidDevice> {
    transport: T,
    info: DeviceInfo,
    shadow: ShadowRegister,
    driveable_pins: PinMask,
}

impl Cm108<HidDevice> {
    /// Opens the first device matching the default CM119 VID/PID.
    pub fn open_default(hid_api: &HidApi) -> Result<Self> {
        Self::open_with_config(hid_api, &SessionConfig::default())
    }

    /// Opens a device by its Vendor ID and Product ID. **Warning:** Ambiguous if multiple devices match.
    pub fn open(hid_api: &HidApi, vid: u16, pid: u16) -> Result<Self> {
        Self::open_with_config(hid_api, &SessionConfig::default().with_vid_pid(vid, pid))
    }

    pub fn open_with_config(hid_api: &HidApi, config: &SessionConfig) -> Result<Self> {
        let device = hid_api.open(config.vid, config.pid)?;
        debug!(
            "Opened CM108 device: VID={:04X}, PID={:04X}",
            config.vid, config.pid
        );
        Self::from_transport(device, config)
    }
}

impl<T: HidTransport> Cm108<T> {
    /// Starts a session over an already opened transport.
    ///
    /// Reads the descriptor strings once. The shadow register starts zeroed
    /// (all inputs, outputs low); nothing is written to the device until the
    /// first direction or output change.
    pub fn from_transport(transport: T, config: &SessionConfig) -> Result<Self> {
        let info = DeviceInfo {
            vendor_id: config.vid,
            product_id: config.pid,
            manufacturer_string: transport.manufacturer_string()?,
            product_string: transport.product_string()?,
            serial_number: transport.serial_number_string()?,
        };
        trace!("Device Info: {:?}", info);

        Ok(Self {
            transport,
            info,
            shadow: ShadowRegister::new(),
            driveable_pins: config.driveable_pins,
        })
    }

    /// Gets basic information about the opened device.
    pub fn device_info(&self) -> &DeviceInfo {
        &self.info
    }

    /// The frame most recently committed to the shadow register.
    pub fn shadow(&self) -> &ShadowRegister {
        &self.shadow
    }

    pub fn driveable_pins(&self) -> PinMask {
        self.driveable_pins
    }

    /// Borrows the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Ends the session and releases the transport.
    ///
    /// The device keeps whatever configuration was last written; no pins are
    /// reset.
    pub fn close(self) {
        debug!(
            "Closing CM108 device: VID={:04X}, PID={:04X}",
            self.info.vendor_id, self.info.product_id
        );
    }

    fn check_driveable(&self, pin: GpioPin) -> Result<()> {
        if self.driveable_pins.contains(pin) {
            Ok(())
        } else {
            Err(Error::PinNotDriveable { pin: pin.number() })
        }
    }

    // Writes `next` and adopts it as the shadow register only once the device accepted it.
    fn commit(&mut self, next: ShadowRegister) -> Result<()> {
        let frame = next.as_bytes();
        trace!("Writing output report: {:02X?}", &frame[..]);
        let bytes_written = self.transport.write(frame)?;
        if bytes_written != frame.len() {
            warn!(
                "hidapi write returned unexpected length: {} (expected {})",
                bytes_written,
                frame.len()
            );
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "Incomplete HID write",
            )));
        }
        self.shadow = next;
        Ok(())
    }

    // --- Direction ---
    /// Configures the direction of several pins with a single report write.
    ///
    /// Pins not listed keep their current direction. The shadow register is
    /// only updated if the write succeeds. Every entry is checked
    /// before any bit changes: an invalid pin fails with `Error::InvalidPin`
    /// and a pin outside the driveable set requested as an output fails with
    /// `Error::PinNotDriveable`, leaving the shadow register untouched.
    pub fn set_directions<I>(&mut self, updates: I) -> Result<()>
    where
        I: IntoIterator<Item = (u8, GpioDirection)>,
    {
        let validated = updates
            .into_iter()
            .map(|(num, direction)| {
                let pin = GpioPin::new(num)?;
                if direction == GpioDirection::Output {
                    self.check_driveable(pin)?;
                }
                Ok((pin, direction))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut next = self.shadow;
        for (pin, direction) in validated {
            debug!("Setting direction {}: {:?}", pin, direction);
            next.apply_direction(pin, direction);
        }
        self.commit(next)
    }

    /// Configures the direction of a single pin.
    pub fn set_direction(&mut self, pin: u8, direction: GpioDirection) -> Result<()> {
        self.set_directions([(pin, direction)])
    }

    // --- Output ---
    /// Sets the output level of a pin and writes the report immediately.
    ///
    /// The pin's configured direction is not checked; the level is latched in
    /// the output byte either way and takes effect once the pin is an output.
    pub fn set_output(&mut self, pin: u8, level: impl Into<GpioLevel>) -> Result<()> {
        let pin = GpioPin::new(pin)?;
        self.check_driveable(pin)?;
        let level = level.into();
        trace!("Setting output {}: {:?}", pin, level);
        let mut next = self.shadow;
        next.apply_output(pin, level);
        self.commit(next)
    }

    // --- Input ---
    /// Waits for the next input report and decodes it.
    ///
    /// Blocks until the device sends a report or the transport fails. Use
    /// [`read_inputs_timeout`](Self::read_inputs_timeout) to bound the wait.
    pub fn read_inputs(&self) -> Result<InputReport> {
        let mut buf = [0u8; consts::input::REPORT_SIZE];
        let bytes_read = self.transport.read(&mut buf)?;
        InputReport::parse(&buf[..bytes_read])
    }

    /// Waits up to `timeout_ms` for an input report.
    ///
    /// Returns `Ok(None)` if nothing arrived in time.
    pub fn read_inputs_timeout(&self, timeout_ms: i32) -> Result<Option<InputReport>> {
        let mut buf = [0u8; consts::input::REPORT_SIZE];
        let bytes_read = self.transport.read_timeout(&mut buf, timeout_ms)?;
        if bytes_read == 0 {
            trace!("No input report within {} ms", timeout_ms);
            return Ok(None);
        }
        InputReport::parse(&buf[..bytes_read]).map(Some)
    }
}
