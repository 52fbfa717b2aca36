//! # cm108-gpio
//!
//! A Rust crate for controlling the eight GPIO pins of C-Media CM108 and
//! CM119 USB audio codecs via their USB HID interface. These pins are
//! commonly used to key radios or read status lines from repeater
//! controllers.
//!
//! This crate uses the `hidapi` crate for cross-platform USB HID communication.
//!
//! ## Features
//!
//! *   Opening a device by VID/PID (`Cm108::open`, `Cm108::open_default`, `Cm108::open_with_config`).
//! *   Reading descriptor strings (`device_info`).
//! *   GPIO control (pins 1-8, numbered as GPIO1-GPIO8 on the datasheet):
//!     *   Strongly-typed `GpioPin`, `GpioDirection` and `GpioLevel`.
//!     *   Batched direction changes in a single report (`set_directions`).
//!     *   Driving output levels (`set_output`).
//!     *   Reading input reports, blocking (`read_inputs`) or bounded (`read_inputs_timeout`).
//! *   An optional allow-list of pins that may be driven (`SessionConfig::with_driveable_pins`).
//!
//! ## Write-only state
//!
//! The CM108 accepts a 5-byte output report carrying the output levels and
//! the direction register, but has no way to read either back. Each session
//! keeps a [`ShadowRegister`] holding the last frame it sent; every change
//! is applied to that copy first and then the full frame is written. Pins
//! you don't mention keep their previous settings.
//!
//! Closing a session does not reset the pins. The device keeps driving
//! whatever was last written until it is unplugged or another program
//! writes a new report.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use cm108_gpio::{Cm108, GpioDirection, Result};
//! use hidapi::HidApi;
//! use std::{thread, time::Duration};
//!
//! fn main() -> Result<()> {
//!     // Optional: Initialize logging
//!     // env_logger::init();
//!
//!     let hid_api = HidApi::new()?;
//!     let mut device = Cm108::open_default(&hid_api)?;
//!     println!("Opened: {:?}", device.device_info());
//!
//!     // GPIO1 as output, GPIO2 as input, others unchanged
//!     device.set_directions([(1, GpioDirection::Output), (2, GpioDirection::Input)])?;
//!
//!     device.set_output(1, true)?;
//!     thread::sleep(Duration::from_millis(200));
//!     device.set_output(1, false)?;
//!
//!     // Wait for the next input report
//!     let report = device.read_inputs()?;
//!     for (signal, level) in report.iter() {
//!         println!("{}: {}", signal, level);
//!     }
//!
//!     device.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Hardware Setup Notes
//!
//! *   **Linux udev Rules:** Grant user permission to the HID device. Create `/etc/udev/rules.d/99-cm108.rules`:
//!     ```udev
//!     # C-Media CM119 / CM108
//!     SUBSYSTEM=="hidraw", ATTRS{idVendor}=="0d8c", ATTRS{idProduct}=="013a", MODE="0666", GROUP="plugdev"
//!     SUBSYSTEM=="hidraw", ATTRS{idVendor}=="0d8c", ATTRS{idProduct}=="000c", MODE="0666", GROUP="plugdev"
//!     ```
//!     Reload: `sudo udevadm control --reload-rules && sudo udevadm trigger`
//! *   **Output safety:** Which pins can be driven safely depends on how the
//!     codec is wired. Restrict the session with `SessionConfig::with_driveable_pins`.
//!
//! ## License
//!
//! This project is licensed under the WTFPL.

mod consts;
mod device;
mod error;
pub mod gpio;
pub mod input;
pub mod shadow;
pub mod transport;

pub use consts::{CM108_PID, CM119_PID, CMEDIA_VID};
pub use device::{Cm108, DeviceInfo, SessionConfig};
pub use error::{Error, Result};
pub use gpio::{GpioDirection, GpioLevel, GpioPin, PinMask};
pub use input::{InputReport, InputSignal, ReportMode};
pub use shadow::ShadowRegister;
pub use transport::HidTransport;
