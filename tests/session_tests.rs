//! Session tests against a fake HID transport.
//!
//! These tests exercise the shadow register, report encoding, and input
//! decoding without requiring hardware.

use cm108_gpio::{
    Cm108, Error, GpioDirection, HidTransport, InputSignal, PinMask, ReportMode, Result,
    SessionConfig,
};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};

// Records every write and replays queued input reports.
#[derive(Debug, Default)]
struct FakeTransport {
    writes: RefCell<Vec<Vec<u8>>>,
    reports: RefCell<VecDeque<Vec<u8>>>,
    fail_writes: Cell<bool>,
    short_writes: Cell<bool>,
}

impl FakeTransport {
    fn with_reports(reports: &[&[u8]]) -> Self {
        let fake = Self::default();
        fake.reports
            .borrow_mut()
            .extend(reports.iter().map(|r| r.to_vec()));
        fake
    }

    fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }

    fn last_write(&self) -> Option<Vec<u8>> {
        self.writes.borrow().last().cloned()
    }
}

fn hid_error(message: &str) -> Error {
    Error::Hid(hidapi::HidError::HidApiError {
        message: message.to_string(),
    })
}

impl HidTransport for FakeTransport {
    fn write(&self, data: &[u8]) -> Result<usize> {
        if self.fail_writes.get() {
            return Err(hid_error("write failed"));
        }
        self.writes.borrow_mut().push(data.to_vec());
        if self.short_writes.get() {
            Ok(data.len() - 1)
        } else {
            Ok(data.len())
        }
    }

    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        match self.reports.borrow_mut().pop_front() {
            Some(report) => {
                let n = report.len().min(buf.len());
                buf[..n].copy_from_slice(&report[..n]);
                Ok(n)
            }
            None => Err(hid_error("device disconnected")),
        }
    }

    fn read_timeout(&self, buf: &mut [u8], _timeout_ms: i32) -> Result<usize> {
        if self.reports.borrow().is_empty() {
            return Ok(0);
        }
        self.read(buf)
    }

    fn manufacturer_string(&self) -> Result<Option<String>> {
        Ok(Some("C-Media Electronics Inc.".to_string()))
    }

    fn product_string(&self) -> Result<Option<String>> {
        Ok(Some("USB PnP Sound Device".to_string()))
    }

    fn serial_number_string(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

fn open_fake(fake: FakeTransport) -> Cm108<FakeTransport> {
    Cm108::from_transport(fake, &SessionConfig::default()).expect("fake session")
}

#[test]
fn test_fresh_session_frame_is_zero() {
    let device = open_fake(FakeTransport::default());
    assert_eq!(device.shadow().as_bytes(), &[0, 0, 0, 0, 0]);
    // Nothing is sent until the first change
    assert_eq!(device.transport().write_count(), 0);
}

#[test]
fn test_device_info() {
    let device = open_fake(FakeTransport::default());
    let info = device.device_info();
    assert_eq!(info.vendor_id, cm108_gpio::CMEDIA_VID);
    assert_eq!(info.product_id, cm108_gpio::CM119_PID);
    assert_eq!(
        info.manufacturer_string.as_deref(),
        Some("C-Media Electronics Inc.")
    );
    assert_eq!(info.product_string.as_deref(), Some("USB PnP Sound Device"));
    assert_eq!(info.serial_number, None);
}

#[test]
fn test_direction_then_output_scenario() -> Result<()> {
    let mut device = open_fake(FakeTransport::default());

    device.set_directions([(1, GpioDirection::Output), (2, GpioDirection::Input)])?;
    assert_eq!(device.shadow().direction_bits(), 0x01);
    assert_eq!(device.transport().write_count(), 1);
    assert_eq!(device.transport().last_write(), Some(vec![0, 0, 0x00, 0x01, 0]));

    device.set_output(1, true)?;
    assert_eq!(device.shadow().output_bits(), 0x01);
    assert_eq!(device.shadow().direction_bits(), 0x01);
    assert_eq!(device.shadow().as_bytes(), &[0x00, 0x00, 0x01, 0x01, 0x00]);
    assert_eq!(
        device.transport().last_write(),
        Some(vec![0x00, 0x00, 0x01, 0x01, 0x00])
    );
    Ok(())
}

#[test]
fn test_directions_accept_ordered_map() -> Result<()> {
    let mut device = open_fake(FakeTransport::default());
    let modes: BTreeMap<u8, GpioDirection> = (1..=8)
        .map(|pin| (pin, GpioDirection::Output))
        .collect();
    device.set_directions(modes)?;
    assert_eq!(device.shadow().direction_bits(), 0xFF);

    let inputs: BTreeMap<u8, GpioDirection> = [(3, GpioDirection::Input), (8, GpioDirection::Input)]
        .into_iter()
        .collect();
    device.set_directions(inputs)?;
    assert_eq!(device.shadow().direction_bits(), 0b0111_1011);
    // One write per batch
    assert_eq!(device.transport().write_count(), 2);
    Ok(())
}

#[test]
fn test_invalid_pin_leaves_register_untouched() -> Result<()> {
    let mut device = open_fake(FakeTransport::default());
    device.set_directions([(2, GpioDirection::Output)])?;
    device.set_output(2, true)?;
    let before = *device.shadow().as_bytes();
    let writes_before = device.transport().write_count();

    for bad in [0u8, 9, 200] {
        assert!(matches!(
            device.set_output(bad, true),
            Err(Error::InvalidPin { pin }) if pin == bad
        ));
        assert!(matches!(
            device.set_direction(bad, GpioDirection::Output),
            Err(Error::InvalidPin { pin }) if pin == bad
        ));
    }

    assert_eq!(device.shadow().as_bytes(), &before);
    assert_eq!(device.transport().write_count(), writes_before);
    Ok(())
}

#[test]
fn test_invalid_pin_rejects_whole_batch() -> Result<()> {
    let mut device = open_fake(FakeTransport::default());
    let result = device.set_directions([
        (1, GpioDirection::Output),
        (9, GpioDirection::Output),
        (3, GpioDirection::Output),
    ]);
    match result {
        Err(Error::InvalidPin { pin }) => assert_eq!(pin, 9),
        other => panic!("expected InvalidPin, got {:?}", other),
    }
    // Pin 1 came before the bad entry but must not have been applied
    assert_eq!(device.shadow().as_bytes(), &[0, 0, 0, 0, 0]);
    assert_eq!(device.transport().write_count(), 0);
    Ok(())
}

#[test]
fn test_set_output_is_idempotent() -> Result<()> {
    let mut device = open_fake(FakeTransport::default());
    device.set_output(4, true)?;
    let first = device.transport().last_write();
    device.set_output(4, true)?;
    let second = device.transport().last_write();
    assert_eq!(first, second);
    // Every call is flushed, even when nothing changed
    assert_eq!(device.transport().write_count(), 2);
    Ok(())
}

#[test]
fn test_output_ignores_configured_direction() -> Result<()> {
    let mut device = open_fake(FakeTransport::default());
    // Pin 5 is still an input; the output bit is latched anyway
    device.set_output(5, true)?;
    assert_eq!(device.shadow().as_bytes(), &[0x00, 0x00, 0x10, 0x00, 0x00]);
    Ok(())
}

#[test]
fn test_driveable_pin_policy() -> Result<()> {
    let config =
        SessionConfig::default().with_driveable_pins(PinMask::from_pins(&[1, 2, 3, 4])?);
    let mut device = Cm108::from_transport(FakeTransport::default(), &config)?;

    assert!(matches!(
        device.set_directions([(1, GpioDirection::Output), (6, GpioDirection::Output)]),
        Err(Error::PinNotDriveable { pin: 6 })
    ));
    assert!(matches!(
        device.set_output(7, true),
        Err(Error::PinNotDriveable { pin: 7 })
    ));
    assert_eq!(device.shadow().as_bytes(), &[0, 0, 0, 0, 0]);
    assert_eq!(device.transport().write_count(), 0);

    // Non-driveable pins may still be made inputs
    device.set_directions([(1, GpioDirection::Output), (6, GpioDirection::Input)])?;
    device.set_output(1, true)?;
    assert_eq!(device.shadow().as_bytes(), &[0x00, 0x00, 0x01, 0x01, 0x00]);
    Ok(())
}

#[test]
fn test_transport_write_error_is_propagated() {
    let fake = FakeTransport::default();
    fake.fail_writes.set(true);
    let mut device = open_fake(fake);
    assert!(matches!(device.set_output(1, true), Err(Error::Hid(_))));
    // The shadow register only tracks frames the device accepted
    assert_eq!(device.shadow().as_bytes(), &[0, 0, 0, 0, 0]);
}

#[test]
fn test_short_write_is_reported() {
    let fake = FakeTransport::default();
    fake.short_writes.set(true);
    let mut device = open_fake(fake);
    assert!(matches!(
        device.set_direction(1, GpioDirection::Output),
        Err(Error::Io(_))
    ));
    assert_eq!(device.shadow().direction_bits(), 0x00);
}

#[test]
fn test_read_inputs_decodes_report() -> Result<()> {
    let device = open_fake(FakeTransport::with_reports(&[&[0x03, 0b1010_0001, 0, 0]]));
    let report = device.read_inputs()?;

    let states: Vec<(String, bool)> = report.iter().map(|(s, l)| (s.to_string(), l)).collect();
    let expected = [
        ("VOLDN", true),
        ("VOLUP", true),
        ("GPIO1", true),
        ("GPIO2", false),
        ("GPIO3", false),
        ("GPIO4", false),
        ("GPIO5", false),
        ("GPIO6", true),
        ("GPIO7", false),
        ("GPIO8", true),
    ];
    let expected: Vec<(String, bool)> = expected
        .iter()
        .map(|(name, level)| (name.to_string(), *level))
        .collect();
    assert_eq!(states, expected);
    assert!(report.get(InputSignal::VolUp));
    Ok(())
}

#[test]
fn test_read_inputs_does_not_touch_shadow() -> Result<()> {
    let mut device = open_fake(FakeTransport::with_reports(&[&[0x00, 0xFF, 0, 0]]));
    device.set_direction(2, GpioDirection::Output)?;
    let before = *device.shadow().as_bytes();
    device.read_inputs()?;
    assert_eq!(device.shadow().as_bytes(), &before);
    Ok(())
}

#[test]
fn test_read_inputs_rejects_other_sub_modes() {
    let device = open_fake(FakeTransport::with_reports(&[&[0x40, 0x00, 0, 0]]));
    match device.read_inputs() {
        Err(Error::UnexpectedReportMode { byte0, mode }) => {
            assert_eq!(byte0, 0x40);
            assert_eq!(mode, ReportMode::GenericRegisters);
        }
        other => panic!("expected UnexpectedReportMode, got {:?}", other),
    }
}

#[test]
fn test_read_inputs_short_report() {
    let device = open_fake(FakeTransport::with_reports(&[&[0x00, 0x01]]));
    assert!(matches!(device.read_inputs(), Err(Error::InvalidReport(2))));
}

#[test]
fn test_read_inputs_transport_error() {
    let device = open_fake(FakeTransport::default());
    assert!(matches!(device.read_inputs(), Err(Error::Hid(_))));
}

#[test]
fn test_read_inputs_timeout() -> Result<()> {
    let device = open_fake(FakeTransport::with_reports(&[&[0x00, 0x80, 0, 0]]));
    let report = device.read_inputs_timeout(100)?.expect("queued report");
    assert_eq!(report.gpio_bits(), 0x80);
    assert!(device.read_inputs_timeout(100)?.is_none());
    Ok(())
}

#[test]
fn test_boxed_transport() -> Result<()> {
    let transport: Box<dyn HidTransport> = Box::new(FakeTransport::default());
    let mut device = Cm108::from_transport(transport, &SessionConfig::cm108())?;
    assert_eq!(device.device_info().product_id, cm108_gpio::CM108_PID);
    device.set_direction(8, GpioDirection::Output)?;
    assert_eq!(device.shadow().direction_bits(), 0x80);
    device.close();
    Ok(())
}
