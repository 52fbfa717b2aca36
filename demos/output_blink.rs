//! Blinks one GPIO output until Ctrl-C.
//!
//! Only GPIO1-4 are wired as outputs on the repeater interface board; the
//! other pins carry input signals and driving them may damage hardware.

use anyhow::Context;
use clap::Parser;
use cm108_gpio::{Cm108, Error, GpioDirection, PinMask};
use colored::Colorize;
use hidapi::HidApi;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::{thread, time::Duration};

mod common;

const BOARD_OUTPUT_PINS: PinMask = PinMask::from_bits(0x0F);

#[derive(Debug, Parser)]
#[command(about = "Blink a CM108/CM119 GPIO output. Ctrl-C to stop.")]
struct Cli {
    #[command(flatten)]
    device: common::DeviceArgs,
    /// Pin to blink (1-8)
    #[arg(long)]
    pin: u8,
    /// Time to wait between toggles, in seconds
    #[arg(long, default_value_t = 0.5)]
    delay: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop_clone = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            stop_clone.store(true, Ordering::Relaxed);
        })
        .context("failed to install Ctrl-C handler")?;
    }

    let hid_api = HidApi::new().context("failed to initialise HID API")?;
    let config = cli.device.config().with_driveable_pins(BOARD_OUTPUT_PINS);
    let mut device = Cm108::open_with_config(&hid_api, &config).with_context(|| {
        format!(
            "failed to open device {:04X}:{:04X}",
            cli.device.vid, cli.device.pid
        )
    })?;

    match device.set_direction(cli.pin, GpioDirection::Output) {
        Ok(()) => {}
        Err(Error::PinNotDriveable { pin }) => {
            eprintln!(
                "{}",
                format!(
                    "GPIO{} is not used as an output on the interface board. HW damage may occur",
                    pin
                )
                .red()
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let delay = Duration::from_secs_f64(cli.delay);
    println!("Blinking GPIO{} (Press Ctrl+C to stop)", cli.pin);
    while !stop.load(Ordering::Relaxed) {
        device.set_output(cli.pin, true)?;
        thread::sleep(delay);
        device.set_output(cli.pin, false)?;
        thread::sleep(delay);
    }

    println!("Closing device");
    device.close();
    Ok(())
}
