//! Monitors all pins for changes. Expects an ANSI colour terminal.

use anyhow::Context;
use clap::Parser;
use cm108_gpio::{Cm108, GpioDirection, InputSignal};
use colored::{ColoredString, Colorize};
use hidapi::HidApi;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod common;

// Short enough that Ctrl-C feels immediate
const POLL_TIMEOUT_MS: i32 = 100;

#[derive(Debug, Parser)]
#[command(about = "Show CM108/CM119 input pin states. Ctrl-C to stop.")]
struct Cli {
    #[command(flatten)]
    device: common::DeviceArgs,
}

// Blue = low, white on green = high
fn pin_formatter(signal: InputSignal, state: bool) -> ColoredString {
    let label = format!(" {} ", signal);
    if state {
        label.white().on_green().bold()
    } else {
        label.blue()
    }
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
    let mut device = Cm108::open_with_config(&hid_api, &cli.device.config()).with_context(|| {
        format!(
            "failed to open device {:04X}:{:04X}",
            cli.device.vid, cli.device.pid
        )
    })?;
    device.set_directions((1..=8).map(|pin| (pin, GpioDirection::Input)))?;

    println!("Ctrl-C to quit");
    println!("Pin states:");
    let mut stdout = io::stdout();
    while !stop.load(Ordering::Relaxed) {
        let Some(report) = device.read_inputs_timeout(POLL_TIMEOUT_MS)? else {
            continue;
        };
        let line: Vec<String> = report
            .iter()
            .map(|(signal, state)| pin_formatter(signal, state).to_string())
            .collect();
        write!(stdout, "\r{}", line.join(" "))?;
        stdout.flush()?;
    }

    println!("\nClosing device");
    device.close();
    Ok(())
}
