//! Opens the HID device and prints product, serial, and manufacturer info.
//! Doesn't do any GPIO manipulation.

use anyhow::Context;
use clap::Parser;
use cm108_gpio::Cm108;
use colored::Colorize;
use hidapi::HidApi;

mod common;

#[derive(Debug, Parser)]
#[command(about = "Print the descriptor strings of a CM108/CM119 device")]
struct Cli {
    #[command(flatten)]
    device: common::DeviceArgs,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let hid_api = HidApi::new().context("failed to initialise HID API")?;
    let device = Cm108::open_with_config(&hid_api, &cli.device.config()).with_context(|| {
        format!(
            "failed to open device {:04X}:{:04X}",
            cli.device.vid, cli.device.pid
        )
    })?;

    let info = device.device_info();
    println!(
        "Device manufacturer: {}",
        info.manufacturer_string.as_deref().unwrap_or("N/A")
    );
    println!("Product: {}", info.product_string.as_deref().unwrap_or("N/A"));
    println!("Serial: {}", info.serial_number.as_deref().unwrap_or("N/A"));
    println!("{}", "Success!".green().bold());

    device.close();
    Ok(())
}
