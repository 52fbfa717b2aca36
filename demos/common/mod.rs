// Shared device selection for the demo programs.

use clap::Args;
use cm108_gpio::SessionConfig;

#[derive(Debug, Args)]
pub struct DeviceArgs {
    /// Device vendor ID in hexadecimal
    #[arg(long = "vid", default_value = "0x0D8C", value_parser = u16_from_hex)]
    pub vid: u16,
    /// Device product ID in hexadecimal
    #[arg(long = "pid", default_value = "0x013A", value_parser = u16_from_hex)]
    pub pid: u16,
}

impl DeviceArgs {
    pub fn config(&self) -> SessionConfig {
        SessionConfig::default().with_vid_pid(self.vid, self.pid)
    }
}

fn u16_from_hex(value: &str) -> Result<u16, std::num::ParseIntError> {
    let s = if value.to_ascii_lowercase().starts_with("0x") {
        &value[2..]
    } else {
        value
    };
    u16::from_str_radix(s, 16)
}
