use clap::Parser;

/// Check whether a device answers at one I2C address
///
/// Exits with status 0 if a device acknowledged the address, and 1 if nothing
/// did or the address is claimed by a kernel driver. Nothing is printed on
/// success, so it can be used directly in shell conditionals.
///
/// Addresses 0x30-0x37 and 0x50-0x5F are probed with an SMBus read byte,
/// everything else with an SMBus quick write, as i2cdetect does by default.
/// Quick writes can corrupt some EEPROMs, and reads can lock up some
/// write-only chips.
#[derive(Debug, Parser)]
#[command(version, about)]
pub(crate) struct Cli {
    /// Address to probe, 0x03-0x77
    ///
    /// Decimal, hexadecimal with a 0x prefix, or octal with a leading 0.
    #[arg(value_name = "I2C_ADDRESS", allow_hyphen_values = true)]
    pub(crate) address: String,
    /// I2C bus number or adapter name
    #[arg(short, long, env = "I2C_PROBE_BUS", default_value = "1")]
    pub(crate) bus: String,
    /// Log more detail to stderr (repeat for more)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,
}
