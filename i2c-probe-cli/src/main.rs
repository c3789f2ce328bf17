use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use i2c_probe::bus::{BusSelector, I2cBus};
use i2c_probe::{Address, Outcome};
use tracing::info;

use cli::Cli;
use exit::Status;

mod cli;
mod exit;
mod logging;

#[cfg(not(target_os = "linux"))]
compile_error!("i2c-probe needs the Linux i2c-dev interface");

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Prints help and version to stdout, errors and usage to stderr.
            let _ = e.print();
            return Status::for_parse_error(&e).into();
        }
    };
    logging::init(cli.verbose);

    let status = match run(&cli) {
        Ok(outcome) => Status::from(outcome),
        Err(e) => {
            let status = Status::for_error(&e);
            eprintln!("Error: {e:#}");
            if status.wants_usage() {
                eprintln!("\n{}", Cli::command().render_usage());
            }
            status
        }
    };
    status.into()
}

fn run(cli: &Cli) -> anyhow::Result<Outcome> {
    let address: Address = cli
        .address
        .parse()
        .context("invalid I2C_ADDRESS argument")?;
    let bus_number = cli
        .bus
        .parse::<BusSelector>()
        .and_then(|selector| selector.resolve())
        .with_context(|| format!("could not look up I2C bus {:?}", cli.bus))?;

    // Closed on drop, whichever way this returns.
    let mut bus = I2cBus::open(bus_number)?;
    let outcome = i2c_probe::probe(&mut bus, address)?;
    info!(%address, bus = %bus.path().display(), ?outcome);
    Ok(outcome)
}
