//! Process exit statuses.
//!
//! Scripts rely on these, so they must not change.
use std::process::ExitCode;

use clap::error::ErrorKind;
use i2c_probe::{AddressError, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    /// A device acknowledged the address (or help/version was printed).
    Success = 0,
    /// Nothing acknowledged, the address is busy, or the bus refused it.
    Failure = 1,
    /// The bus number or name couldn't be resolved.
    BusLookup = 2,
    /// The address argument wasn't an integer literal.
    NotANumber = 3,
    /// The address was outside 0x03-0x77.
    OutOfRange = 4,
    /// Missing or unexpected arguments.
    Usage = 5,
    /// The bus device node couldn't be opened.
    Open = 6,
}

impl Status {
    /// Status for a failure to parse the command line.
    pub(crate) fn for_parse_error(e: &clap::Error) -> Status {
        match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Status::Success,
            _ => Status::Usage,
        }
    }

    /// Status for an error that stopped the probe.
    pub(crate) fn for_error(e: &anyhow::Error) -> Status {
        use i2c_probe::Error::*;
        if let Some(e) = e.downcast_ref::<AddressError>() {
            return match e {
                AddressError::NotANumber(_) => Status::NotANumber,
                AddressError::OutOfRange(_) => Status::OutOfRange,
            };
        }
        match e.downcast_ref::<i2c_probe::Error>() {
            Some(BusOutOfRange(_) | BusNotFound(_) | AmbiguousBusName(_) | Sysfs(_)) => {
                Status::BusLookup
            }
            Some(DeviceNotFound { .. } | Open { .. }) => Status::Open,
            Some(Configuration { .. }) | None => Status::Failure,
        }
    }

    /// Whether the usage line should follow the error message.
    pub(crate) fn wants_usage(self) -> bool {
        matches!(self, Status::NotANumber | Status::OutOfRange)
    }
}

impl From<Outcome> for Status {
    fn from(outcome: Outcome) -> Status {
        match outcome {
            Outcome::Present => Status::Success,
            Outcome::Absent | Outcome::Unavailable => Status::Failure,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> ExitCode {
        ExitCode::from(status as u8)
    }
}

#[cfg(test)]
mod test {
    use std::io;

    use anyhow::Context;
    use i2c_probe::Address;

    use super::*;

    #[test]
    fn outcomes() {
        assert_eq!(Status::from(Outcome::Present), Status::Success);
        assert_eq!(Status::from(Outcome::Absent), Status::Failure);
        assert_eq!(Status::from(Outcome::Unavailable), Status::Failure);
    }

    #[test]
    fn address_errors_keep_their_codes_through_context() {
        let e = Err::<(), _>(AddressError::NotANumber("x".into()))
            .context("invalid I2C_ADDRESS argument")
            .unwrap_err();
        assert_eq!(Status::for_error(&e), Status::NotANumber);
        assert_eq!(Status::for_error(&e) as u8, 3);

        let e = anyhow::Error::new(AddressError::OutOfRange(0x78));
        assert_eq!(Status::for_error(&e), Status::OutOfRange);
        assert_eq!(Status::for_error(&e) as u8, 4);
    }

    #[test]
    fn bus_errors() {
        let lookup = anyhow::Error::new(i2c_probe::Error::BusNotFound("nope".into()));
        assert_eq!(Status::for_error(&lookup), Status::BusLookup);

        let open = anyhow::Error::new(i2c_probe::Error::Open {
            path: "/dev/i2c-1".into(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        });
        assert_eq!(Status::for_error(&open), Status::Open);
        assert_eq!(Status::for_error(&open) as u8, 6);
    }

    #[test]
    fn configuration_fault_is_a_plain_failure() {
        let e = anyhow::Error::new(i2c_probe::Error::Configuration {
            address: Address::new(0x40).unwrap(),
            source: Box::new(io::Error::from(io::ErrorKind::InvalidInput)),
        });
        assert_eq!(Status::for_error(&e), Status::Failure);
    }
}
