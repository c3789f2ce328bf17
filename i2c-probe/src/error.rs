use std::path::PathBuf;

use crate::Address;

/// Problems that stop an address from being probed.
///
/// A device not answering is not an error: see [`Outcome`](crate::Outcome).
#[derive(Debug)]
pub enum Error {
    /// The bus handle could not be pointed at the target address.
    ///
    /// This is any failure other than the address being busy, for example
    /// the handle not being an I2C device or the adapter not supporting
    /// the address.
    Configuration {
        /// Address that was being bound.
        address: Address,
        /// Error reported by the bus.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A bus number above `0xFFFFF` (the largest minor number) was given.
    BusOutOfRange(i64),
    /// No I2C adapter has the given name.
    BusNotFound(String),
    /// More than one I2C adapter has the given name.
    AmbiguousBusName(String),
    /// The list of I2C adapters could not be read from sysfs.
    Sysfs(std::io::Error),
    /// Neither `/dev/i2c/N` nor `/dev/i2c-N` exist.
    DeviceNotFound {
        /// Bus number that was looked for.
        bus: u32,
    },
    /// The bus device exists but could not be opened.
    Open {
        /// Device node that failed to open.
        path: PathBuf,
        /// Underlying error, typically permission denied.
        source: std::io::Error,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Configuration { address, source } => {
                write!(f, "could not set address to {address}: {source}")
            }
            Error::BusOutOfRange(bus) => write!(f, "I2C bus {bus} out of range"),
            Error::BusNotFound(name) => {
                write!(f, "I2C bus name {name:?} doesn't match any bus present")
            }
            Error::AmbiguousBusName(name) => write!(f, "I2C bus name {name:?} is ambiguous"),
            Error::Sysfs(e) => write!(f, "could not list I2C adapters: {e}"),
            Error::DeviceNotFound { bus } => write!(
                f,
                "could not open file `/dev/i2c-{bus}' or `/dev/i2c/{bus}': no such file or directory"
            ),
            Error::Open { path, source } => {
                write!(f, "could not open file `{}': {source}", path.display())?;
                if source.kind() == std::io::ErrorKind::PermissionDenied {
                    write!(f, " (run as root?)")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Configuration { source, .. } => Some(&**source),
            Error::Sysfs(e) => Some(e),
            Error::Open { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[doc(hidden)]
impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Sysfs(value)
    }
}
