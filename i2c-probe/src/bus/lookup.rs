//! Turning a bus number or adapter name into a bus number.
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::trace;

use crate::Error;
use crate::common::parse_int_literal;

/// Where the kernel lists i2c-dev adapters.
const SYSFS_I2C_DEV: &str = "/sys/class/i2c-dev";

/// Largest bus number that can have a device node (20-bit minor number).
const MAX_BUS: u32 = 0xFFFFF;

/// Bus number or I2C adapter name, as given on a command line.
///
/// Anything that parses as an integer literal is a number, anything else
/// is taken as an adapter name.
///
/// ```
/// # use i2c_probe::bus::BusSelector;
/// assert_eq!("1".parse::<BusSelector>()?, BusSelector::Number(1));
/// assert_eq!("0x10".parse::<BusSelector>()?, BusSelector::Number(16));
/// assert_eq!(
///     "Synopsys DesignWare I2C adapter".parse::<BusSelector>()?,
///     BusSelector::Name("Synopsys DesignWare I2C adapter".into()),
/// );
/// # Ok::<(), i2c_probe::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusSelector {
    /// `/dev/i2c-N`
    Number(u32),
    /// Adapter name as shown in sysfs.
    Name(String),
}

impl FromStr for BusSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_int_literal(s) {
            Some(n) => match u32::try_from(n) {
                Ok(n) if n <= MAX_BUS => Ok(BusSelector::Number(n)),
                _ => Err(Error::BusOutOfRange(n)),
            },
            None => Ok(BusSelector::Name(s.to_owned())),
        }
    }
}

impl BusSelector {
    /// Find the bus number, looking the adapter name up in sysfs if needed.
    ///
    /// # Errors
    ///
    /// [`Error::BusNotFound`] or [`Error::AmbiguousBusName`] if the name
    /// matches no adapter or several, [`Error::Sysfs`] if the adapters could
    /// not be listed.
    pub fn resolve(&self) -> Result<u32, Error> {
        self.resolve_in(Path::new(SYSFS_I2C_DEV))
    }

    /// [`resolve`](Self::resolve), against a different sysfs class directory.
    pub fn resolve_in(&self, class_dir: &Path) -> Result<u32, Error> {
        let name = match self {
            BusSelector::Number(n) => return Ok(*n),
            BusSelector::Name(name) => name,
        };

        let mut found = None;
        for (bus, adapter_name) in adapters(class_dir)? {
            trace!(bus, adapter_name = adapter_name.as_str(), "found I2C adapter");
            if adapter_name != *name {
                continue;
            }
            if found.is_some() {
                return Err(Error::AmbiguousBusName(name.clone()));
            }
            found = Some(bus);
        }
        found.ok_or_else(|| Error::BusNotFound(name.clone()))
    }
}

/// List `(bus number, adapter name)` for every `i2c-N` entry in `class_dir`.
fn adapters(class_dir: &Path) -> Result<Vec<(u32, String)>, Error> {
    let mut adapters = Vec::new();
    for entry in fs::read_dir(class_dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(bus) = file_name
            .to_str()
            .and_then(|n| n.strip_prefix("i2c-"))
            .and_then(|n| n.parse::<u32>().ok())
        else {
            continue;
        };
        // Older kernels only have the name on the parent device.
        let path = entry.path();
        let Ok(name) = fs::read_to_string(path.join("name"))
            .or_else(|_| fs::read_to_string(path.join("device/name")))
        else {
            continue;
        };
        adapters.push((bus, name.trim_end().to_owned()));
    }
    adapters.sort();
    Ok(adapters)
}
