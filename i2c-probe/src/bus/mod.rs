//! Linux i2c-dev bus handles, through [`i2cdev`].
//!
//! See the kernel's [dev-interface] documentation for the underlying ioctls.
//!
//! [dev-interface]: https://www.kernel.org/doc/Documentation/i2c/dev-interface
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use i2cdev::core::I2CDevice;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
use tracing::debug;

use crate::{Address, BindError, Error, SmbusProbe};

mod lookup;

pub use lookup::BusSelector;

/// An open `/dev/i2c-N` character device.
///
/// The device is closed when this is dropped.
pub struct I2cBus {
    device: LinuxI2CDevice,
    path: PathBuf,
}

impl I2cBus {
    /// Open I2C bus number `bus`.
    ///
    /// `/dev/i2c/N` is tried first, then `/dev/i2c-N`.
    ///
    /// # Errors
    ///
    /// [`Error::DeviceNotFound`] if neither device node exists, or
    /// [`Error::Open`] if one exists but could not be opened (most often
    /// because of permissions).
    pub fn open(bus: u32) -> Result<Self, Error> {
        let candidates = [
            PathBuf::from(format!("/dev/i2c/{bus}")),
            PathBuf::from(format!("/dev/i2c-{bus}")),
        ];
        for path in candidates {
            match Self::open_path(&path) {
                Err(Error::Open { source, .. })
                    if matches!(source.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) =>
                {
                    debug!(path = %path.display(), "no such device node");
                }
                other => return other,
            }
        }
        Err(Error::DeviceNotFound { bus })
    }

    /// Open the i2c-dev device node at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Open`] if the file could not be opened for reading and
    /// writing, or is not an I2C adapter.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        // i2cdev always binds an address on open. Nothing can claim the
        // general call address, and every probe rebinds before use.
        let device = LinuxI2CDevice::new(path, 0x00).map_err(|e| Error::Open {
            path: path.to_owned(),
            source: into_io_error(e),
        })?;
        debug!(path = %path.display(), "opened I2C bus");
        Ok(Self {
            device,
            path: path.to_owned(),
        })
    }

    /// Device node this bus was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for I2cBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I2cBus").field("path", &self.path).finish_non_exhaustive()
    }
}

/// SMBus quick write and read byte through i2c-dev.
///
/// Binding uses `I2C_SLAVE`, which fails with `EBUSY` when a kernel driver
/// has claimed the address.
impl SmbusProbe for I2cBus {
    type Error = LinuxI2CError;

    fn bind(&mut self, address: Address) -> Result<(), BindError<LinuxI2CError>> {
        self.device.set_slave_address(address.into()).map_err(bind_error)
    }

    fn quick_write(&mut self) -> Result<(), LinuxI2CError> {
        // The quick command's single bit is the R/W bit; false is write.
        self.device.smbus_write_quick(false)
    }

    fn read_byte(&mut self) -> Result<u8, LinuxI2CError> {
        self.device.smbus_read_byte()
    }
}

/// Sort a failed `I2C_SLAVE` into busy or anything else.
fn bind_error(e: LinuxI2CError) -> BindError<LinuxI2CError> {
    let busy = match &e {
        LinuxI2CError::Errno(errno) => {
            io::Error::from_raw_os_error(*errno).kind() == ErrorKind::ResourceBusy
        }
        LinuxI2CError::Io(io) => io.kind() == ErrorKind::ResourceBusy,
    };
    if busy {
        BindError::Busy
    } else {
        BindError::Config(e)
    }
}

fn into_io_error(e: LinuxI2CError) -> io::Error {
    match e {
        LinuxI2CError::Errno(errno) => io::Error::from_raw_os_error(errno),
        LinuxI2CError::Io(io) => io,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // Linux errno values.
    const EACCES: i32 = 13;
    const EBUSY: i32 = 16;
    const EINVAL: i32 = 22;
    const ENOTTY: i32 = 25;

    #[test]
    fn ebusy_is_busy() {
        assert!(matches!(
            bind_error(LinuxI2CError::Errno(EBUSY)),
            BindError::Busy
        ));
    }

    #[test]
    fn other_errnos_are_configuration_problems() {
        for errno in [EACCES, EINVAL, ENOTTY] {
            assert!(
                matches!(
                    bind_error(LinuxI2CError::Errno(errno)),
                    BindError::Config(LinuxI2CError::Errno(e)) if e == errno
                ),
                "errno {errno}"
            );
        }
        assert!(matches!(
            bind_error(LinuxI2CError::Io(io::Error::from(ErrorKind::PermissionDenied))),
            BindError::Config(LinuxI2CError::Io(_))
        ));
    }

    #[test]
    fn missing_bus_is_not_found() {
        // Minor numbers stop at 0xFFFFF, so this bus can never exist.
        assert!(matches!(
            I2cBus::open(0xFFFFF + 1),
            Err(Error::DeviceNotFound { bus: 0x100000 })
        ));
    }

    #[test]
    fn missing_path_keeps_the_path() {
        let path = Path::new("/nonexistent/dev/i2c-1");
        match I2cBus::open_path(path) {
            Err(Error::Open { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    /// A regular file opens, but refuses the address ioctl.
    #[test]
    fn non_i2c_file_does_not_open() {
        let file = tempfile::NamedTempFile::new().unwrap();
        match I2cBus::open_path(file.path()) {
            Err(Error::Open { source, .. }) => {
                assert_eq!(source.raw_os_error(), Some(ENOTTY));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    /// Needs a real adapter on bus 1 and permission to open it.
    #[test]
    #[ignore]
    fn hardware_probe_bus_1() {
        let mut bus = I2cBus::open(1).unwrap();
        for address in Address::all() {
            let outcome = crate::probe(&mut bus, address).unwrap();
            println!("{address}: {outcome:?}");
        }
    }
}
