//! Deciding how to probe an address, and probing it.
use tracing::{debug, trace};

use crate::{Address, Error};

/// The bus transaction used to check for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMode {
    /// SMBus "quick command" with the write bit set, carrying no data.
    ///
    /// Known to corrupt the Atmel AT24RF08 EEPROM.
    Quick,
    /// SMBus "receive byte", with the byte thrown away.
    ///
    /// Known to lock up the SMBus on various write-only chips (mainly clock
    /// chips), so it is only used where EEPROMs are expected.
    ReadByte,
}

impl ProbeMode {
    /// Pick the transaction for a 7-bit address.
    ///
    /// `0x30..=0x37` and `0x50..=0x5F` are read, everything else gets a
    /// quick write.
    pub fn for_address(seven_bit_address: u8) -> Self {
        match seven_bit_address {
            0x30..=0x37 | 0x50..=0x5F => ProbeMode::ReadByte,
            _ => ProbeMode::Quick,
        }
    }
}

/// Result of probing one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Something acknowledged the probe transaction.
    Present,
    /// The probe transaction failed.
    ///
    /// This covers both "nothing there" and "a device that did not like the
    /// transaction"; the bus gives no way to tell them apart.
    Absent,
    /// The address is in use by another driver, so it was not probed.
    ///
    /// On Linux this usually means a kernel driver is bound to the device,
    /// which strongly suggests the device exists.
    Unavailable,
}

impl Outcome {
    /// Whether a device answered.
    pub fn is_present(self) -> bool {
        matches!(self, Outcome::Present)
    }
}

/// Why a bus handle could not be pointed at an address.
#[derive(Debug)]
pub enum BindError<E> {
    /// The address is claimed by someone else. Not an error as far as
    /// probing is concerned.
    Busy,
    /// Any other failure (bad handle, permissions, adapter refused it).
    Config(E),
}

/// The bus operations needed to probe an address.
///
/// `bind` selects the target address for the subsequent transactions. The
/// binding is handle-wide state, so a handle must not be shared between
/// concurrent probes.
pub trait SmbusProbe {
    /// Error returned by the bus.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Direct subsequent transactions at `address`.
    fn bind(&mut self, address: Address) -> Result<(), BindError<Self::Error>>;

    /// Issue a quick command with the write bit set and no data.
    fn quick_write(&mut self) -> Result<(), Self::Error>;

    /// Read a single byte with no register selection.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;
}

impl<T: SmbusProbe + ?Sized> SmbusProbe for &mut T {
    type Error = T::Error;

    fn bind(&mut self, address: Address) -> Result<(), BindError<Self::Error>> {
        (**self).bind(address)
    }

    fn quick_write(&mut self) -> Result<(), Self::Error> {
        (**self).quick_write()
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        (**self).read_byte()
    }
}

/// Check whether a device acknowledges `address`.
///
/// The bus is bound to the address once and then one transaction is issued,
/// chosen by [`ProbeMode::for_address`]. Nothing is retried. The binding is
/// left in place afterwards.
///
/// # Errors
///
/// [`Error::Configuration`] if the bus refused the address for any reason
/// other than it being busy. A busy address is [`Outcome::Unavailable`] and a
/// failed transaction is [`Outcome::Absent`]; neither is an error.
pub fn probe<B: SmbusProbe>(bus: &mut B, address: Address) -> Result<Outcome, Error> {
    let mode = address.probe_mode();
    debug!(%address, ?mode, "probing");

    match bus.bind(address) {
        Ok(()) => {}
        Err(BindError::Busy) => {
            debug!(%address, "address is busy, skipping");
            return Ok(Outcome::Unavailable);
        }
        Err(BindError::Config(source)) => {
            return Err(Error::Configuration {
                address,
                source: Box::new(source),
            });
        }
    }

    let result = match mode {
        ProbeMode::Quick => bus.quick_write(),
        // The value is irrelevant, only whether the read went through.
        ProbeMode::ReadByte => bus.read_byte().map(|_| ()),
    };
    let outcome = match result {
        Ok(()) => Outcome::Present,
        Err(e) => {
            trace!(%address, error = %e, "probe transaction failed");
            Outcome::Absent
        }
    };
    debug!(%address, ?outcome);
    Ok(outcome)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn read_byte_ranges() {
        for a in 0x03..=0x77u8 {
            let expected = if (0x30..=0x37).contains(&a) || (0x50..=0x5F).contains(&a) {
                ProbeMode::ReadByte
            } else {
                ProbeMode::Quick
            };
            assert_eq!(ProbeMode::for_address(a), expected, "address {a:#04x}");
        }
    }

    #[test]
    fn range_edges() {
        assert_eq!(ProbeMode::for_address(0x2F), ProbeMode::Quick);
        assert_eq!(ProbeMode::for_address(0x30), ProbeMode::ReadByte);
        assert_eq!(ProbeMode::for_address(0x37), ProbeMode::ReadByte);
        assert_eq!(ProbeMode::for_address(0x38), ProbeMode::Quick);
        assert_eq!(ProbeMode::for_address(0x4F), ProbeMode::Quick);
        assert_eq!(ProbeMode::for_address(0x50), ProbeMode::ReadByte);
        assert_eq!(ProbeMode::for_address(0x5F), ProbeMode::ReadByte);
        assert_eq!(ProbeMode::for_address(0x60), ProbeMode::Quick);
    }

    #[test]
    fn only_present_is_present() {
        assert!(Outcome::Present.is_present());
        assert!(!Outcome::Absent.is_present());
        assert!(!Outcome::Unavailable.is_present());
    }
}
