//! Probing over any `embedded_hal` I2C bus.
use embedded_hal::i2c::{self, I2c};

use crate::{Address, BindError, SmbusProbe};

/// Adapts an [`embedded_hal::i2c::I2c`] bus for [`probe`](crate::probe).
///
/// `embedded_hal` buses take the address with every transfer, so binding only
/// records it and can never report [`BindError::Busy`]. The quick write is a
/// zero-length write and the read byte a one-byte read.
///
/// Some adapters refuse zero-length transfers (the MCP2221 among them); every
/// quick-write probe then comes back [`Outcome::Absent`](crate::Outcome::Absent).
#[derive(Debug)]
pub struct EmbeddedHalBus<I> {
    i2c: I,
    address: Option<Address>,
}

impl<I: I2c> EmbeddedHalBus<I> {
    /// Wrap an I2C bus.
    pub fn new(i2c: I) -> Self {
        Self { i2c, address: None }
    }

    /// Give the bus back.
    pub fn into_inner(self) -> I {
        self.i2c
    }

    fn bound_address(&self) -> Result<u8, TransferError> {
        self.address.map(u8::from).ok_or(TransferError::Unbound)
    }
}

impl<I: I2c> SmbusProbe for EmbeddedHalBus<I> {
    type Error = TransferError;

    fn bind(&mut self, address: Address) -> Result<(), BindError<Self::Error>> {
        self.address = Some(address);
        Ok(())
    }

    fn quick_write(&mut self) -> Result<(), Self::Error> {
        let address = self.bound_address()?;
        self.i2c.write(address, &[]).map_err(TransferError::from_hal)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let address = self.bound_address()?;
        let mut buf = [0u8];
        self.i2c
            .read(address, &mut buf)
            .map_err(TransferError::from_hal)?;
        Ok(buf[0])
    }
}

/// Failure of a transfer through [`EmbeddedHalBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferError {
    /// A transfer was attempted before an address was bound.
    Unbound,
    /// The bus reported an error.
    Bus(i2c::ErrorKind),
}

impl TransferError {
    fn from_hal(e: impl i2c::Error) -> Self {
        Self::Bus(e.kind())
    }
}

impl std::fmt::Display for TransferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferError::Unbound => write!(f, "no address bound"),
            TransferError::Bus(kind) => write!(f, "I2C transfer failed: {kind:?}"),
        }
    }
}

impl std::error::Error for TransferError {}
