#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(unsafe_code)]

mod address;
#[cfg(target_os = "linux")]
pub mod bus;
mod common;
mod eh;
mod error;
mod probe;

pub use address::{Address, AddressError};
pub use eh::{EmbeddedHalBus, TransferError};
pub use error::Error;
pub use probe::{BindError, Outcome, ProbeMode, SmbusProbe, probe};
