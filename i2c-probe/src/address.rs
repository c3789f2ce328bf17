use std::str::FromStr;

use crate::common::parse_int_literal;
use crate::probe::ProbeMode;

/// A 7-bit I2C address that is allowed to be probed.
///
/// Addresses `0x00..=0x02` and `0x78..=0x7F` are reserved by the I2C
/// specification (general call, CBUS, 10-bit addressing and so on) and
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u8);

impl Address {
    /// Lowest address that can be probed.
    pub const FIRST: Address = Address(0x03);
    /// Highest address that can be probed.
    pub const LAST: Address = Address(0x77);

    /// Create an address, checking it is in `0x03..=0x77`.
    ///
    /// # Errors
    ///
    /// [`AddressError::OutOfRange`] if the address is reserved or wider than
    /// seven bits.
    pub fn new(seven_bit_address: u8) -> Result<Self, AddressError> {
        match seven_bit_address {
            0x03..=0x77 => Ok(Self(seven_bit_address)),
            other => Err(AddressError::OutOfRange(other.into())),
        }
    }

    /// Every address that can be probed, in ascending order.
    pub fn all() -> impl Iterator<Item = Address> {
        (Self::FIRST.0..=Self::LAST.0).map(Address)
    }

    /// The transaction used to probe this address.
    pub fn probe_mode(self) -> ProbeMode {
        ProbeMode::for_address(self.0)
    }
}

impl From<Address> for u8 {
    fn from(value: Address) -> u8 {
        value.0
    }
}

impl From<Address> for u16 {
    fn from(value: Address) -> u16 {
        value.0.into()
    }
}

impl TryFrom<u8> for Address {
    type Error = AddressError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Address::new(value)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Accepts decimal, `0x`-prefixed hexadecimal and `0`-prefixed octal.
///
/// ```
/// # use i2c_probe::{Address, AddressError};
/// assert_eq!("0x50".parse::<Address>()?, "80".parse()?);
/// assert_eq!("0120".parse::<Address>()?, "80".parse()?);
/// assert!(matches!("0x78".parse::<Address>(), Err(AddressError::OutOfRange(0x78))));
/// assert!(matches!("0x5g".parse::<Address>(), Err(AddressError::NotANumber(_))));
/// # Ok::<(), AddressError>(())
/// ```
impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_int_literal(s).ok_or_else(|| AddressError::NotANumber(s.to_owned()))?;
        let byte = u8::try_from(value).map_err(|_| AddressError::OutOfRange(value))?;
        Address::new(byte)
    }
}

/// Problems turning user input into an [`Address`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The input was not an integer literal.
    ///
    /// Holds the rejected input.
    NotANumber(String),
    /// The input was a number, but not in `0x03..=0x77`.
    OutOfRange(i64),
}

impl std::fmt::Display for AddressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressError::NotANumber(input) => write!(f, "{input:?} is not a number"),
            AddressError::OutOfRange(value) => write!(
                f,
                "address {value} is out of range ({}-{})",
                Address::FIRST,
                Address::LAST
            ),
        }
    }
}

impl std::error::Error for AddressError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn range_boundaries() {
        assert!(Address::new(0x02).is_err());
        assert!(Address::new(0x03).is_ok());
        assert!(Address::new(0x77).is_ok());
        assert!(Address::new(0x78).is_err());
        assert!(Address::new(0xFF).is_err());
    }

    #[test]
    fn parse_rejects_reserved_addresses() {
        assert_eq!("0x02".parse::<Address>(), Err(AddressError::OutOfRange(2)));
        assert_eq!("120".parse::<Address>(), Err(AddressError::OutOfRange(0x78)));
        assert_eq!("-3".parse::<Address>(), Err(AddressError::OutOfRange(-3)));
        assert_eq!("0x103".parse::<Address>(), Err(AddressError::OutOfRange(0x103)));
        assert_eq!("3".parse::<Address>(), Address::new(3));
        assert_eq!("0x77".parse::<Address>(), Address::new(0x77));
    }

    #[test]
    fn parse_keeps_rejected_input() {
        assert_eq!(
            "fifty".parse::<Address>(),
            Err(AddressError::NotANumber("fifty".into()))
        );
    }

    #[test]
    fn all_covers_the_valid_range() {
        let all: Vec<u8> = Address::all().map(u8::from).collect();
        assert_eq!(all.len(), 0x75);
        assert_eq!(all.first(), Some(&0x03));
        assert_eq!(all.last(), Some(&0x77));
    }

    #[test]
    fn display_is_two_digit_hex() {
        assert_eq!(Address::new(0x05).unwrap().to_string(), "0x05");
        assert_eq!(Address::new(0x5F).unwrap().to_string(), "0x5f");
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            AddressError::OutOfRange(0x78).to_string(),
            "address 120 is out of range (0x03-0x77)"
        );
        assert_eq!(
            AddressError::NotANumber("x".into()).to_string(),
            "\"x\" is not a number"
        );
    }
}
