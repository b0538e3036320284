//! I2C address of an INA220
//!
//! The two address pins A0 and A1 can each be tied to GND, VS, SDA or SCL, giving sixteen
//! addresses in `0x40..=0x4F` (table 1 of the datasheet).

use core::fmt::Formatter;
use core::ops::RangeInclusive;

/// Signal an address pin is tied to
///
/// The discriminant is the two bit pattern the pin contributes to the address.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Pin {
    /// Tied to GND
    Gnd = 0b00,
    /// Tied to VS
    Vs = 0b01,
    /// Tied to SDA
    Sda = 0b10,
    /// Tied to SCL
    Scl = 0b11,
}

impl Pin {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Gnd,
            0b01 => Self::Vs,
            0b10 => Self::Sda,
            _ => Self::Scl,
        }
    }
}

/// 7 bit bus address of one INA220
///
/// ```rust
/// use ina220::address::{Address, Pin};
///
/// let low = Address::from_pins(Pin::Gnd, Pin::Gnd);
/// let high = Address::from_byte(65).unwrap();
///
/// assert_eq!(low.as_byte(), 0x40);
/// assert_eq!(high.as_pins(), (Pin::Vs, Pin::Gnd));
/// assert!(Address::from_byte(0x1e).is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address(u8);

impl Address {
    const BASE: u8 = 0b100_0000;
    const VALID: RangeInclusive<u8> = Self::BASE..=(Self::BASE | 0b1111);

    /// Address selected by wiring A0 and A1 to the given signals
    #[must_use]
    pub const fn from_pins(a0: Pin, a1: Pin) -> Self {
        Self(Self::BASE | ((a1 as u8) << 2) | (a0 as u8))
    }

    /// Address from its 7 bit value
    ///
    /// # Errors
    /// Returns [`OutOfRange`] if `byte` is not in `0x40..=0x4F`.
    pub const fn from_byte(byte: u8) -> Result<Self, OutOfRange> {
        if byte >= *Self::VALID.start() && byte <= *Self::VALID.end() {
            Ok(Self(byte))
        } else {
            Err(OutOfRange(byte))
        }
    }

    /// The 7 bit address as put on the bus
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// The signals A0 and A1 are tied to, in that order
    #[must_use]
    pub const fn as_pins(self) -> (Pin, Pin) {
        (Pin::from_bits(self.0), Pin::from_bits(self.0 >> 2))
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::from_pins(Pin::Gnd, Pin::Gnd)
    }
}

impl TryFrom<u8> for Address {
    type Error = OutOfRange;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_byte(byte)
    }
}

/// A byte outside of the INA220 address range
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRange(pub u8);

impl core::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "address {:#04x} is outside of {:#04x}..={:#04x}",
            self.0,
            Address::VALID.start(),
            Address::VALID.end(),
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRange {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pins_cover_whole_range() {
        use Pin::{Gnd, Scl, Sda, Vs};

        let mut seen = vec![];
        for a1 in [Gnd, Vs, Sda, Scl] {
            for a0 in [Gnd, Vs, Sda, Scl] {
                let address = Address::from_pins(a0, a1);
                assert_eq!(address.as_pins(), (a0, a1));
                seen.push(address.as_byte());
            }
        }

        assert_eq!(seen, (0x40..=0x4F).collect::<Vec<u8>>());
    }

    #[test]
    fn supply_board_addresses() {
        // The low and high range monitors on the supply board
        assert_eq!(Address::from_byte(64), Ok(Address::default()));
        assert_eq!(
            Address::from_byte(65).map(Address::as_pins),
            Ok((Pin::Vs, Pin::Gnd))
        );
    }

    #[test]
    fn rejects_foreign_bytes() {
        assert_eq!(Address::try_from(0x3F), Err(OutOfRange(0x3F)));
        assert_eq!(Address::try_from(0x50), Err(OutOfRange(0x50)));
        // GPIO expander on the same bus
        assert!(Address::from_byte(30).is_err());
    }
}
