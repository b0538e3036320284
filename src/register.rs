//! Register map of the INA220 and the traits tying register types to their addresses

/// Addresses of the internal registers of the INA220
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterName {
    /// Configuration register, see [`Configuration`](crate::configuration::Configuration)
    Configuration = 0x00,
    /// Shunt voltage register, see [`ShuntVoltage`](crate::measurements::ShuntVoltage)
    ShuntVoltage = 0x01,
    /// Bus voltage register, see [`BusVoltage`](crate::measurements::BusVoltage)
    BusVoltage = 0x02,
    /// Power register, only meaningful once the calibration register is programmed
    Power = 0x03,
    /// Current register, only meaningful once the calibration register is programmed
    Current = 0x04,
    /// Calibration register
    Calibration = 0x05,
}

impl RegisterName {
    /// Every register, ordered by address
    pub const ALL: [Self; 6] = [
        Self::Configuration,
        Self::ShuntVoltage,
        Self::BusVoltage,
        Self::Power,
        Self::Current,
        Self::Calibration,
    ];

    /// Register pointer byte sent before a read or write
    #[must_use]
    pub const fn address(self) -> u8 {
        self as u8
    }
}

/// A 16 bit register at a fixed address
pub trait Register {
    /// Which register this type lives in
    const NAME: RegisterName;
    /// Register pointer byte, derived from [`Self::NAME`]
    const ADDRESS: u8 = Self::NAME.address();
}

/// A register that can be decoded from the two bytes read from the device
pub trait ReadRegister: Register {
    /// Decode the big-endian register contents
    fn from_bits(bits: u16) -> Self;
}

/// A register that can be encoded into the two bytes written to the device
pub trait WriteRegister: Register {
    /// Register contents to send, most significant byte first
    fn as_bits(&self) -> u16;
}
