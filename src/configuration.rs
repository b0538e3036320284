//! Types used to set the configuration for the INA220
//!
//! [`Configuration`] combines the five fields of the configuration register plus the reset bit.
//!
//! # Example
//! The `..` completion can be used to set specific values to change. For example:
//! ```rust
//! use ina220::configuration::{Configuration, Resolution};
//! let conf = Configuration {
//!     bus_resolution: Resolution::Avg128,
//!     shunt_resolution: Resolution::Avg128,
//!     .. Default::default()
//! };
//! assert_eq!(conf.as_bits(), 0x3FFF);
//! ```

use crate::register::{ReadRegister, Register, RegisterName, WriteRegister};
use core::ops::{RangeInclusive, RangeToInclusive};

/// Perform a system reset or continue work as normal
///
/// If set to `Reset` all registers are set to their defaults. The flag clears itself once the
/// reset is done, so it always reads back as `Run`.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Reset {
    /// Continue normal operation
    #[default]
    Run = 0,
    /// Perform system reset
    Reset = 1,
}

impl Reset {
    const SHIFT: u8 = 15;
    const MASK: u16 = 1;

    #[must_use]
    const fn from_register(reg: u16) -> Self {
        match (reg >> Self::SHIFT) & Self::MASK {
            0 => Self::Run,
            _ => Self::Reset,
        }
    }

    #[must_use]
    const fn apply_to_reg(self, mut reg: u16) -> u16 {
        reg &= !(Self::MASK << Self::SHIFT);
        reg |= (self as u16) << Self::SHIFT;
        reg
    }
}

/// Measurement range for the bus voltage
#[derive(Default, Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BusVoltageRange {
    /// Maximum bus voltage of 16V
    Fsr16v = 0,
    /// Maximum bus voltage of 32V (still limited by 26V IC maximum)
    #[default]
    Fsr32v = 1,
}

impl BusVoltageRange {
    const SHIFT: u8 = 13;
    const MASK: u16 = 1;

    /// The voltage range in Volts
    #[must_use]
    pub const fn range_v(self) -> RangeToInclusive<u16> {
        match self {
            BusVoltageRange::Fsr16v => ..=16,
            BusVoltageRange::Fsr32v => ..=32,
        }
    }

    #[must_use]
    const fn from_register(reg: u16) -> Self {
        match (reg >> Self::SHIFT) & Self::MASK {
            0 => Self::Fsr16v,
            _ => Self::Fsr32v,
        }
    }

    #[must_use]
    const fn apply_to_reg(self, mut reg: u16) -> u16 {
        reg &= !(Self::MASK << Self::SHIFT);
        reg |= (self as u16) << Self::SHIFT;
        reg
    }
}

/// Gain of the shunt amplifier and with it the shunt full-scale range
#[derive(Default, Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ShuntVoltageRange {
    /// Range of ±40mV, gain of 1
    Fsr40mv = 0,
    /// Range of ±80mV, gain of 1/2
    Fsr80mv = 1,
    /// Range of ±160mV, gain of 1/4
    Fsr160mv = 2,
    /// Range of ±320mV, gain of 1/8
    #[default]
    Fsr320mv = 3,
}

impl ShuntVoltageRange {
    const SHIFT: u8 = 11;
    const MASK: u16 = 0b11;

    /// Maximum range in mV for the shunt voltage measurement
    #[must_use]
    pub const fn range_mv(self) -> RangeInclusive<i16> {
        match self {
            ShuntVoltageRange::Fsr40mv => -40..=40,
            ShuntVoltageRange::Fsr80mv => -80..=80,
            ShuntVoltageRange::Fsr160mv => -160..=160,
            ShuntVoltageRange::Fsr320mv => -320..=320,
        }
    }

    #[must_use]
    const fn from_register(reg: u16) -> Self {
        match (reg >> Self::SHIFT) & Self::MASK {
            0 => Self::Fsr40mv,
            1 => Self::Fsr80mv,
            2 => Self::Fsr160mv,
            _ => Self::Fsr320mv,
        }
    }

    #[must_use]
    const fn apply_to_reg(self, mut reg: u16) -> u16 {
        reg &= !(Self::MASK << Self::SHIFT);
        reg |= (self as u16) << Self::SHIFT;
        reg
    }
}

/// Resolution / averaging mode of the bus or shunt ADC
///
/// The discriminants are the four register bits. `Res12Bit` and `Avg1` sample the same way,
/// they are kept apart so a configuration reads back with the exact bits it was written with.
#[derive(Default, Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Resolution {
    /// Single 9 bit sample
    Res9Bit = 0b0000,
    /// Single 10 bit sample
    Res10Bit = 0b0001,
    /// Single 11 bit sample
    Res11Bit = 0b0010,
    /// Single 12 bit sample
    #[default]
    Res12Bit = 0b0011,
    /// Single 12 bit sample, selected through the averaging encoding
    Avg1 = 0b1000,
    /// 2 averaged 12 bit samples
    Avg2 = 0b1001,
    /// 4 averaged 12 bit samples
    Avg4 = 0b1010,
    /// 8 averaged 12 bit samples
    Avg8 = 0b1011,
    /// 16 averaged 12 bit samples
    Avg16 = 0b1100,
    /// 32 averaged 12 bit samples
    Avg32 = 0b1101,
    /// 64 averaged 12 bit samples
    Avg64 = 0b1110,
    /// 128 averaged 12 bit samples
    Avg128 = 0b1111,
}

impl Resolution {
    const SHIFT_BUS: u8 = 7;
    const SHIFT_SHUNT: u8 = 3;
    const MASK: u16 = 0b1111;

    #[must_use]
    const fn from_register<const SHIFT: u8>(reg: u16) -> Self {
        // With the top bit clear the next one is don't care
        match (reg >> SHIFT) & Self::MASK {
            0b0000 | 0b0100 => Self::Res9Bit,
            0b0001 | 0b0101 => Self::Res10Bit,
            0b0010 | 0b0110 => Self::Res11Bit,
            0b0011 | 0b0111 => Self::Res12Bit,
            0b1000 => Self::Avg1,
            0b1001 => Self::Avg2,
            0b1010 => Self::Avg4,
            0b1011 => Self::Avg8,
            0b1100 => Self::Avg16,
            0b1101 => Self::Avg32,
            0b1110 => Self::Avg64,
            _ => Self::Avg128,
        }
    }

    #[must_use]
    const fn apply_to_reg<const SHIFT: u8>(self, mut reg: u16) -> u16 {
        reg &= !(Self::MASK << SHIFT);
        reg |= (self as u16) << SHIFT;
        reg
    }

    /// Averaging mode taking `samples` 12 bit samples
    ///
    /// Returns `None` unless `samples` is a power of two between 1 and 128.
    #[must_use]
    pub const fn from_samples(samples: u8) -> Option<Self> {
        match samples {
            1 => Some(Self::Avg1),
            2 => Some(Self::Avg2),
            4 => Some(Self::Avg4),
            8 => Some(Self::Avg8),
            16 => Some(Self::Avg16),
            32 => Some(Self::Avg32),
            64 => Some(Self::Avg64),
            128 => Some(Self::Avg128),
            _ => None,
        }
    }

    /// Number of samples averaged into one result
    #[must_use]
    pub const fn samples(self) -> u8 {
        match self {
            Self::Res9Bit | Self::Res10Bit | Self::Res11Bit | Self::Res12Bit | Self::Avg1 => 1,
            averaged => 1 << (averaged as u8 - Self::Avg1 as u8),
        }
    }

    /// ADC bit depth of each sample
    #[must_use]
    pub const fn bit_depth(self) -> u8 {
        match self {
            Self::Res9Bit => 9,
            Self::Res10Bit => 10,
            Self::Res11Bit => 11,
            _ => 12,
        }
    }
}

/// Which signals are measured during a conversion
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MeasuredSignals {
    /// Only the shunt voltage is measured
    ShuntVoltage = 0b01,
    /// Only the bus voltage is measured
    BusVoltage = 0b10,
    /// Both voltages are measured
    #[default]
    ShuntAndBusVoltage = 0b11,
}

/// Operating mode of the INA220
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Reduce power usage and disable current into the input pins
    ///
    /// Recovery takes 40µs.
    PowerDown,
    /// Stop the conversions
    AdcOff,
    /// Convert the given signals once each time the configuration register is written
    Triggered(MeasuredSignals),
    /// Continuously convert the given signals
    Continuous(MeasuredSignals),
}

impl OperatingMode {
    const SHIFT: u8 = 0;
    const MASK: u16 = 0b111;
    const CONTINUOUS: u16 = 0b100;

    #[must_use]
    const fn from_register(reg: u16) -> Self {
        let bits = (reg >> Self::SHIFT) & Self::MASK;
        let signals = match bits & 0b11 {
            0b01 => MeasuredSignals::ShuntVoltage,
            0b10 => MeasuredSignals::BusVoltage,
            0b11 => MeasuredSignals::ShuntAndBusVoltage,
            _ => {
                return if bits & Self::CONTINUOUS == 0 {
                    Self::PowerDown
                } else {
                    Self::AdcOff
                }
            }
        };

        if bits & Self::CONTINUOUS == 0 {
            Self::Triggered(signals)
        } else {
            Self::Continuous(signals)
        }
    }

    #[must_use]
    const fn apply_to_reg(self, mut reg: u16) -> u16 {
        reg &= !(Self::MASK << Self::SHIFT);
        reg |= self.as_bits() << Self::SHIFT;
        reg
    }

    /// Return the bits representing this mode
    #[must_use]
    pub const fn as_bits(self) -> u16 {
        match self {
            OperatingMode::PowerDown => 0,
            OperatingMode::AdcOff => Self::CONTINUOUS,
            OperatingMode::Triggered(signals) => signals as u16,
            OperatingMode::Continuous(signals) => signals as u16 | Self::CONTINUOUS,
        }
    }

    /// The signals converted in this mode, `None` if the ADC does not convert
    #[must_use]
    pub const fn signals(self) -> Option<MeasuredSignals> {
        match self {
            OperatingMode::PowerDown | OperatingMode::AdcOff => None,
            OperatingMode::Triggered(signals) | OperatingMode::Continuous(signals) => {
                Some(signals)
            }
        }
    }
}

impl Default for OperatingMode {
    fn default() -> Self {
        OperatingMode::Continuous(MeasuredSignals::ShuntAndBusVoltage)
    }
}

/// Configuration register
///
/// Configures the way the INA220 performs its measurements.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    /// Indicate to perform a reset or continue to run normally
    pub reset: Reset,
    /// Maximum measurement range for the bus voltage
    pub bus_voltage_range: BusVoltageRange,
    /// Maximum measurement range for the shunt voltage
    pub shunt_voltage_range: ShuntVoltageRange,
    /// Resolution / Averaging mode for the bus voltage measurement
    pub bus_resolution: Resolution,
    /// Resolution / Averaging mode for the shunt voltage measurement
    pub shunt_resolution: Resolution,
    /// Which signals to measure and if continuous or triggered operation is set up
    pub operating_mode: OperatingMode,
}

impl Configuration {
    /// Value the configuration register holds after a power-on or software reset
    pub const RESET_VALUE: u16 = 0x399F;

    /// Continuous shunt and bus conversion at full range
    ///
    /// The bus ADC uses a single 12 bit sample and the shunt ADC averages as given by `samples`.
    #[must_use]
    pub const fn continuous(samples: Resolution) -> Self {
        Self {
            reset: Reset::Run,
            bus_voltage_range: BusVoltageRange::Fsr32v,
            shunt_voltage_range: ShuntVoltageRange::Fsr320mv,
            bus_resolution: Resolution::Avg1,
            shunt_resolution: samples,
            operating_mode: OperatingMode::Continuous(MeasuredSignals::ShuntAndBusVoltage),
        }
    }

    /// The default configuration with the reset bit set
    #[must_use]
    pub const fn reset() -> Self {
        Self {
            reset: Reset::Reset,
            bus_voltage_range: BusVoltageRange::Fsr32v,
            shunt_voltage_range: ShuntVoltageRange::Fsr320mv,
            bus_resolution: Resolution::Res12Bit,
            shunt_resolution: Resolution::Res12Bit,
            operating_mode: OperatingMode::Continuous(MeasuredSignals::ShuntAndBusVoltage),
        }
    }

    /// Turn the bits describing the configuration into a `Configuration`
    #[must_use]
    pub const fn from_bits(reg: u16) -> Self {
        Self {
            reset: Reset::from_register(reg),
            bus_voltage_range: BusVoltageRange::from_register(reg),
            shunt_voltage_range: ShuntVoltageRange::from_register(reg),
            bus_resolution: Resolution::from_register::<{ Resolution::SHIFT_BUS }>(reg),
            shunt_resolution: Resolution::from_register::<{ Resolution::SHIFT_SHUNT }>(reg),
            operating_mode: OperatingMode::from_register(reg),
        }
    }

    /// Turn this `Configuration` into the bits it describes
    #[must_use]
    pub const fn as_bits(self) -> u16 {
        let Self {
            reset,
            bus_voltage_range,
            shunt_voltage_range,
            bus_resolution,
            shunt_resolution,
            operating_mode,
        } = self;

        let mut bits = 0;
        bits = reset.apply_to_reg(bits);
        bits = bus_voltage_range.apply_to_reg(bits);
        bits = shunt_voltage_range.apply_to_reg(bits);
        bits = bus_resolution.apply_to_reg::<{ Resolution::SHIFT_BUS }>(bits);
        bits = shunt_resolution.apply_to_reg::<{ Resolution::SHIFT_SHUNT }>(bits);
        bits = operating_mode.apply_to_reg(bits);
        bits
    }
}

/// The raw bits of the configuration register
///
/// Used where the exact register contents matter, such as comparing a read-back.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigurationBits(pub u16);

impl Register for ConfigurationBits {
    const NAME: RegisterName = RegisterName::Configuration;
}

impl ReadRegister for ConfigurationBits {
    fn from_bits(bits: u16) -> Self {
        Self(bits)
    }
}

impl WriteRegister for ConfigurationBits {
    fn as_bits(&self) -> u16 {
        self.0
    }
}

impl From<Configuration> for ConfigurationBits {
    fn from(conf: Configuration) -> Self {
        Self(conf.as_bits())
    }
}

impl From<ConfigurationBits> for Configuration {
    fn from(ConfigurationBits(bits): ConfigurationBits) -> Self {
        Self::from_bits(bits)
    }
}

/// What the configuration register is compared against after [`set_config`] writes it
///
/// [`set_config`]: crate::SyncIna220::set_config
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadbackCheck {
    /// Succeed only if the register holds the driver's canonical continuous configuration, no
    /// matter which value was written
    #[default]
    Canonical,
    /// Succeed if the register holds exactly the value that was written
    Written,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_datasheet() {
        assert_eq!(Configuration::default().as_bits(), Configuration::RESET_VALUE);
        assert_eq!(
            Configuration::from_bits(Configuration::RESET_VALUE),
            Configuration::default()
        );
        assert_eq!(Configuration::reset().as_bits(), 0xB99F);
    }

    #[test]
    fn continuous_layout() {
        assert_eq!(Configuration::continuous(Resolution::Avg1).as_bits(), 0x3C47);

        // Each doubling of the shunt samples moves one step up the averaging encoding
        let mut expected = 0x3C47;
        for samples in [2, 4, 8, 16, 32, 64, 128] {
            expected += 0b1000;
            let res = Resolution::from_samples(samples).unwrap();
            assert_eq!(res.samples(), samples);
            assert_eq!(Configuration::continuous(res).as_bits(), expected);
        }
    }

    #[test]
    fn is_inverse() {
        // Every pattern survives decode, encode, decode. Only the don't care ADC3 bits of the
        // single sample resolutions and the unused bit 14 may differ from the input.
        let bits_to_ignore = 0b0100_0010_0010_0000;

        for val in 0..=u16::MAX {
            let register = Configuration::from_bits(val);
            let bits_cleaned = register.as_bits();
            assert_eq!(register, Configuration::from_bits(bits_cleaned));
            assert_eq!(val | bits_to_ignore, bits_cleaned | bits_to_ignore);
        }
    }

    #[test]
    fn operating_modes() {
        let modes = [
            (0b000, OperatingMode::PowerDown),
            (0b001, OperatingMode::Triggered(MeasuredSignals::ShuntVoltage)),
            (0b010, OperatingMode::Triggered(MeasuredSignals::BusVoltage)),
            (0b011, OperatingMode::Triggered(MeasuredSignals::ShuntAndBusVoltage)),
            (0b100, OperatingMode::AdcOff),
            (0b101, OperatingMode::Continuous(MeasuredSignals::ShuntVoltage)),
            (0b110, OperatingMode::Continuous(MeasuredSignals::BusVoltage)),
            (0b111, OperatingMode::Continuous(MeasuredSignals::ShuntAndBusVoltage)),
        ];

        for (bits, mode) in modes {
            assert_eq!(OperatingMode::from_register(bits), mode);
            assert_eq!(mode.as_bits(), bits);
        }
    }

    #[test]
    fn resolution_details() {
        assert_eq!(Resolution::Res9Bit.bit_depth(), 9);
        assert_eq!(Resolution::Res9Bit.samples(), 1);
        assert_eq!(Resolution::Avg128.bit_depth(), 12);
        assert_eq!(Resolution::Avg128.samples(), 128);
        assert_eq!(Resolution::from_samples(3), None);
        assert_eq!(Resolution::from_samples(0), None);
    }
}
