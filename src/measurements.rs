//! Measurement values decoded from the INA220 result registers

use crate::register::{ReadRegister, Register, RegisterName};
use crate::shunt::ShuntResistance;

/// How many times the bus voltage register is polled for the conversion ready flag
pub const CONVERSION_POLL_ATTEMPTS: u8 = 10;

/// Sleep before each poll of the conversion ready flag, in ms
pub const CONVERSION_POLL_INTERVAL_MS: u32 = 100;

/// Contents of the bus voltage register
///
/// This contains next to the measurement also some flags about the last measurement.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusVoltage(u16);

impl BusVoltage {
    /// Value of one step of the bus voltage result
    pub const LSB_MV: u16 = 4;

    const CONVERSION_READY: u16 = 0b10;
    const MATH_OVERFLOW: u16 = 0b01;

    /// Create `BusVoltage` from the contents of the register.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// The register contents including the flag bits
    #[must_use]
    pub const fn as_bits(self) -> u16 {
        self.0
    }

    /// Return the bus voltage in the internal resolution of 4mV
    #[must_use]
    pub const fn voltage_4mv(self) -> u16 {
        self.0 >> 3
    }

    /// Return the bus voltage in mV
    #[must_use]
    pub const fn voltage_mv(self) -> u16 {
        self.voltage_4mv() * Self::LSB_MV
    }

    /// Return the bus voltage in V
    #[must_use]
    pub fn volts(self) -> f32 {
        f32::from(self.voltage_mv()) / 1_000.0
    }

    /// Check if the conversion ready flag is set
    ///
    /// The result registers always hold the last conversion. This flag tells whether a **new** one
    /// finished since the configuration register was last written.
    #[must_use]
    pub const fn is_conversion_ready(self) -> bool {
        self.0 & Self::CONVERSION_READY != 0
    }

    /// This flag is set if the power or current calculation overflowed.
    #[must_use]
    pub const fn has_math_overflowed(self) -> bool {
        self.0 & Self::MATH_OVERFLOW != 0
    }
}

impl Register for BusVoltage {
    const NAME: RegisterName = RegisterName::BusVoltage;
}

impl ReadRegister for BusVoltage {
    fn from_bits(bits: u16) -> Self {
        Self(bits)
    }
}

/// Contents of the shunt voltage register
///
/// The register holds a sign bit (bit 15) over a two's complement value in steps of 10µV. Two
/// views are offered: the magnitude, which drops the sign, and the signed value.
///
/// ```rust
/// use ina220::measurements::ShuntVoltage;
///
/// let reverse = ShuntVoltage::from_bits(0xFF9C);
/// assert_eq!(reverse.magnitude_10uv(), 100);
/// assert_eq!(reverse.signed_10uv(), -100);
/// ```
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShuntVoltage(u16);

impl ShuntVoltage {
    /// Value of one step of the shunt voltage result
    pub const LSB_UV: u32 = 10;

    const SIGN: u16 = 0x8000;

    /// Create `ShuntVoltage` from the contents of the register.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// The register contents
    #[must_use]
    pub const fn as_bits(self) -> u16 {
        self.0
    }

    /// Whether the sign bit is set, so current flows from IN- to IN+
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 & Self::SIGN != 0
    }

    /// Size of the shunt voltage in steps of 10µV, without its sign
    #[must_use]
    pub const fn magnitude_10uv(self) -> u16 {
        if self.is_negative() {
            (u16::MAX - self.0) + 1
        } else {
            self.0 & !Self::SIGN
        }
    }

    /// Size of the shunt voltage in µV, without its sign
    #[must_use]
    pub fn magnitude_uv(self) -> u32 {
        u32::from(self.magnitude_10uv()) * Self::LSB_UV
    }

    /// Size of the shunt voltage in V, without its sign
    #[must_use]
    pub fn magnitude_v(self) -> f32 {
        f32::from(self.magnitude_10uv()) / 100_000.0
    }

    /// Shunt voltage in steps of 10µV
    #[must_use]
    pub const fn signed_10uv(self) -> i16 {
        i16::from_ne_bytes(self.0.to_ne_bytes())
    }

    /// Shunt voltage in µV
    #[must_use]
    pub fn signed_uv(self) -> i32 {
        i32::from(self.signed_10uv()) * 10
    }

    /// Shunt voltage in V
    #[must_use]
    pub fn signed_v(self) -> f32 {
        f32::from(self.signed_10uv()) / 100_000.0
    }
}

impl Register for ShuntVoltage {
    const NAME: RegisterName = RegisterName::ShuntVoltage;
}

impl ReadRegister for ShuntVoltage {
    fn from_bits(bits: u16) -> Self {
        Self(bits)
    }
}

/// Current through the shunt, derived from the shunt voltage by Ohm's law
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Current {
    shunt_voltage: ShuntVoltage,
    shunt: ShuntResistance,
}

impl Current {
    /// The current `shunt_voltage` drives through `shunt`
    #[must_use]
    pub const fn new(shunt_voltage: ShuntVoltage, shunt: ShuntResistance) -> Self {
        Self {
            shunt_voltage,
            shunt,
        }
    }

    /// The shunt voltage this current was derived from
    #[must_use]
    pub const fn shunt_voltage(self) -> ShuntVoltage {
        self.shunt_voltage
    }

    /// The resistor this current was derived with
    #[must_use]
    pub const fn shunt(self) -> ShuntResistance {
        self.shunt
    }

    /// Current in A, without its sign
    #[must_use]
    pub fn amps(self) -> f32 {
        self.shunt_voltage.magnitude_v() / self.shunt.ohms()
    }

    /// Current in A
    #[must_use]
    pub fn signed_amps(self) -> f32 {
        self.shunt_voltage.signed_v() / self.shunt.ohms()
    }

    /// Current in nA, without its sign
    #[must_use]
    pub fn magnitude_na(self) -> u64 {
        u64::from(self.shunt_voltage.magnitude_uv()) * 1_000_000_000
            / u64::from(self.shunt.micro_ohms())
    }

    /// Current in µA, without its sign, truncating trailing digits
    #[must_use]
    pub fn magnitude_ua(self) -> u64 {
        self.magnitude_na() / 1_000
    }

    /// Current in nA
    #[must_use]
    pub fn signed_na(self) -> i64 {
        i64::from(self.shunt_voltage.signed_uv()) * 1_000_000_000
            / i64::from(self.shunt.micro_ohms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= b.abs() * 1e-5
    }

    #[test]
    fn bus_voltage() {
        let bv = BusVoltage::from_bits(0x1002);
        assert_eq!(bv.voltage_4mv(), 512);
        assert_eq!(bv.voltage_mv(), 2_048);
        assert!(close(bv.volts(), 2.048));
        assert!(bv.is_conversion_ready());
        assert!(!bv.has_math_overflowed());

        let bv = BusVoltage::from_bits((8000 << 3) | 0b01);
        assert_eq!(bv.voltage_mv(), 32_000);
        assert!(!bv.is_conversion_ready());
        assert!(bv.has_math_overflowed());
    }

    #[test]
    fn positive_shunt_voltage() {
        let sv = ShuntVoltage::from_bits(0x0064);
        assert!(!sv.is_negative());
        assert_eq!(sv.magnitude_10uv(), 100);
        assert_eq!(sv.magnitude_uv(), 1_000);
        assert!(close(sv.magnitude_v(), 0.001));
        assert!(close(sv.signed_v(), 0.001));
    }

    #[test]
    fn negative_shunt_voltage() {
        // Sign bit over 0x0064: the magnitude comes from the two's complement of the whole word
        let sv = ShuntVoltage::from_bits(0x8064);
        assert!(sv.is_negative());
        assert_eq!(sv.magnitude_10uv(), 0x7F9C);
        assert_eq!(sv.magnitude_10uv(), 32_668);
        assert!(close(sv.magnitude_v(), 0.32668));
        assert_eq!(sv.signed_10uv(), -32_668);
        assert!(close(sv.signed_v(), -0.32668));

        // Table 7 of the datasheet
        let sv = ShuntVoltage::from_bits(0b1000_0011_0000_0000);
        assert_eq!(sv.magnitude_10uv(), 32_000);
        assert_eq!(sv.signed_uv(), -320_000);

        let sv = ShuntVoltage::from_bits(0x8000);
        assert_eq!(sv.magnitude_10uv(), 0x8000);
    }

    #[test]
    fn current_from_low_range_shunt() {
        let shunt = ShuntResistance::from_milli_ohms(75_000).unwrap();
        let current = Current::new(ShuntVoltage::from_bits(0x0064), shunt);

        assert!(close(current.amps(), 0.001 / 75.0));
        assert_eq!(current.magnitude_na(), 13_333);
        assert_eq!(current.magnitude_ua(), 13);
    }

    #[test]
    fn current_keeps_sign_only_in_signed_view() {
        let shunt = ShuntResistance::from_milli_ohms(600).unwrap();
        let current = Current::new(ShuntVoltage::from_bits(0xFF9C), shunt);

        assert!(close(current.amps(), 0.001 / 0.6));
        assert!(close(current.signed_amps(), -0.001 / 0.6));
        assert_eq!(current.magnitude_na(), 1_666_666);
        assert_eq!(current.signed_na(), -1_666_666);
    }
}
