//! Measuring one supply rail with a low range and a high range monitor on the same bus
//!
//! The supply board carries two INA220: one across a 75Ω shunt for small currents and one across a
//! 0.6Ω shunt for large ones. [`LOW_RANGE`] and [`HIGH_RANGE`] describe them.

use crate::address::{Address, Pin};
use crate::configuration::Resolution;
use crate::identity::Identity;
use crate::measurements::{BusVoltage, Current};
use crate::shunt::ShuntResistance;

const LOW_RANGE_SHUNT: ShuntResistance = match ShuntResistance::from_milli_ohms(75_000) {
    Some(shunt) => shunt,
    None => panic!("75Ω is a valid shunt"),
};

const HIGH_RANGE_SHUNT: ShuntResistance = match ShuntResistance::from_milli_ohms(600) {
    Some(shunt) => shunt,
    None => panic!("0.6Ω is a valid shunt"),
};

/// The monitor for small currents, at 0x40 across 75Ω
pub const LOW_RANGE: Identity = Identity::new(
    Address::from_pins(Pin::Gnd, Pin::Gnd),
    LOW_RANGE_SHUNT,
    "LOW",
    Resolution::Avg1,
);

/// The monitor for large currents, at 0x41 across 0.6Ω
pub const HIGH_RANGE: Identity = Identity::new(
    Address::from_pins(Pin::Vs, Pin::Gnd),
    HIGH_RANGE_SHUNT,
    "HIGH",
    Resolution::Avg1,
);

/// Which monitor of a supply monitor takes a measurement
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Range {
    /// The monitor across the large shunt
    Low,
    /// The monitor across the small shunt
    High,
}

/// Voltage and current of a supply rail, as taken by one monitor
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SupplyStats {
    /// Monitor that took the measurement
    pub range: Range,
    /// Voltage of the rail
    pub bus_voltage: BusVoltage,
    /// Current drawn from the rail
    pub current: Current,
}

impl SupplyStats {
    /// Rail voltage in mV
    #[must_use]
    pub const fn voltage_mv(&self) -> u16 {
        self.bus_voltage.voltage_mv()
    }

    /// Rail current in µA, truncating trailing digits
    #[must_use]
    pub fn current_ua(&self) -> u64 {
        self.current.magnitude_ua()
    }
}
