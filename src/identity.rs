//! What a driver instance knows about the device it talks to

use crate::address::Address;
use crate::configuration::{Configuration, Resolution};
use crate::shunt::ShuntResistance;

/// Fixed facts about one INA220 on the board
///
/// Set once when the driver is created and never changed afterwards.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identity {
    address: Address,
    shunt: ShuntResistance,
    name: &'static str,
    samples: Resolution,
}

impl Identity {
    /// Describe the device at `address` measuring across `shunt`
    #[must_use]
    pub const fn new(
        address: Address,
        shunt: ShuntResistance,
        name: &'static str,
        samples: Resolution,
    ) -> Self {
        Self {
            address,
            shunt,
            name,
            samples,
        }
    }

    /// Bus address of the device
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Shunt resistor the device measures across
    #[must_use]
    pub const fn shunt(&self) -> ShuntResistance {
        self.shunt
    }

    /// Name used in diagnostics
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Shunt ADC resolution / averaging
    #[must_use]
    pub const fn samples(&self) -> Resolution {
        self.samples
    }

    /// The configuration the driver keeps the device in
    #[must_use]
    pub const fn canonical_configuration(&self) -> Configuration {
        Configuration::continuous(self.samples)
    }
}
