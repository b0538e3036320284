//! Value of the shunt resistor a monitor measures across

/// Resistance of a shunt resistor, never zero
///
/// ```rust
/// use ina220::shunt::ShuntResistance;
///
/// let shunt = ShuntResistance::from_milli_ohms(600).unwrap();
/// assert_eq!(shunt.micro_ohms(), 600_000);
/// assert!(ShuntResistance::from_micro_ohms(0).is_none());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShuntResistance {
    micro_ohms: u32,
}

impl ShuntResistance {
    /// Shunt of `micro_ohms` µΩ, `None` if zero
    #[must_use]
    pub const fn from_micro_ohms(micro_ohms: u32) -> Option<Self> {
        if micro_ohms == 0 {
            None
        } else {
            Some(Self { micro_ohms })
        }
    }

    /// Shunt of `milli_ohms` mΩ, `None` if zero or not representable in µΩ
    #[must_use]
    pub const fn from_milli_ohms(milli_ohms: u32) -> Option<Self> {
        match milli_ohms.checked_mul(1_000) {
            Some(micro_ohms) => Self::from_micro_ohms(micro_ohms),
            None => None,
        }
    }

    /// Resistance in µΩ
    #[must_use]
    pub const fn micro_ohms(self) -> u32 {
        self.micro_ohms
    }

    /// Resistance in Ω
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ohms(self) -> f32 {
        self.micro_ohms as f32 / 1_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supply_board_shunts() {
        let low = ShuntResistance::from_milli_ohms(75_000).unwrap();
        let high = ShuntResistance::from_milli_ohms(600).unwrap();

        assert!((low.ohms() - 75.0).abs() < 1e-6);
        assert!((high.ohms() - 0.6).abs() < 1e-6);
        assert!(high < low);
    }

    #[test]
    fn rejects_unrepresentable() {
        assert!(ShuntResistance::from_milli_ohms(0).is_none());
        assert!(ShuntResistance::from_milli_ohms(u32::MAX).is_none());
    }
}
