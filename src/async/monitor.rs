use super::driver::INA220;
use crate::errors::MeasurementError;
use crate::supply::{Range, SupplyStats};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// Two monitors on one supply rail, one for small and one for large currents
///
/// Both monitors share the bus handed to [`Self::measure`].
pub struct SupplyMonitor<Strobe, Delay> {
    low: INA220<Strobe, Delay>,
    high: INA220<Strobe, Delay>,
}

impl<Strobe, Delay> SupplyMonitor<Strobe, Delay>
where
    Strobe: OutputPin,
    Delay: DelayNs,
{
    /// Pair two initialized monitors, see [`LOW_RANGE`](crate::supply::LOW_RANGE) and
    /// [`HIGH_RANGE`](crate::supply::HIGH_RANGE)
    pub const fn new(low: INA220<Strobe, Delay>, high: INA220<Strobe, Delay>) -> Self {
        Self { low, high }
    }

    /// The monitor for `range`
    pub fn monitor(&mut self, range: Range) -> &mut INA220<Strobe, Delay> {
        match range {
            Range::Low => &mut self.low,
            Range::High => &mut self.high,
        }
    }

    /// Measure the rail voltage and current with the monitor for `range`
    ///
    /// # Errors
    /// Returns the first error of the bus voltage or current measurement.
    pub async fn measure<I2C: I2c>(
        &mut self,
        bus: &mut I2C,
        range: Range,
    ) -> Result<SupplyStats, MeasurementError<I2C::Error, Strobe::Error>> {
        let monitor = self.monitor(range);
        let bus_voltage = monitor.read_bus_voltage(bus).await?;
        let current = monitor.measure_current(bus).await?;

        Ok(SupplyStats {
            range,
            bus_voltage,
            current,
        })
    }

    /// Split into the low and high range monitors
    pub fn destroy(self) -> (INA220<Strobe, Delay>, INA220<Strobe, Delay>) {
        (self.low, self.high)
    }
}
