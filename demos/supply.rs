use ina220::strobe::NoStrobe;
use ina220::supply::{Range, HIGH_RANGE, LOW_RANGE};
use ina220::{SyncIna220, SyncSupplyMonitor};
use linux_embedded_hal::{Delay, I2cdev};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Both monitors of the supply board sit on the same bus
    let mut bus = I2cdev::new("/dev/i2c-1")?;
    let low = SyncIna220::new(&mut bus, LOW_RANGE, NoStrobe, Delay).map_err(|e| e.reason)?;
    let high = SyncIna220::new(&mut bus, HIGH_RANGE, NoStrobe, Delay).map_err(|e| e.reason)?;
    let mut supply = SyncSupplyMonitor::new(low, high);

    for range in [Range::Low, Range::High] {
        let stats = supply.measure(&mut bus, range)?;
        println!(
            "{:>4}: {:>5} mV {:>8} uA",
            supply.monitor(range).name(),
            stats.voltage_mv(),
            stats.current_ua()
        );
    }

    Ok(())
}
