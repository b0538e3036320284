use ina220::strobe::NoStrobe;
use ina220::supply::LOW_RANGE;
use ina220::SyncIna220;
use linux_embedded_hal::{Delay, I2cdev};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut bus = I2cdev::new("/dev/i2c-1")?;
    let mut ina = SyncIna220::new(&mut bus, LOW_RANGE, NoStrobe, Delay).map_err(|e| e.reason)?;

    let bus_voltage = ina.read_bus_voltage(&mut bus)?;
    let current = ina.measure_current(&mut bus)?;

    println!("Bus Voltage: {} mV", bus_voltage.voltage_mv());
    println!("Current:     {} nA", current.magnitude_na());

    Ok(())
}
