use ina220::address::{Address, Pin};
use ina220::configuration::{
    BusVoltageRange, Configuration, MeasuredSignals, OperatingMode, ReadbackCheck, Reset,
    Resolution, ShuntVoltageRange,
};
use ina220::identity::Identity;
use ina220::shunt::ShuntResistance;
use ina220::strobe::NoStrobe;
use ina220::SyncIna220;
use linux_embedded_hal::{Delay, I2cdev};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let shunt = ShuntResistance::from_milli_ohms(100).ok_or("invalid shunt")?;
    let identity = Identity::new(
        Address::from_pins(Pin::Gnd, Pin::Sda),
        shunt,
        "BOARD",
        Resolution::Avg16,
    );

    let mut bus = I2cdev::new("/dev/i2c-1")?;
    // Compare read-backs against what was written rather than the canonical configuration
    let mut ina = SyncIna220::new_with_check(
        &mut bus,
        identity,
        ReadbackCheck::Written,
        NoStrobe,
        Delay,
    )
    .map_err(|e| e.reason)?;

    let accepted = ina.set_configuration(
        &mut bus,
        Configuration {
            // Be extra precise, but take some extra time
            bus_resolution: Resolution::Avg128,
            shunt_resolution: Resolution::Avg128,

            // Values larger than the range are truncated to the max
            bus_voltage_range: BusVoltageRange::Fsr16v,
            shunt_voltage_range: ShuntVoltageRange::Fsr40mv,

            operating_mode: OperatingMode::Continuous(MeasuredSignals::ShuntAndBusVoltage),
            reset: Reset::Run,
        },
    )?;
    println!("Configuration accepted: {accepted}");
    println!("Configuration: {:?}", ina.configuration(&mut bus)?);

    // Every measurement goes back to the canonical configuration first
    let bus_voltage = ina.read_bus_voltage(&mut bus)?;
    let shunt_voltage = ina.read_shunt_voltage(&mut bus)?;
    println!("Bus:   {:.3} V", bus_voltage.volts());
    println!("Shunt: {} uV", shunt_voltage.signed_uv());

    Ok(())
}
