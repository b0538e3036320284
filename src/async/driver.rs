use crate::address::Address;
use crate::configuration::{Configuration, ConfigurationBits, ReadbackCheck};
use crate::errors::{InitializationError, InitializationErrorReason, MeasurementError};
use crate::identity::Identity;
use crate::measurements::{
    BusVoltage, Current, ShuntVoltage, CONVERSION_POLL_ATTEMPTS, CONVERSION_POLL_INTERVAL_MS,
};
use crate::register::{ReadRegister, WriteRegister};
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// Embedded HAL compatible driver for the INA220
///
/// The driver keeps the device in one canonical configuration: continuous conversion of shunt and
/// bus voltage at full range, see [`Identity::canonical_configuration`]. Every measurement writes
/// that configuration again to start a fresh conversion and then waits for it to finish.
///
/// The bus is not owned by the driver. Each operation borrows it for as long as it runs, which
/// keeps the register accesses of one operation together when monitors share a bus.
pub struct INA220<Strobe, Delay> {
    identity: Identity,
    config: Configuration,
    check: ReadbackCheck,
    strobe: Strobe,
    delay: Delay,
}

impl<Strobe, Delay> INA220<Strobe, Delay>
where
    Strobe: OutputPin,
    Delay: DelayNs,
{
    /// Open an INA220, reset it and put it into its canonical configuration
    ///
    /// A reset or configuration that does not read back as expected is logged but does not fail.
    ///
    /// # Errors
    /// If the bus or the strobe pin fails an `InitializationError` holding the strobe pin and the
    /// delay is returned.
    #[allow(clippy::type_complexity)]
    pub async fn new<I2C: I2c>(
        bus: &mut I2C,
        identity: Identity,
        strobe: Strobe,
        delay: Delay,
    ) -> Result<Self, InitializationError<(Strobe, Delay), I2C::Error, Strobe::Error>> {
        Self::new_with_check(bus, identity, ReadbackCheck::default(), strobe, delay).await
    }

    /// Like [`Self::new`] but with an explicit choice of what [`Self::set_config`] compares the
    /// configuration register against
    ///
    /// # Errors
    /// If the bus or the strobe pin fails an `InitializationError` holding the strobe pin and the
    /// delay is returned.
    #[allow(clippy::type_complexity)]
    pub async fn new_with_check<I2C: I2c>(
        bus: &mut I2C,
        identity: Identity,
        check: ReadbackCheck,
        strobe: Strobe,
        delay: Delay,
    ) -> Result<Self, InitializationError<(Strobe, Delay), I2C::Error, Strobe::Error>> {
        let mut new = Self::new_unchecked(identity, check, strobe, delay);

        // Hand the parts back if anything goes wrong
        match new.init(bus).await {
            Ok(()) => Ok(new),
            Err(e) => Err(InitializationError::new(e, new.destroy())),
        }
    }

    /// Bring the device into a known state
    /// - Drive the strobe line low
    /// - Perform a reset
    /// - Write the canonical configuration
    /// - Read the configuration and report the operating mode it selects
    async fn init<I2C: I2c>(
        &mut self,
        bus: &mut I2C,
    ) -> Result<(), InitializationErrorReason<I2C::Error, Strobe::Error>> {
        self.strobe
            .set_low()
            .map_err(InitializationErrorReason::StrobeError)?;

        self.reset(bus).await?;
        self.set_config(bus, self.config.as_bits()).await?;

        let read = self.configuration(bus).await?;
        if read.operating_mode == self.config.operating_mode {
            debug!("{}: continuous shunt and bus voltage mode", self.name());
        } else {
            warn!(
                "{}: unexpected operating mode {:#x}",
                self.name(),
                read.operating_mode.as_bits()
            );
        }

        Ok(())
    }

    /// Create a new `INA220` assuming the device is already in its canonical configuration
    ///
    /// Nothing is written to the device.
    pub const fn new_unchecked(
        identity: Identity,
        check: ReadbackCheck,
        strobe: Strobe,
        delay: Delay,
    ) -> Self {
        INA220 {
            identity,
            config: identity.canonical_configuration(),
            check,
            strobe,
            delay,
        }
    }

    /// Destroy the driver returning the strobe pin and the delay
    ///
    /// This does leave the device in its current state.
    pub fn destroy(self) -> (Strobe, Delay) {
        (self.strobe, self.delay)
    }

    /// The device this driver talks to
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Name used in diagnostics
    pub const fn name(&self) -> &'static str {
        self.identity.name()
    }

    /// The configuration written before every measurement
    pub const fn canonical_configuration(&self) -> Configuration {
        self.config
    }

    /// What [`Self::set_config`] compares the read-back against
    pub const fn readback_check(&self) -> ReadbackCheck {
        self.check
    }

    /// Perform a software reset
    ///
    /// Returns `Ok(true)` if the configuration register reads back its reset value afterwards.
    ///
    /// # Errors
    /// Returns Err() when the bus returns an error.
    pub async fn reset<I2C: I2c>(&mut self, bus: &mut I2C) -> Result<bool, I2C::Error> {
        let address = self.identity.address();
        write_register(bus, address, &ConfigurationBits::from(Configuration::reset())).await?;

        let ConfigurationBits(read) = read_register(bus, address).await?;
        if read == Configuration::RESET_VALUE {
            Ok(true)
        } else {
            warn!("{}: configuration {:#x} after reset", self.name(), read);
            Ok(false)
        }
    }

    /// Write `value` to the configuration register and read it back
    ///
    /// With [`ReadbackCheck::Canonical`] this returns `Ok(true)` only if the register then holds
    /// the canonical configuration, so writing any other value reports `Ok(false)` even though the
    /// write went through. With [`ReadbackCheck::Written`] the read-back is compared to `value`.
    ///
    /// # Errors
    /// Returns Err() when the bus returns an error.
    pub async fn set_config<I2C: I2c>(
        &mut self,
        bus: &mut I2C,
        value: u16,
    ) -> Result<bool, I2C::Error> {
        let address = self.identity.address();
        write_register(bus, address, &ConfigurationBits(value)).await?;

        let ConfigurationBits(read) = read_register(bus, address).await?;
        let expected = match self.check {
            ReadbackCheck::Canonical => self.config.as_bits(),
            ReadbackCheck::Written => value,
        };

        if read == expected {
            debug!("{}: configured {:#x}", self.name(), read);
            Ok(true)
        } else {
            warn!(
                "{}: configuration reads {:#x}, expected {:#x}",
                self.name(),
                read,
                expected
            );
            Ok(false)
        }
    }

    /// Write a typed [`Configuration`], see [`Self::set_config`]
    ///
    /// # Errors
    /// Returns Err() when the bus returns an error.
    pub async fn set_configuration<I2C: I2c>(
        &mut self,
        bus: &mut I2C,
        conf: Configuration,
    ) -> Result<bool, I2C::Error> {
        self.set_config(bus, conf.as_bits()).await
    }

    /// Read the current [`Configuration`]
    ///
    /// # Errors
    /// Returns Err() when the bus returns an error.
    pub async fn configuration<I2C: I2c>(
        &mut self,
        bus: &mut I2C,
    ) -> Result<Configuration, I2C::Error> {
        let bits: ConfigurationBits = read_register(bus, self.identity.address()).await?;
        Ok(bits.into())
    }

    /// Start a new conversion by writing the canonical configuration
    ///
    /// # Errors
    /// Returns Err() when the bus returns an error.
    pub async fn trigger<I2C: I2c>(&mut self, bus: &mut I2C) -> Result<(), I2C::Error> {
        write_register(bus, self.identity.address(), &ConfigurationBits::from(self.config)).await
    }

    /// Start a conversion and return the bus voltage once it is done
    ///
    /// # Errors
    /// Returns an error if the bus fails or the conversion ready flag is not seen within
    /// [`CONVERSION_POLL_ATTEMPTS`] polls.
    pub async fn read_bus_voltage<I2C: I2c>(
        &mut self,
        bus: &mut I2C,
    ) -> Result<BusVoltage, MeasurementError<I2C::Error, Strobe::Error>> {
        self.trigger(bus).await?;
        self.wait_for_conversion(bus).await
    }

    /// Start a conversion and return the shunt voltage once it is done
    ///
    /// The strobe line is high while the shunt voltage register is read.
    ///
    /// # Errors
    /// Returns an error if the bus or the strobe pin fails or the conversion ready flag is not seen
    /// within [`CONVERSION_POLL_ATTEMPTS`] polls.
    pub async fn read_shunt_voltage<I2C: I2c>(
        &mut self,
        bus: &mut I2C,
    ) -> Result<ShuntVoltage, MeasurementError<I2C::Error, Strobe::Error>> {
        self.trigger(bus).await?;
        self.wait_for_conversion(bus).await?;

        self.strobe
            .set_high()
            .map_err(MeasurementError::StrobeError)?;
        let read = read_register::<I2C, ShuntVoltage>(bus, self.identity.address()).await;
        self.strobe
            .set_low()
            .map_err(MeasurementError::StrobeError)?;

        let shunt_voltage = read?;
        debug!(
            "{}: shunt voltage {} x 10uV",
            self.name(),
            shunt_voltage.magnitude_10uv()
        );
        Ok(shunt_voltage)
    }

    /// Measure the current through the shunt
    ///
    /// # Errors
    /// The same as [`Self::read_shunt_voltage`].
    pub async fn measure_current<I2C: I2c>(
        &mut self,
        bus: &mut I2C,
    ) -> Result<Current, MeasurementError<I2C::Error, Strobe::Error>> {
        let shunt_voltage = self.read_shunt_voltage(bus).await?;
        Ok(Current::new(shunt_voltage, self.identity.shunt()))
    }

    /// Poll the bus voltage register until the conversion ready flag is set
    async fn wait_for_conversion<I2C: I2c>(
        &mut self,
        bus: &mut I2C,
    ) -> Result<BusVoltage, MeasurementError<I2C::Error, Strobe::Error>> {
        let address = self.identity.address();

        for _ in 0..CONVERSION_POLL_ATTEMPTS {
            self.delay.delay_ms(CONVERSION_POLL_INTERVAL_MS).await;

            let bus_voltage: BusVoltage = read_register(bus, address).await?;
            if bus_voltage.is_conversion_ready() {
                return Ok(bus_voltage);
            }
        }

        warn!(
            "{}: conversion not ready after {} polls",
            self.name(),
            CONVERSION_POLL_ATTEMPTS
        );
        Err(MeasurementError::not_ready())
    }
}

async fn read_register<I2C: I2c, Reg: ReadRegister>(
    bus: &mut I2C,
    address: Address,
) -> Result<Reg, I2C::Error> {
    let mut buf: [u8; 2] = [0x00; 2];
    bus.write_read(address.as_byte(), &[Reg::ADDRESS], &mut buf)
        .await?;
    Ok(Reg::from_bits(u16::from_be_bytes(buf)))
}

async fn write_register<I2C: I2c, Reg: WriteRegister>(
    bus: &mut I2C,
    address: Address,
    value: &Reg,
) -> Result<(), I2C::Error> {
    let [val0, val1] = value.as_bits().to_be_bytes();
    bus.write(address.as_byte(), &[Reg::ADDRESS, val0, val1])
        .await
}
