//! Strobe line driven around the shunt register read
//!
//! Boards route a GPIO to a test point so external instruments can see when the shunt voltage is
//! sampled. [`NoStrobe`] stands in on boards without such a line.

use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, OutputPin};

/// An [`OutputPin`] that is not connected to anything
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct NoStrobe;

impl ErrorType for NoStrobe {
    type Error = Infallible;
}

impl OutputPin for NoStrobe {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
