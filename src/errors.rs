//! Errors that can be returned by the different functions
//!
//! A configuration register that does not read back as expected is not an error: [`reset`] and
//! [`set_config`] report it as `Ok(false)`.
//!
//! [`reset`]: crate::SyncIna220::reset
//! [`set_config`]: crate::SyncIna220::set_config

use crate::measurements::CONVERSION_POLL_ATTEMPTS;
use core::fmt::{Debug, Display, Formatter};

/// Creating a driver failed, the parts it was given are handed back in `device`
#[derive(Debug)]
pub struct InitializationError<Parts, I2cErr, PinErr> {
    /// What went wrong
    pub reason: InitializationErrorReason<I2cErr, PinErr>,
    /// The strobe pin and delay given to the driver
    pub device: Parts,
}

impl<Parts, I2cErr, PinErr> InitializationError<Parts, I2cErr, PinErr> {
    pub(crate) const fn new(reason: InitializationErrorReason<I2cErr, PinErr>, device: Parts) -> Self {
        Self { reason, device }
    }
}

impl<Parts, I2cErr: Debug, PinErr: Debug> Display for InitializationError<Parts, I2cErr, PinErr> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.reason, f)
    }
}

#[cfg(feature = "std")]
impl<Parts, I2cErr, PinErr> std::error::Error for InitializationError<Parts, I2cErr, PinErr>
where
    Parts: Debug,
    I2cErr: Debug + std::error::Error + 'static,
    PinErr: Debug + std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

/// Error conditions that can appear during initialization
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InitializationErrorReason<I2cErr, PinErr> {
    /// An I2C read or write failed
    I2cError(I2cErr),
    /// The strobe pin could not be driven low
    StrobeError(PinErr),
}

impl<E, P> From<E> for InitializationErrorReason<E, P> {
    fn from(value: E) -> Self {
        Self::I2cError(value)
    }
}

impl<I2cErr: Debug, PinErr: Debug> Display for InitializationErrorReason<I2cErr, PinErr> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2cError(err) => write!(f, "I2C error: {err:?}"),
            Self::StrobeError(err) => write!(f, "Strobe pin error: {err:?}"),
        }
    }
}

#[cfg(feature = "std")]
impl<I2cErr, PinErr> std::error::Error for InitializationErrorReason<I2cErr, PinErr>
where
    I2cErr: Debug + std::error::Error + 'static,
    PinErr: Debug + std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::I2cError(err) => Some(err),
            Self::StrobeError(err) => Some(err),
        }
    }
}

/// Errors that can happen when a measurement is read
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MeasurementError<I2cErr, PinErr> {
    /// An I2C read or write failed
    I2cError(I2cErr),
    /// The strobe pin around the shunt read could not be driven
    StrobeError(PinErr),
    /// The conversion ready flag stayed clear for every poll
    ConversionNotReady {
        /// How often the bus voltage register was polled
        attempts: u8,
    },
}

impl<I2cErr, PinErr> MeasurementError<I2cErr, PinErr> {
    pub(crate) const fn not_ready() -> Self {
        Self::ConversionNotReady {
            attempts: CONVERSION_POLL_ATTEMPTS,
        }
    }
}

impl<E, P> From<E> for MeasurementError<E, P> {
    fn from(value: E) -> Self {
        Self::I2cError(value)
    }
}

impl<I2cErr: Debug, PinErr: Debug> Display for MeasurementError<I2cErr, PinErr> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2cError(err) => write!(f, "I2C error: {err:?}"),
            Self::StrobeError(err) => write!(f, "Strobe pin error: {err:?}"),
            Self::ConversionNotReady { attempts } => {
                write!(f, "Conversion not ready after {attempts} polls")
            }
        }
    }
}

#[cfg(feature = "std")]
impl<I2cErr, PinErr> std::error::Error for MeasurementError<I2cErr, PinErr>
where
    I2cErr: Debug + std::error::Error + 'static,
    PinErr: Debug + std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::I2cError(err) => Some(err),
            Self::StrobeError(err) => Some(err),
            Self::ConversionNotReady { .. } => None,
        }
    }
}
