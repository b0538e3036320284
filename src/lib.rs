//! Driver for the INA220 bus voltage and shunt current monitor
//!
//! The driver never owns the I2C bus. Every operation borrows the bus for its full duration, so
//! several monitors can share one bus as long as whoever holds it hands out `&mut` access one
//! operation at a time.
//!
//! Both a blocking ([`SyncIna220`]) and an async ([`AsyncIna220`]) variant are available through
//! the `sync` and `async` features.
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(clippy::pedantic)]

#[macro_use]
mod fmt;

pub mod address;
pub mod configuration;
pub mod errors;
pub mod identity;
pub mod measurements;
pub mod register;
pub mod shunt;
pub mod strobe;
pub mod supply;

#[cfg(feature = "async")]
pub mod r#async;

/// Blocking driver, generated from the async sources at build time
#[cfg(feature = "sync")]
pub mod sync {
    /// Blocking INA220 driver
    pub mod driver {
        include!(concat!(env!("OUT_DIR"), "/driver.rs"));
    }

    /// Blocking low/high range supply monitor
    pub mod monitor {
        include!(concat!(env!("OUT_DIR"), "/monitor.rs"));
    }
}

#[cfg(feature = "async")]
pub use r#async::driver::INA220 as AsyncIna220;
#[cfg(feature = "async")]
pub use r#async::monitor::SupplyMonitor as AsyncSupplyMonitor;

#[cfg(feature = "sync")]
pub use sync::driver::INA220 as SyncIna220;
#[cfg(feature = "sync")]
pub use sync::monitor::SupplyMonitor as SyncSupplyMonitor;
