//! Async driver
//!
//! These sources are also the input `build.rs` turns into the blocking [`crate::sync`] modules, so
//! they must not mention the keywords they are stripped of outside of code.

pub mod driver;
pub mod monitor;
