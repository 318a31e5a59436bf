//! Maker Bus Hardware Abstraction Layer
//!
//! Maker Bus modules address their hardware by pin number, the way the
//! Arduino core does (`digitalWrite(13, HIGH)`). This crate captures that
//! capability as the [`IoPort`] trait so module drivers can be written once
//! and run against real pins, or against a recording port in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Module drivers (makerbus-drivers)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  makerbus-hal (this crate - IoPort)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │    HalPort    │       │   MockPort    │
//! │ (embedded-hal)│       │  (host tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Logging
//!
//! The [`trace!`], [`debug!`], [`info!`] and [`warn!`] macros forward to
//! `defmt` when the `defmt` feature is enabled and compile to nothing
//! otherwise, so drivers can log unconditionally.

#![no_std]
#![deny(unsafe_code)]

pub mod embedded;
pub mod gpio;
mod log;
#[cfg(feature = "mock")]
pub mod mock;

// Re-export key types at crate root for convenience
pub use embedded::{HalPort, PortError, Rejected};
pub use gpio::{IoPort, PinId, ANALOG_READ_MAX, DUTY_MAX};
#[cfg(feature = "mock")]
pub use mock::{MockPort, PinEvent};

#[cfg(feature = "defmt")]
#[doc(hidden)]
pub mod __private {
    // The logging macros expand in downstream crates, which may not name
    // `defmt` themselves.
    pub use defmt;
}
