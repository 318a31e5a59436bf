//! Board-agnostic core logic for the Maker Bus motor/encoder bridge
//!
//! This crate contains all module logic that does not depend on specific
//! hardware implementations:
//!
//! - H-bridge drive decoding, reversal and channel routing
//! - Encoder counters with latching
//! - Module state in logical channels
//! - Bus module trait
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod drive;
pub mod encoder;
pub mod state;
pub mod traits;
