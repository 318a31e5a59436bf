//! Module driver implementations
//!
//! This crate provides concrete implementations of the
//! [`BusModule`](makerbus_core::traits::BusModule) trait for Maker Bus
//! peripherals, driving their pins through a
//! [`IoPort`](makerbus_hal::IoPort):
//!
//! - Bus Bridge Encoders Sonar (dual H-bridge with two encoders)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bridge;

pub use bridge::BusBridge;
