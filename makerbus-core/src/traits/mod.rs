//! Module abstraction traits
//!
//! These traits define the interface between the bus layer and the
//! module implementations in the drivers crate.

pub mod module;

pub use module::{BusModule, DispatchError};
