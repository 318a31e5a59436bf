//! H-bridge drive logic
//!
//! Turning a bus speed command into pin writes takes three steps:
//!
//! - [`reversal`]: per-channel direction inversion
//! - [`decode`]: signed speed to direction pins and PWM duty
//! - [`route`]: logical channel to physical H-bridge half

pub mod decode;
pub mod reversal;
pub mod route;

pub use decode::{decode, HBridgeDrive, FULL_BRAKE, FULL_DUTY};
pub use reversal::ReversalFlags;
pub use route::{route, Channel, PhysicalAxis};
