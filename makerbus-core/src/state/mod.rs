//! Runtime state of the bridge module
//!
//! One owned value per module, mutated in place by bus commands.

pub mod bridge;

pub use bridge::{BridgeState, MotorOutput};
