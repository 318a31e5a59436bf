//! Per-channel direction inversion
//!
//! Wiring a motor or an encoder backwards is fixed in software: the motor
//! flag is handed to [`decode`](super::decode()) and the encoder flag negates
//! counts on the way in and on the way out. Flags are per logical channel
//! and only affect operations made after they change.

use super::route::Channel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reversal flags for both motors and both encoders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReversalFlags {
    motors: [bool; 2],
    encoders: [bool; 2],
}

impl ReversalFlags {
    /// No channel reversed
    pub const fn new() -> Self {
        Self {
            motors: [false; 2],
            encoders: [false; 2],
        }
    }

    pub const fn motor(&self, channel: Channel) -> bool {
        self.motors[channel.index()]
    }

    pub fn set_motor(&mut self, channel: Channel, reverse: bool) {
        self.motors[channel.index()] = reverse;
    }

    pub const fn encoder(&self, channel: Channel) -> bool {
        self.encoders[channel.index()]
    }

    pub fn set_encoder(&mut self, channel: Channel, reverse: bool) {
        self.encoders[channel.index()] = reverse;
    }

    /// Apply a channel's encoder reversal to a count
    ///
    /// Negation wraps, so `i32::MIN` maps to itself. Applying twice always
    /// gives back the original count.
    pub const fn apply_encoder(&self, channel: Channel, count: i32) -> i32 {
        if self.encoder(channel) {
            count.wrapping_neg()
        } else {
            count
        }
    }
}
