//! Bridge module state
//!
//! Everything the motor/encoder bridge remembers between bus commands,
//! expressed in logical channels. Motor setters return the physical output
//! to apply; writing it to pins is the driver's job.
//!
//! Stored values never depend on reversal or routing:
//!
//! - a motor reads back exactly the speed it was last given
//! - an encoder written and read through the same channel, with no flag
//!   change in between, reads back exactly the value written
//! - flipping the swap flag re-labels the two encoders without touching
//!   their counts

use crate::config::PowerOnState;
use crate::drive::{decode, route, Channel, HBridgeDrive, PhysicalAxis, ReversalFlags};
use crate::encoder::EncoderBank;

/// Physical effect of a motor command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorOutput {
    /// H-bridge half to drive
    pub axis: PhysicalAxis,
    /// Levels and duty to write to it
    pub drive: HBridgeDrive,
}

/// State of one bridge module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeState {
    led: bool,
    /// Last speed given to each logical motor
    motors: [i8; 2],
    reversal: ReversalFlags,
    swap: bool,
    encoders: EncoderBank,
}

impl Default for BridgeState {
    fn default() -> Self {
        Self::new(PowerOnState::default())
    }
}

impl BridgeState {
    /// State at power-on: motors stopped, encoders at zero
    pub fn new(power_on: PowerOnState) -> Self {
        let mut reversal = ReversalFlags::new();
        for channel in Channel::ALL {
            reversal.set_motor(channel, power_on.motor_reverse[channel.index()]);
            reversal.set_encoder(channel, power_on.encoder_reverse[channel.index()]);
        }

        Self {
            led: power_on.led,
            motors: [0; 2],
            reversal,
            swap: power_on.swap,
            encoders: EncoderBank::new(),
        }
    }

    pub fn led(&self) -> bool {
        self.led
    }

    pub fn set_led(&mut self, on: bool) {
        self.led = on;
    }

    /// Last speed given to a motor
    pub fn motor(&self, channel: Channel) -> i8 {
        self.motors[channel.index()]
    }

    /// Record a motor speed and work out its physical effect
    pub fn set_motor(&mut self, channel: Channel, speed: i8) -> MotorOutput {
        self.motors[channel.index()] = speed;
        self.motor_output(channel)
    }

    /// Physical effect of a motor's stored speed under the current flags
    pub fn motor_output(&self, channel: Channel) -> MotorOutput {
        MotorOutput {
            axis: route(channel, self.swap),
            drive: decode(self.motor(channel), self.reversal.motor(channel)),
        }
    }

    pub fn motor_reverse(&self, channel: Channel) -> bool {
        self.reversal.motor(channel)
    }

    pub fn set_motor_reverse(&mut self, channel: Channel, reverse: bool) {
        self.reversal.set_motor(channel, reverse);
    }

    /// Encoder count as seen through a logical channel
    pub fn encoder(&self, channel: Channel) -> i32 {
        let count = self.encoders.count(route(channel, self.swap));
        self.reversal.apply_encoder(channel, count)
    }

    /// Overwrite the encoder behind a logical channel
    pub fn set_encoder(&mut self, channel: Channel, value: i32) {
        let count = self.reversal.apply_encoder(channel, value);
        self.encoders.set_count(route(channel, self.swap), count);
    }

    pub fn encoder_reverse(&self, channel: Channel) -> bool {
        self.reversal.encoder(channel)
    }

    pub fn set_encoder_reverse(&mut self, channel: Channel, reverse: bool) {
        self.reversal.set_encoder(channel, reverse);
    }

    /// Whether logical channel 1 is served by the secondary axis
    pub fn swap(&self) -> bool {
        self.swap
    }

    pub fn set_swap(&mut self, swap: bool) {
        self.swap = swap;
    }

    /// Zero both physical encoders, whatever the routing
    pub fn reset_encoders(&mut self) {
        self.encoders.reset();
    }

    /// Snapshot both physical encoders
    pub fn latch_encoders(&mut self) {
        self.encoders.latch();
    }

    /// Latched count as seen through a logical channel
    pub fn latched_encoder(&self, channel: Channel) -> i32 {
        let count = self.encoders.latched(route(channel, self.swap));
        self.reversal.apply_encoder(channel, count)
    }

    /// Count ticks on a physical encoder
    pub fn advance_encoder(&mut self, axis: PhysicalAxis, delta: i32) {
        self.encoders.advance(axis, delta);
    }

    /// Raw physical counters
    pub fn encoders(&self) -> &EncoderBank {
        &self.encoders
    }

    pub fn reversal(&self) -> &ReversalFlags {
        &self.reversal
    }
}
