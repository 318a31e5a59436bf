//! Bus Bridge Encoders Sonar module driver
//!
//! Two DC motors on a dual H-bridge (L293-style: two direction inputs and
//! one PWM enable per half) and two quadrature encoders. The bus master
//! sees logical channels 1 and 2; which physical half and encoder backs
//! each channel is decided by the swap flag, and each channel can be
//! reversed independently.
//!
//! # Usage
//!
//! ```ignore
//! let config = BridgeConfig::new(0x20);
//! let mut bridge = BusBridge::new(&config, port);
//!
//! bridge.motor1_set(64);
//! let distance = bridge.encoder1_get();
//!
//! // From the quadrature decoder:
//! bridge.encoder_advance(PhysicalAxis::Primary, 1);
//! ```
//!
//! Every motor write sets the direction pins before the enable duty.
//!
//! The minimal module variant has no swap or encoder reversal. On such a
//! module the corresponding setters are ignored with a warning and the
//! getters report the fixed `false`.

mod dispatch;

use makerbus_core::config::{BridgeConfig, BridgePins, Variant};
use makerbus_core::drive::{Channel, PhysicalAxis};
use makerbus_core::state::{BridgeState, MotorOutput};
use makerbus_hal::IoPort;

/// Motor/encoder bridge bound to a bus address
pub struct BusBridge<P> {
    address: u8,
    variant: Variant,
    pins: BridgePins,
    state: BridgeState,
    port: P,
}

impl<P: IoPort> BusBridge<P> {
    /// Create the module and drive its pins to the power-on state
    ///
    /// The LED is written and both H-bridge halves are put in brake.
    pub fn new(config: &BridgeConfig, port: P) -> Self {
        let mut bridge = Self {
            address: config.address,
            variant: config.variant,
            pins: config.pins,
            state: BridgeState::new(config.effective_power_on()),
            port,
        };

        bridge.write_led();
        for channel in Channel::ALL {
            let output = bridge.state.motor_output(channel);
            bridge.apply(output);
        }

        makerbus_hal::debug!("bridge {} up", bridge.address);
        bridge
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn pins(&self) -> &BridgePins {
        &self.pins
    }

    /// Current module state
    pub fn state(&self) -> &BridgeState {
        &self.state
    }

    /// Access the I/O port
    pub fn port(&mut self) -> &mut P {
        &mut self.port
    }

    /// Give the I/O port back
    pub fn release(self) -> P {
        self.port
    }

    // LED

    pub fn led_get(&self) -> bool {
        self.state.led()
    }

    pub fn led_set(&mut self, led: bool) {
        self.state.set_led(led);
        self.write_led();
    }

    // Motors

    pub fn motor1_get(&self) -> i8 {
        self.state.motor(Channel::One)
    }

    pub fn motor1_set(&mut self, speed: i8) {
        self.motor_set(Channel::One, speed);
    }

    pub fn motor2_get(&self) -> i8 {
        self.state.motor(Channel::Two)
    }

    pub fn motor2_set(&mut self, speed: i8) {
        self.motor_set(Channel::Two, speed);
    }

    pub fn motor1_reverse_get(&self) -> bool {
        self.state.motor_reverse(Channel::One)
    }

    pub fn motor1_reverse_set(&mut self, reverse: bool) {
        self.state.set_motor_reverse(Channel::One, reverse);
    }

    pub fn motor2_reverse_get(&self) -> bool {
        self.state.motor_reverse(Channel::Two)
    }

    pub fn motor2_reverse_set(&mut self, reverse: bool) {
        self.state.set_motor_reverse(Channel::Two, reverse);
    }

    // Encoders

    pub fn encoder1_get(&self) -> i32 {
        self.state.encoder(Channel::One)
    }

    pub fn encoder1_set(&mut self, count: i32) {
        self.state.set_encoder(Channel::One, count);
    }

    pub fn encoder2_get(&self) -> i32 {
        self.state.encoder(Channel::Two)
    }

    pub fn encoder2_set(&mut self, count: i32) {
        self.state.set_encoder(Channel::Two, count);
    }

    pub fn encoder1_reverse_get(&self) -> bool {
        self.state.encoder_reverse(Channel::One)
    }

    pub fn encoder1_reverse_set(&mut self, reverse: bool) {
        self.encoder_reverse_set(Channel::One, reverse);
    }

    pub fn encoder2_reverse_get(&self) -> bool {
        self.state.encoder_reverse(Channel::Two)
    }

    pub fn encoder2_reverse_set(&mut self, reverse: bool) {
        self.encoder_reverse_set(Channel::Two, reverse);
    }

    /// Encoder 1 count at the last [`BusBridge::encoders_latch`]
    pub fn encoder1_latched(&self) -> i32 {
        self.state.latched_encoder(Channel::One)
    }

    /// Encoder 2 count at the last [`BusBridge::encoders_latch`]
    pub fn encoder2_latched(&self) -> i32 {
        self.state.latched_encoder(Channel::Two)
    }

    /// Zero both encoder counters
    pub fn encoders_reset(&mut self) {
        self.state.reset_encoders();
        makerbus_hal::debug!("encoders reset");
    }

    /// Snapshot both encoder counters
    ///
    /// The snapshot is read with [`BusBridge::encoder1_latched`] and
    /// [`BusBridge::encoder2_latched`], or on the bus through the latched
    /// encoder registers, so a bus master gets both counts from one instant.
    /// The encoder getters keep reporting live counts.
    pub fn encoders_latch(&mut self) {
        self.state.latch_encoders();
        makerbus_hal::debug!(
            "encoders latched {} {}",
            self.state.encoders().latched(PhysicalAxis::Primary),
            self.state.encoders().latched(PhysicalAxis::Secondary)
        );
    }

    /// Count quadrature ticks on a physical encoder
    ///
    /// Called by whatever decodes the encoder signals. The delta is in
    /// physical terms, so neither swap nor reversal applies.
    pub fn encoder_advance(&mut self, axis: PhysicalAxis, delta: i32) {
        self.state.advance_encoder(axis, delta);
    }

    // Swap

    pub fn motors_encoders_swap_get(&self) -> bool {
        self.state.swap()
    }

    /// Choose which physical motor/encoder pair backs channel 1
    ///
    /// Only later commands are affected: motors keep running on the half
    /// they were last written to.
    pub fn motors_encoders_swap_set(&mut self, swap: bool) {
        if !self.variant.is_extended() {
            makerbus_hal::warn!("swap ignored on minimal module");
            return;
        }
        self.state.set_swap(swap);
        makerbus_hal::debug!("motors/encoders swap {}", swap);
    }

    fn encoder_reverse_set(&mut self, channel: Channel, reverse: bool) {
        if !self.variant.is_extended() {
            makerbus_hal::warn!("encoder reverse ignored on minimal module");
            return;
        }
        self.state.set_encoder_reverse(channel, reverse);
    }

    fn motor_set(&mut self, channel: Channel, speed: i8) {
        let output = self.state.set_motor(channel, speed);
        makerbus_hal::trace!(
            "motor {} = {} on {}: {}",
            channel.number(),
            speed,
            output.axis,
            output.drive
        );
        self.apply(output);
    }

    fn apply(&mut self, output: MotorOutput) {
        let half = self.pins.half(output.axis);
        self.port.digital_write(half.dir_a, output.drive.pin1);
        self.port.digital_write(half.dir_b, output.drive.pin2);
        self.port.analog_write(half.enable, output.drive.duty);
    }

    fn write_led(&mut self) {
        let led = self.state.led();
        self.port.digital_write(self.pins.led, led);
    }
}
