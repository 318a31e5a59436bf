//! Hardware configuration types
//!
//! Pin assignments and power-on behaviour of the motor/encoder bridge.
//! Pin numbers are board pin numbers as understood by the I/O port.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::drive::PhysicalAxis;

/// Pins of one H-bridge half
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HBridgeHalf {
    /// Direction input A (1A or 3A)
    pub dir_a: u8,
    /// Direction input B (2A or 4A)
    pub dir_b: u8,
    /// Enable input, driven with PWM (must be a PWM-capable pin)
    pub enable: u8,
}

impl HBridgeHalf {
    pub const fn new(dir_a: u8, dir_b: u8, enable: u8) -> Self {
        Self {
            dir_a,
            dir_b,
            enable,
        }
    }

    /// Check whether the half uses a pin
    pub const fn uses(&self, pin: u8) -> bool {
        self.dir_a == pin || self.dir_b == pin || self.enable == pin
    }
}

/// Pin assignment of the whole bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgePins {
    /// Indicator LED
    pub led: u8,
    /// Half 1,2 (1A, 2A, enable 1,2)
    pub primary: HBridgeHalf,
    /// Half 3,4 (3A, 4A, enable 3,4)
    pub secondary: HBridgeHalf,
}

impl Default for BridgePins {
    /// Arduino Uno wiring: on-board LED on 13, enables on PWM pins 5 and 6
    fn default() -> Self {
        Self {
            led: 13,
            primary: HBridgeHalf::new(4, 7, 5),
            secondary: HBridgeHalf::new(8, 9, 6),
        }
    }
}

impl BridgePins {
    /// Pins of the H-bridge half serving a physical axis
    pub const fn half(&self, axis: PhysicalAxis) -> HBridgeHalf {
        match axis {
            PhysicalAxis::Primary => self.primary,
            PhysicalAxis::Secondary => self.secondary,
        }
    }

    /// Check that no pin is assigned twice
    pub fn is_valid(&self) -> bool {
        let pins = [
            self.led,
            self.primary.dir_a,
            self.primary.dir_b,
            self.primary.enable,
            self.secondary.dir_a,
            self.secondary.dir_b,
            self.secondary.enable,
        ];
        pins.iter()
            .enumerate()
            .all(|(i, pin)| !pins[i + 1..].contains(pin))
    }
}

/// Command surface offered on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variant {
    /// First module revision: no encoder reversal, no motor/encoder swap
    Minimal,
    /// Full module with encoder reversal and motor/encoder swap
    #[default]
    Extended,
}

impl Variant {
    /// Returns true if the swap and encoder reversal registers exist
    pub const fn is_extended(self) -> bool {
        matches!(self, Variant::Extended)
    }
}

/// State applied when the module starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerOnState {
    /// Indicator LED lit
    pub led: bool,
    /// Motor 1 and motor 2 direction inversion
    pub motor_reverse: [bool; 2],
    /// Encoder 1 and encoder 2 count inversion
    pub encoder_reverse: [bool; 2],
    /// Motor/encoder pairs swapped
    pub swap: bool,
}

impl Default for PowerOnState {
    /// Behaviour of the shipped module: LED lit, both encoders counting
    /// inverted, channels swapped
    fn default() -> Self {
        Self {
            led: true,
            motor_reverse: [false; 2],
            encoder_reverse: [true; 2],
            swap: true,
        }
    }
}

impl PowerOnState {
    /// Restrict to what a module variant supports
    ///
    /// The minimal module has neither swap nor encoder reversal, so both
    /// are forced off.
    pub const fn for_variant(self, variant: Variant) -> Self {
        match variant {
            Variant::Extended => self,
            Variant::Minimal => Self {
                encoder_reverse: [false; 2],
                swap: false,
                ..self
            },
        }
    }
}
