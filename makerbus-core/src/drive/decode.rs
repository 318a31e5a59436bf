//! Speed command decoding for an H-bridge half
//!
//! A motor speed travels the bus as one signed byte. Its sign picks the
//! direction, its magnitude (7 bits) the PWM duty, and two values are
//! special:
//!
//! - `0` puts the half in brake mode (both direction pins low)
//! - `-128` has no positive counterpart, so it is reserved for full brake
//!   torque: duty 0xFF
//!
//! ```text
//! speed   reverse   pin1  pin2  duty
//!   +v     false      0     1   2v
//!   +v     true       1     0   2v
//!   -v     false      1     0   2v
//!   -v     true       0     1   2v
//!    0     any        0     0   0
//! -128     false      1     0   0xFF
//! -128     true       0     0   0xFF
//! ```

/// Speed reserved for full brake torque
pub const FULL_BRAKE: i8 = i8::MIN;

/// Duty that keeps the enable pin permanently on
pub const FULL_DUTY: u8 = 0xFF;

/// Pin levels and duty for one H-bridge half
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HBridgeDrive {
    /// Direction input A (1A or 3A)
    pub pin1: bool,
    /// Direction input B (2A or 4A)
    pub pin2: bool,
    /// Enable PWM duty, 0-255
    pub duty: u8,
}

impl HBridgeDrive {
    /// Both direction pins low
    pub const fn is_brake(&self) -> bool {
        !self.pin1 && !self.pin2
    }
}

/// Decode a signed speed into H-bridge outputs
///
/// `reverse` flips the direction of non-zero speeds. The result depends on
/// the arguments only.
pub const fn decode(speed: i8, reverse: bool) -> HBridgeDrive {
    // Forward by default
    let mut pin1 = false;
    let mut pin2 = true;
    if (speed > 0 && reverse) || (speed < 0 && !reverse) {
        pin1 = true;
        pin2 = false;
    } else if speed & 0x7F == 0 {
        pin2 = false;
    }

    // -128 has magnitude 128, whose low seven bits are zero
    let magnitude = speed.unsigned_abs();
    let duty = if speed == FULL_BRAKE {
        FULL_DUTY
    } else {
        (magnitude & 0x7F) << 1
    };

    HBridgeDrive { pin1, pin2, duty }
}
