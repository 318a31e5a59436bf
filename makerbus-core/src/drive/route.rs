//! Logical channel to physical axis routing
//!
//! The board carries two H-bridge halves (1A/2A with enable 1,2 and 3A/4A
//! with enable 3,4), each paired with one encoder input. A single swap flag
//! decides which pair answers to logical channel 1. Motors and encoders are
//! always routed by the same flag, so "motor 1" and "encoder 1" keep
//! describing the same wheel.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Logical channel as numbered on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Channel {
    One,
    Two,
}

impl Channel {
    /// Both channels, in bus order
    pub const ALL: [Channel; 2] = [Channel::One, Channel::Two];

    /// Zero-based index for per-channel tables
    pub const fn index(self) -> usize {
        match self {
            Channel::One => 0,
            Channel::Two => 1,
        }
    }

    /// Channel number as written on the bus (1 or 2)
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// The other channel
    pub const fn other(self) -> Self {
        match self {
            Channel::One => Channel::Two,
            Channel::Two => Channel::One,
        }
    }
}

/// Physical H-bridge half and its encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PhysicalAxis {
    /// Half 1,2 (pins 1A/2A, enable 1,2) and the first encoder
    Primary,
    /// Half 3,4 (pins 3A/4A, enable 3,4) and the second encoder
    Secondary,
}

impl PhysicalAxis {
    /// Both axes
    pub const ALL: [PhysicalAxis; 2] = [PhysicalAxis::Primary, PhysicalAxis::Secondary];

    /// Zero-based index for per-axis tables
    pub const fn index(self) -> usize {
        match self {
            PhysicalAxis::Primary => 0,
            PhysicalAxis::Secondary => 1,
        }
    }
}

/// Select the physical axis serving a logical channel
///
/// Unswapped, channel 1 is the primary axis; swapped, it is the secondary
/// one. Channel 2 always gets the axis channel 1 does not.
pub const fn route(channel: Channel, swap: bool) -> PhysicalAxis {
    match (channel, swap) {
        (Channel::One, false) | (Channel::Two, true) => PhysicalAxis::Primary,
        (Channel::One, true) | (Channel::Two, false) => PhysicalAxis::Secondary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unswapped_routing() {
        assert_eq!(route(Channel::One, false), PhysicalAxis::Primary);
        assert_eq!(route(Channel::Two, false), PhysicalAxis::Secondary);
    }

    #[test]
    fn test_swapped_routing() {
        assert_eq!(route(Channel::One, true), PhysicalAxis::Secondary);
        assert_eq!(route(Channel::Two, true), PhysicalAxis::Primary);
    }

    #[test]
    fn test_channels_never_share_an_axis() {
        for swap in [false, true] {
            assert_ne!(route(Channel::One, swap), route(Channel::Two, swap));
            for channel in Channel::ALL {
                assert_eq!(route(channel, swap), route(channel.other(), !swap));
            }
        }
    }

    #[test]
    fn test_channel_numbers() {
        assert_eq!(Channel::One.number(), 1);
        assert_eq!(Channel::Two.number(), 2);
    }
}
