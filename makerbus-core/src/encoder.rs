//! Encoder counters
//!
//! One free-running signed count per physical encoder. Counts are kept in
//! physical terms: routing and reversal are applied by whoever talks in
//! logical channels (see [`BridgeState`](crate::state::BridgeState)).
//!
//! Counters wrap on overflow like the two's-complement registers they
//! model. A long enough run in one direction rolls `i32::MAX` over to
//! `i32::MIN`.
//!
//! # Latching
//!
//! A bus master reading both encoders issues two separate commands, and
//! the wheels keep turning in between. [`EncoderBank::latch`] copies both
//! counts at one instant so they can be read as a consistent pair.

use crate::drive::PhysicalAxis;

/// Counters for both physical encoders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderBank {
    counts: [i32; 2],
    latched: [i32; 2],
}

impl EncoderBank {
    /// Both counters at zero, nothing latched
    pub const fn new() -> Self {
        Self {
            counts: [0; 2],
            latched: [0; 2],
        }
    }

    /// Current count of an encoder
    pub const fn count(&self, axis: PhysicalAxis) -> i32 {
        self.counts[axis.index()]
    }

    /// Overwrite the count of an encoder
    pub fn set_count(&mut self, axis: PhysicalAxis, count: i32) {
        self.counts[axis.index()] = count;
    }

    /// Add encoder ticks to a count, wrapping at the `i32` range
    pub fn advance(&mut self, axis: PhysicalAxis, delta: i32) {
        let count = &mut self.counts[axis.index()];
        *count = count.wrapping_add(delta);
    }

    /// Zero both counts
    pub fn reset(&mut self) {
        self.counts = [0; 2];
    }

    /// Snapshot both counts
    pub fn latch(&mut self) {
        self.latched = self.counts;
    }

    /// Count of an encoder at the last [`EncoderBank::latch`]
    pub const fn latched(&self, axis: PhysicalAxis) -> i32 {
        self.latched[axis.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_are_per_axis() {
        let mut bank = EncoderBank::new();
        bank.set_count(PhysicalAxis::Primary, 10);
        bank.advance(PhysicalAxis::Secondary, -3);

        assert_eq!(bank.count(PhysicalAxis::Primary), 10);
        assert_eq!(bank.count(PhysicalAxis::Secondary), -3);
    }

    #[test]
    fn test_advance_wraps() {
        let mut bank = EncoderBank::new();
        bank.set_count(PhysicalAxis::Primary, i32::MAX);
        bank.advance(PhysicalAxis::Primary, 1);
        assert_eq!(bank.count(PhysicalAxis::Primary), i32::MIN);

        bank.advance(PhysicalAxis::Primary, -1);
        assert_eq!(bank.count(PhysicalAxis::Primary), i32::MAX);
    }

    #[test]
    fn test_reset_zeroes_both() {
        let mut bank = EncoderBank::new();
        bank.set_count(PhysicalAxis::Primary, 5);
        bank.set_count(PhysicalAxis::Secondary, -5);
        bank.reset();

        for axis in PhysicalAxis::ALL {
            assert_eq!(bank.count(axis), 0);
        }
    }

    #[test]
    fn test_latch_is_a_snapshot() {
        let mut bank = EncoderBank::new();
        bank.set_count(PhysicalAxis::Primary, 100);
        bank.set_count(PhysicalAxis::Secondary, 200);
        bank.latch();

        bank.advance(PhysicalAxis::Primary, 7);
        bank.reset();

        assert_eq!(bank.latched(PhysicalAxis::Primary), 100);
        assert_eq!(bank.latched(PhysicalAxis::Secondary), 200);
        assert_eq!(bank.count(PhysicalAxis::Primary), 0);
    }
}
