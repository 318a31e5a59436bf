//! Recording I/O port for host-side tests
//!
//! [`MockPort`] keeps the last level/duty of every pin and an ordered log of
//! every write, so tests can check both the resulting pin state and the
//! order in which a driver produced it.

use heapless::Vec;

use crate::gpio::{IoPort, PinId};

/// Number of pins tracked (Arduino Uno numbering fits comfortably)
pub const MOCK_PINS: usize = 32;

/// Maximum number of logged writes before the oldest are dropped
pub const MOCK_LOG_LEN: usize = 64;

/// One recorded write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinEvent {
    /// `digital_write(pin, level)`
    Digital(PinId, bool),
    /// `analog_write(pin, duty)`
    Analog(PinId, u8),
}

impl PinEvent {
    /// Pin the write targeted
    pub fn pin(&self) -> PinId {
        match *self {
            PinEvent::Digital(pin, _) | PinEvent::Analog(pin, _) => pin,
        }
    }
}

/// I/O port that records writes and serves scripted reads
#[derive(Debug, Clone)]
pub struct MockPort {
    levels: [bool; MOCK_PINS],
    duties: [Option<u8>; MOCK_PINS],
    inputs: [bool; MOCK_PINS],
    analog_inputs: [u16; MOCK_PINS],
    log: Vec<PinEvent, MOCK_LOG_LEN>,
}

impl Default for MockPort {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPort {
    /// Create a port with every pin low and no writes recorded
    pub const fn new() -> Self {
        Self {
            levels: [false; MOCK_PINS],
            duties: [None; MOCK_PINS],
            inputs: [false; MOCK_PINS],
            analog_inputs: [0; MOCK_PINS],
            log: Vec::new(),
        }
    }

    /// Last digital level written to a pin
    pub fn level(&self, pin: PinId) -> bool {
        self.levels.get(pin as usize).copied().unwrap_or(false)
    }

    /// Last duty written to a pin, if any
    pub fn duty(&self, pin: PinId) -> Option<u8> {
        self.duties.get(pin as usize).copied().flatten()
    }

    /// Script the level returned by `digital_read`
    pub fn set_input(&mut self, pin: PinId, high: bool) {
        if let Some(slot) = self.inputs.get_mut(pin as usize) {
            *slot = high;
        }
    }

    /// Script the value returned by `analog_read`
    pub fn set_analog_input(&mut self, pin: PinId, value: u16) {
        if let Some(slot) = self.analog_inputs.get_mut(pin as usize) {
            *slot = value;
        }
    }

    /// All writes since creation or the last [`MockPort::clear_log`]
    pub fn log(&self) -> &[PinEvent] {
        &self.log
    }

    /// Forget recorded writes, keeping pin state
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn record(&mut self, event: PinEvent) {
        if self.log.is_full() {
            self.log.remove(0);
        }
        let _ = self.log.push(event);
    }
}

impl IoPort for MockPort {
    fn digital_write(&mut self, pin: PinId, high: bool) {
        if let Some(slot) = self.levels.get_mut(pin as usize) {
            *slot = high;
        }
        self.record(PinEvent::Digital(pin, high));
    }

    fn analog_write(&mut self, pin: PinId, duty: u8) {
        if let Some(slot) = self.duties.get_mut(pin as usize) {
            *slot = Some(duty);
        }
        self.record(PinEvent::Analog(pin, duty));
    }

    fn digital_read(&mut self, pin: PinId) -> bool {
        self.inputs.get(pin as usize).copied().unwrap_or(false)
    }

    fn analog_read(&mut self, pin: PinId) -> u16 {
        self.analog_inputs.get(pin as usize).copied().unwrap_or(0)
    }
}
