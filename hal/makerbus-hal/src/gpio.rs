//! Pin-numbered I/O port abstraction
//!
//! Provides the Arduino-style pin primitives every Maker Bus module is
//! written against. Implementations map pin numbers onto real peripherals.

/// Board pin number
pub type PinId = u8;

/// Full-scale PWM duty for [`IoPort::analog_write`]
pub const DUTY_MAX: u8 = u8::MAX;

/// Full-scale reading returned by [`IoPort::analog_read`] (10-bit ADC)
pub const ANALOG_READ_MAX: u16 = 1023;

/// Digital and PWM I/O addressed by pin number
///
/// All operations are synchronous and fire-and-forget: a port that cannot
/// honour a write has nowhere to report it, so implementations log and
/// carry on.
pub trait IoPort {
    /// Drive a digital output high (`true`) or low (`false`)
    fn digital_write(&mut self, pin: PinId, high: bool);

    /// Set the PWM duty of an output, 0 (off) to [`DUTY_MAX`] (always on)
    fn analog_write(&mut self, pin: PinId, duty: u8);

    /// Sample a digital input
    fn digital_read(&mut self, pin: PinId) -> bool;

    /// Sample an analog input, 0 to [`ANALOG_READ_MAX`]
    fn analog_read(&mut self, pin: PinId) -> u16;
}

impl<P: IoPort + ?Sized> IoPort for &mut P {
    fn digital_write(&mut self, pin: PinId, high: bool) {
        (**self).digital_write(pin, high);
    }

    fn analog_write(&mut self, pin: PinId, duty: u8) {
        (**self).analog_write(pin, duty);
    }

    fn digital_read(&mut self, pin: PinId) -> bool {
        (**self).digital_read(pin)
    }

    fn analog_read(&mut self, pin: PinId) -> u16 {
        (**self).analog_read(pin)
    }
}
