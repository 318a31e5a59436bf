//! `embedded-hal` backed I/O port
//!
//! [`HalPort`] registers `embedded-hal` 1.0 pins under board pin numbers and
//! serves [`IoPort`] calls from them:
//!
//! - [`OutputPin`] for digital outputs
//! - [`InputPin`] for digital inputs
//! - [`SetDutyCycle`] for PWM outputs
//!
//! ```ignore
//! let mut port = HalPort::<_, NoPin, _, 8>::new();
//! port.add_output(13, led)?;
//! port.add_output(4, dir_1a)?;
//! port.add_output(7, dir_2a)?;
//! port.add_pwm(5, enable_12)?;
//! ```
//!
//! A pin that cannot be registered is handed back in [`Rejected`], and the
//! pins already registered stay in the port.

use core::convert::Infallible;

use embedded_hal::digital::{self, InputPin, OutputPin, PinState};
use embedded_hal::pwm::{self, SetDutyCycle};
use heapless::Vec;

use crate::gpio::{IoPort, PinId, DUTY_MAX};

/// Errors when assembling a [`HalPort`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError {
    /// The pin table for this kind of pin is full
    TooManyPins,
    /// The pin number is already registered
    DuplicatePin(PinId),
}

/// A pin the port refused, with the reason
#[derive(Debug)]
pub struct Rejected<T> {
    pub error: PortError,
    pub pin: T,
}

impl<T> Rejected<T> {
    /// Take the pin back
    pub fn into_pin(self) -> T {
        self.pin
    }
}

/// Placeholder for a pin kind a board does not use
///
/// Uninhabited, so a `HalPort<_, NoPin, _, N>` simply has no inputs.
#[derive(Debug)]
pub enum NoPin {}

impl digital::ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        match *self {}
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        match *self {}
    }
}

impl InputPin for NoPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        match *self {}
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        match *self {}
    }
}

impl pwm::ErrorType for NoPin {
    type Error = Infallible;
}

impl SetDutyCycle for NoPin {
    fn max_duty_cycle(&self) -> u16 {
        match *self {}
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Infallible> {
        match *self {}
    }
}

/// Pin-numbered port over `embedded-hal` pins
///
/// `N` bounds each pin table (outputs, inputs, PWM) separately.
pub struct HalPort<O, I, W, const N: usize> {
    outputs: Vec<(PinId, O), N>,
    inputs: Vec<(PinId, I), N>,
    pwm: Vec<(PinId, W), N>,
}

impl<O, I, W, const N: usize> Default for HalPort<O, I, W, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, I, W, const N: usize> HalPort<O, I, W, N> {
    /// Create a port with no pins registered
    pub const fn new() -> Self {
        Self {
            outputs: Vec::new(),
            inputs: Vec::new(),
            pwm: Vec::new(),
        }
    }

    /// Check whether a pin number is registered as any kind of pin
    pub fn is_assigned(&self, pin: PinId) -> bool {
        self.outputs.iter().any(|(id, _)| *id == pin)
            || self.inputs.iter().any(|(id, _)| *id == pin)
            || self.pwm.iter().any(|(id, _)| *id == pin)
    }

    fn check_free(&self, pin: PinId) -> Result<(), PortError> {
        if self.is_assigned(pin) {
            Err(PortError::DuplicatePin(pin))
        } else {
            Ok(())
        }
    }

    /// Register a digital output
    pub fn add_output(&mut self, pin: PinId, output: O) -> Result<(), Rejected<O>> {
        if let Err(error) = self.check_free(pin) {
            return Err(Rejected { error, pin: output });
        }
        self.outputs.push((pin, output)).map_err(|(_, output)| Rejected {
            error: PortError::TooManyPins,
            pin: output,
        })
    }

    /// Register a digital input
    pub fn add_input(&mut self, pin: PinId, input: I) -> Result<(), Rejected<I>> {
        if let Err(error) = self.check_free(pin) {
            return Err(Rejected { error, pin: input });
        }
        self.inputs.push((pin, input)).map_err(|(_, input)| Rejected {
            error: PortError::TooManyPins,
            pin: input,
        })
    }

    /// Register a PWM output
    pub fn add_pwm(&mut self, pin: PinId, channel: W) -> Result<(), Rejected<W>> {
        if let Err(error) = self.check_free(pin) {
            return Err(Rejected { error, pin: channel });
        }
        self.pwm.push((pin, channel)).map_err(|(_, channel)| Rejected {
            error: PortError::TooManyPins,
            pin: channel,
        })
    }

    fn output_mut(&mut self, pin: PinId) -> Option<&mut O> {
        self.outputs
            .iter_mut()
            .find(|(id, _)| *id == pin)
            .map(|(_, out)| out)
    }

    fn input_mut(&mut self, pin: PinId) -> Option<&mut I> {
        self.inputs
            .iter_mut()
            .find(|(id, _)| *id == pin)
            .map(|(_, input)| input)
    }

    fn pwm_mut(&mut self, pin: PinId) -> Option<&mut W> {
        self.pwm
            .iter_mut()
            .find(|(id, _)| *id == pin)
            .map(|(_, channel)| channel)
    }
}

impl<O, I, W, const N: usize> IoPort for HalPort<O, I, W, N>
where
    O: OutputPin,
    I: InputPin,
    W: SetDutyCycle,
{
    fn digital_write(&mut self, pin: PinId, high: bool) {
        if let Some(out) = self.output_mut(pin) {
            if out.set_state(PinState::from(high)).is_err() {
                crate::warn!("digital write to pin {} failed", pin);
            }
        } else if let Some(channel) = self.pwm_mut(pin) {
            // A digital write on a PWM pin ends the PWM output
            let result = if high {
                channel.set_duty_cycle_fully_on()
            } else {
                channel.set_duty_cycle_fully_off()
            };
            if result.is_err() {
                crate::warn!("digital write to PWM pin {} failed", pin);
            }
        } else {
            crate::warn!("digital write to unassigned pin {}", pin);
        }
    }

    fn analog_write(&mut self, pin: PinId, duty: u8) {
        if let Some(channel) = self.pwm_mut(pin) {
            if channel
                .set_duty_cycle_fraction(u16::from(duty), u16::from(DUTY_MAX))
                .is_err()
            {
                crate::warn!("duty write to pin {} failed", pin);
            }
        } else if let Some(out) = self.output_mut(pin) {
            // Pins without PWM round the duty to a level
            if out.set_state(PinState::from(duty >= 128)).is_err() {
                crate::warn!("digital write to pin {} failed", pin);
            }
        } else {
            crate::warn!("duty write to unassigned pin {}", pin);
        }
    }

    fn digital_read(&mut self, pin: PinId) -> bool {
        match self.input_mut(pin) {
            Some(input) => match input.is_high() {
                Ok(high) => high,
                Err(_) => {
                    crate::warn!("digital read from pin {} failed", pin);
                    false
                }
            },
            None => {
                crate::warn!("digital read from unassigned pin {}", pin);
                false
            }
        }
    }

    fn analog_read(&mut self, pin: PinId) -> u16 {
        // embedded-hal 1.0 has no ADC trait
        crate::warn!("analog read from pin {} is not supported", pin);
        0
    }
}
