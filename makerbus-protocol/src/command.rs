//! Command identifiers for the Bus Bridge Encoders Sonar module
//!
//! Every register `R` numbered `N` answers `R_get` on command `N` and
//! `R_set` on `N + 1`. Actions take a single number. The registers of the
//! extended module (encoder reversal and motor/encoder swap) come after the
//! actions, so the minimal module's table is a prefix of the extended one.
//!
//! The latched encoder registers are read-only: their set numbers are not
//! commands.

// Register base numbers
pub const REG_LED: u8 = 0;
pub const REG_ENCODER1: u8 = 2;
pub const REG_ENCODER2: u8 = 4;
pub const REG_MOTOR1: u8 = 6;
pub const REG_MOTOR2: u8 = 8;
pub const REG_MOTOR1_REVERSE: u8 = 10;
pub const REG_MOTOR2_REVERSE: u8 = 12;
pub const REG_ENCODER1_REVERSE: u8 = 16;
pub const REG_ENCODER2_REVERSE: u8 = 18;
pub const REG_MOTORS_ENCODERS_SWAP: u8 = 20;
pub const REG_ENCODER1_LATCHED: u8 = 22;
pub const REG_ENCODER2_LATCHED: u8 = 24;

// Actions
pub const CMD_ENCODERS_RESET: u8 = 14;
pub const CMD_ENCODERS_LATCH: u8 = 15;

/// First command only understood by the extended module
pub const FIRST_EXTENDED_COMMAND: u8 = REG_ENCODER1_REVERSE;

/// One past the highest command number
pub const COMMAND_COUNT: u8 = REG_ENCODER2_LATCHED + 2;

/// Registers exposed by the module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Indicator LED
    Led,
    /// Encoder 1 count
    Encoder1,
    /// Encoder 2 count
    Encoder2,
    /// Motor 1 speed
    Motor1,
    /// Motor 2 speed
    Motor2,
    /// Motor 1 direction inversion
    Motor1Reverse,
    /// Motor 2 direction inversion
    Motor2Reverse,
    /// Encoder 1 count inversion
    Encoder1Reverse,
    /// Encoder 2 count inversion
    Encoder2Reverse,
    /// Swap of the physical motor/encoder pairs behind channels 1 and 2
    MotorsEncodersSwap,
    /// Encoder 1 count at the last latch
    Encoder1Latched,
    /// Encoder 2 count at the last latch
    Encoder2Latched,
}

impl Register {
    /// Number of the register's get command (set is one higher)
    pub const fn base(self) -> u8 {
        match self {
            Register::Led => REG_LED,
            Register::Encoder1 => REG_ENCODER1,
            Register::Encoder2 => REG_ENCODER2,
            Register::Motor1 => REG_MOTOR1,
            Register::Motor2 => REG_MOTOR2,
            Register::Motor1Reverse => REG_MOTOR1_REVERSE,
            Register::Motor2Reverse => REG_MOTOR2_REVERSE,
            Register::Encoder1Reverse => REG_ENCODER1_REVERSE,
            Register::Encoder2Reverse => REG_ENCODER2_REVERSE,
            Register::MotorsEncodersSwap => REG_MOTORS_ENCODERS_SWAP,
            Register::Encoder1Latched => REG_ENCODER1_LATCHED,
            Register::Encoder2Latched => REG_ENCODER2_LATCHED,
        }
    }

    /// Returns true if the register has no set command
    pub const fn is_read_only(self) -> bool {
        matches!(self, Register::Encoder1Latched | Register::Encoder2Latched)
    }

    fn from_base(base: u8) -> Option<Self> {
        match base {
            REG_LED => Some(Register::Led),
            REG_ENCODER1 => Some(Register::Encoder1),
            REG_ENCODER2 => Some(Register::Encoder2),
            REG_MOTOR1 => Some(Register::Motor1),
            REG_MOTOR2 => Some(Register::Motor2),
            REG_MOTOR1_REVERSE => Some(Register::Motor1Reverse),
            REG_MOTOR2_REVERSE => Some(Register::Motor2Reverse),
            REG_ENCODER1_REVERSE => Some(Register::Encoder1Reverse),
            REG_ENCODER2_REVERSE => Some(Register::Encoder2Reverse),
            REG_MOTORS_ENCODERS_SWAP => Some(Register::MotorsEncodersSwap),
            REG_ENCODER1_LATCHED => Some(Register::Encoder1Latched),
            REG_ENCODER2_LATCHED => Some(Register::Encoder2Latched),
            _ => None,
        }
    }
}

/// Actions exposed by the module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Zero both encoder counters
    EncodersReset,
    /// Snapshot both encoder counters
    EncodersLatch,
}

/// A decoded command number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Read a register
    Get(Register),
    /// Write a register
    Set(Register),
    /// Run an action
    Do(Action),
}

impl Command {
    /// Parse a command from its wire number
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_ENCODERS_RESET => Some(Command::Do(Action::EncodersReset)),
            CMD_ENCODERS_LATCH => Some(Command::Do(Action::EncodersLatch)),
            _ => {
                let register = Register::from_base(byte & !1)?;
                if byte & 1 == 0 {
                    Some(Command::Get(register))
                } else if register.is_read_only() {
                    None
                } else {
                    Some(Command::Set(register))
                }
            }
        }
    }

    /// Convert to wire number
    pub fn to_byte(self) -> u8 {
        match self {
            Command::Get(register) => register.base(),
            Command::Set(register) => register.base() + 1,
            Command::Do(Action::EncodersReset) => CMD_ENCODERS_RESET,
            Command::Do(Action::EncodersLatch) => CMD_ENCODERS_LATCH,
        }
    }

    /// Returns true if only the extended module understands this command
    pub fn is_extended(self) -> bool {
        self.to_byte() >= FIRST_EXTENDED_COMMAND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_get_set_pairs() {
        assert_eq!(Command::from_byte(6), Some(Command::Get(Register::Motor1)));
        assert_eq!(Command::from_byte(7), Some(Command::Set(Register::Motor1)));
        assert_eq!(
            Command::from_byte(21),
            Some(Command::Set(Register::MotorsEncodersSwap))
        );
    }

    #[test]
    fn test_actions() {
        assert_eq!(
            Command::from_byte(CMD_ENCODERS_RESET),
            Some(Command::Do(Action::EncodersReset))
        );
        assert_eq!(
            Command::from_byte(CMD_ENCODERS_LATCH),
            Some(Command::Do(Action::EncodersLatch))
        );
    }

    #[test]
    fn test_unknown_commands() {
        assert_eq!(Command::from_byte(COMMAND_COUNT), None);
        assert_eq!(Command::from_byte(0xFF), None);
    }

    #[test]
    fn test_every_number_maps_back() {
        for byte in 0..COMMAND_COUNT {
            match Command::from_byte(byte) {
                Some(command) => assert_eq!(command.to_byte(), byte),
                None => assert!(
                    byte == REG_ENCODER1_LATCHED + 1 || byte == REG_ENCODER2_LATCHED + 1
                ),
            }
        }
    }

    #[test]
    fn test_latched_registers_are_read_only() {
        assert_eq!(
            Command::from_byte(REG_ENCODER1_LATCHED),
            Some(Command::Get(Register::Encoder1Latched))
        );
        assert_eq!(
            Command::from_byte(REG_ENCODER2_LATCHED),
            Some(Command::Get(Register::Encoder2Latched))
        );
        assert_eq!(Command::from_byte(REG_ENCODER1_LATCHED + 1), None);
        assert_eq!(Command::from_byte(REG_ENCODER2_LATCHED + 1), None);
        assert!(Command::Get(Register::Encoder2Latched).is_extended());
    }

    #[test]
    fn test_extended_split() {
        assert!(!Command::Do(Action::EncodersLatch).is_extended());
        assert!(!Command::Set(Register::Motor2Reverse).is_extended());
        assert!(Command::Get(Register::Encoder1Reverse).is_extended());
        assert!(Command::Set(Register::MotorsEncodersSwap).is_extended());
    }
}
