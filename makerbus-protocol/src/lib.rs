//! Maker Bus module command protocol
//!
//! A bus master talks to a module by sending a command number followed by
//! the command's arguments, and reading back the command's results. This
//! crate defines both halves for the Bus Bridge Encoders Sonar module:
//!
//! - [`command`]: the command numbers and what they address
//! - [`payload`]: how argument and result values are laid out in bytes
//!
//! Framing (address frames, escape bytes, the serial link itself) belongs to
//! the bus layer and is not handled here.
//!
//! ```text
//! ┌─────────┬──────────────────────┐      ┌──────────────────────┐
//! │ COMMAND │ ARGUMENTS            │  ->  │ RESULTS              │
//! │ 1B      │ 0-4B, big-endian     │      │ 0-4B, big-endian     │
//! └─────────┴──────────────────────┘      └──────────────────────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod payload;

pub use command::{Action, Command, Register, COMMAND_COUNT, FIRST_EXTENDED_COMMAND};
pub use payload::{PayloadError, Request, Response, MAX_RESPONSE_SIZE};
