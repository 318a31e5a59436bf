//! Bus module trait
//!
//! A bus module owns an address and serves commands sent to it. Drivers
//! implement [`BusModule`]; the bus layer only needs this trait to route
//! a received command to the right module.

use makerbus_protocol::{PayloadError, Request, Response};

/// Errors that can occur while serving a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Command number not served by this module
    UnknownCommand(u8),
    /// Arguments or results did not fit the command
    Payload(PayloadError),
}

impl From<PayloadError> for DispatchError {
    fn from(error: PayloadError) -> Self {
        DispatchError::Payload(error)
    }
}

/// A module reachable on the bus
pub trait BusModule {
    /// Bus address of the module
    fn address(&self) -> u8;

    /// Serve one command
    ///
    /// Arguments are read from `request`, which must be fully consumed.
    /// Results are appended to `response`. On error the module state is
    /// left as it was before the call.
    fn dispatch(
        &mut self,
        command: u8,
        request: &mut Request<'_>,
        response: &mut Response,
    ) -> Result<(), DispatchError>;

    /// Check whether a command number is served by this module
    fn serves(&self, command: u8) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_error_converts() {
        let error: DispatchError = PayloadError::Truncated.into();
        assert_eq!(error, DispatchError::Payload(PayloadError::Truncated));
    }
}
