//! Argument and result encoding for module commands
//!
//! A command's arguments arrive as a byte string and its results leave as
//! one. Multi-byte values are big-endian:
//!
//! | Type     | Rust  | Bytes |
//! |----------|-------|-------|
//! | Logical  | bool  | 1     |
//! | Byte     | i8    | 1     |
//! | UByte    | u8    | 1     |
//! | Short    | i16   | 2     |
//! | UShort   | u16   | 2     |
//! | Integer  | i32   | 4     |
//! | UInteger | u32   | 4     |
//!
//! A Logical reads as true for any non-zero byte and is written as 0 or 1.

use heapless::Vec;

/// Maximum result size of a single command
pub const MAX_RESPONSE_SIZE: usize = 16;

/// Errors that can occur while reading arguments or writing results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// The request ended before all arguments were read
    Truncated,
    /// The request had bytes left over after the arguments
    TrailingBytes,
    /// The response buffer is full
    ResponseFull,
}

/// Cursor over a command's argument bytes
#[derive(Debug, Clone)]
pub struct Request<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Request<'a> {
    /// Wrap the argument bytes of one command
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Number of bytes not yet read
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], PayloadError> {
        let end = self.position + N;
        let slice = self
            .bytes
            .get(self.position..end)
            .ok_or(PayloadError::Truncated)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        self.position = end;
        Ok(out)
    }

    pub fn logical(&mut self) -> Result<bool, PayloadError> {
        Ok(self.ubyte()? != 0)
    }

    pub fn byte(&mut self) -> Result<i8, PayloadError> {
        Ok(i8::from_be_bytes(self.take()?))
    }

    pub fn ubyte(&mut self) -> Result<u8, PayloadError> {
        Ok(u8::from_be_bytes(self.take()?))
    }

    pub fn short(&mut self) -> Result<i16, PayloadError> {
        Ok(i16::from_be_bytes(self.take()?))
    }

    pub fn ushort(&mut self) -> Result<u16, PayloadError> {
        Ok(u16::from_be_bytes(self.take()?))
    }

    pub fn integer(&mut self) -> Result<i32, PayloadError> {
        Ok(i32::from_be_bytes(self.take()?))
    }

    pub fn uinteger(&mut self) -> Result<u32, PayloadError> {
        Ok(u32::from_be_bytes(self.take()?))
    }

    /// Check that every argument byte was consumed
    pub fn finish(&self) -> Result<(), PayloadError> {
        if self.remaining() == 0 {
            Ok(())
        } else {
            Err(PayloadError::TrailingBytes)
        }
    }
}

/// Result bytes of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    bytes: Vec<u8, MAX_RESPONSE_SIZE>,
}

impl Response {
    /// Create an empty response
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Encoded result bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Drop any results written so far
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    fn put(&mut self, bytes: &[u8]) -> Result<(), PayloadError> {
        self.bytes
            .extend_from_slice(bytes)
            .map_err(|_| PayloadError::ResponseFull)
    }

    pub fn put_logical(&mut self, value: bool) -> Result<(), PayloadError> {
        self.put_ubyte(u8::from(value))
    }

    pub fn put_byte(&mut self, value: i8) -> Result<(), PayloadError> {
        self.put(&value.to_be_bytes())
    }

    pub fn put_ubyte(&mut self, value: u8) -> Result<(), PayloadError> {
        self.put(&[value])
    }

    pub fn put_short(&mut self, value: i16) -> Result<(), PayloadError> {
        self.put(&value.to_be_bytes())
    }

    pub fn put_ushort(&mut self, value: u16) -> Result<(), PayloadError> {
        self.put(&value.to_be_bytes())
    }

    pub fn put_integer(&mut self, value: i32) -> Result<(), PayloadError> {
        self.put(&value.to_be_bytes())
    }

    pub fn put_uinteger(&mut self, value: u32) -> Result<(), PayloadError> {
        self.put(&value.to_be_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_integer_is_big_endian() {
        let mut response = Response::new();
        response.put_integer(0x0102_0304).unwrap();
        assert_eq!(response.as_bytes(), &[1, 2, 3, 4]);

        let mut request = Request::new(&[0xFF, 0xFF, 0xFF, 0xFE]);
        assert_eq!(request.integer(), Ok(-2));
        assert_eq!(request.finish(), Ok(()));
    }

    #[test]
    fn test_byte_is_twos_complement() {
        let mut request = Request::new(&[0x80, 0x7F]);
        assert_eq!(request.byte(), Ok(-128));
        assert_eq!(request.byte(), Ok(127));
    }

    #[test]
    fn test_logical_accepts_any_nonzero() {
        let mut request = Request::new(&[0, 1, 0x42]);
        assert_eq!(request.logical(), Ok(false));
        assert_eq!(request.logical(), Ok(true));
        assert_eq!(request.logical(), Ok(true));

        let mut response = Response::new();
        response.put_logical(true).unwrap();
        response.put_logical(false).unwrap();
        assert_eq!(response.as_bytes(), &[1, 0]);
    }

    #[test]
    fn test_truncated_request() {
        let mut request = Request::new(&[0, 0, 1]);
        assert_eq!(request.integer(), Err(PayloadError::Truncated));
        // A failed read consumes nothing
        assert_eq!(request.remaining(), 3);
        assert_eq!(request.short(), Ok(0));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut request = Request::new(&[1, 2]);
        assert_eq!(request.ubyte(), Ok(1));
        assert_eq!(request.finish(), Err(PayloadError::TrailingBytes));
    }

    #[test]
    fn test_response_full() {
        let mut response = Response::new();
        for _ in 0..(MAX_RESPONSE_SIZE / 4) {
            response.put_uinteger(u32::MAX).unwrap();
        }
        assert_eq!(response.put_ubyte(0), Err(PayloadError::ResponseFull));
    }

    proptest! {
        #[test]
        fn prop_integer_survives_the_wire(value in any::<i32>()) {
            let mut response = Response::new();
            response.put_integer(value).unwrap();
            let mut request = Request::new(response.as_bytes());
            prop_assert_eq!(request.integer(), Ok(value));
            prop_assert_eq!(request.finish(), Ok(()));
        }
    }
}
