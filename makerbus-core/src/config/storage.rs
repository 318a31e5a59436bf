//! Persistent module configuration
//!
//! Everything a module needs to come up on the bus: its address, the
//! command variant it speaks, its pins and its power-on state. The record
//! is stored as postcard binary behind a magic number and version.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::{BridgePins, PowerOnState, Variant};

/// Magic number to identify a stored bridge configuration
pub const CONFIG_MAGIC: u32 = 0x4D42_5247; // "MBRG"

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Upper bound of the serialized record size
pub const MAX_CONFIG_SIZE: usize = 32;

/// Configuration load/store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Record does not fit the output buffer
    Serialize,
    /// Stored bytes are not a configuration record
    Deserialize,
    /// Record was written by something else
    BadMagic,
    /// Record was written by another format version
    VersionMismatch,
}

/// Complete module configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgeConfig {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Bus address of the module
    pub address: u8,
    /// Command surface
    pub variant: Variant,
    /// Pin assignment
    pub pins: BridgePins,
    /// State applied at start-up
    pub power_on: PowerOnState,
}

impl BridgeConfig {
    /// Default extended module at a bus address
    pub fn new(address: u8) -> Self {
        Self {
            magic: CONFIG_MAGIC,
            version: CONFIG_VERSION,
            address,
            variant: Variant::default(),
            pins: BridgePins::default(),
            power_on: PowerOnState::default(),
        }
    }

    /// Check if the header matches this format
    pub fn is_valid(&self) -> bool {
        self.magic == CONFIG_MAGIC && self.version == CONFIG_VERSION
    }

    /// Power-on state restricted to the configured variant
    pub fn effective_power_on(&self) -> PowerOnState {
        self.power_on.for_variant(self.variant)
    }
}

#[cfg(feature = "serde")]
impl BridgeConfig {
    /// Serialize into `buffer`, returning the used part
    pub fn to_slice<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buffer).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize and validate a stored record
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        if config.magic != CONFIG_MAGIC {
            return Err(ConfigError::BadMagic);
        }
        if config.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = BridgeConfig::new(0x21);
        assert!(config.is_valid());
        assert_eq!(config.address, 0x21);
        assert_eq!(config.variant, Variant::Extended);
        assert!(config.pins.is_valid());
    }

    #[test]
    fn test_effective_power_on_follows_variant() {
        let mut config = BridgeConfig::new(1);
        assert!(config.effective_power_on().swap);

        config.variant = Variant::Minimal;
        assert!(!config.effective_power_on().swap);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_stored_record_loads_back() {
        let mut config = BridgeConfig::new(0x30);
        config.pins.led = 2;
        config.power_on.motor_reverse = [true, false];

        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let used = config.to_slice(&mut buffer).unwrap().len();
        assert_eq!(BridgeConfig::from_bytes(&buffer[..used]), Ok(config));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_foreign_record_rejected() {
        let mut config = BridgeConfig::new(0x30);
        config.magic = 0x5049_4443;
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let used = config.to_slice(&mut buffer).unwrap().len();
        assert_eq!(
            BridgeConfig::from_bytes(&buffer[..used]),
            Err(ConfigError::BadMagic)
        );

        let mut config = BridgeConfig::new(0x30);
        config.version = CONFIG_VERSION + 1;
        let used = config.to_slice(&mut buffer).unwrap().len();
        assert_eq!(
            BridgeConfig::from_bytes(&buffer[..used]),
            Err(ConfigError::VersionMismatch)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_short_buffer() {
        let config = BridgeConfig::new(0x30);
        let mut buffer = [0u8; 2];
        assert_eq!(
            config.to_slice(&mut buffer).map(|s| s.len()),
            Err(ConfigError::Serialize)
        );
        assert_eq!(BridgeConfig::from_bytes(&[]), Err(ConfigError::Deserialize));
    }
}
