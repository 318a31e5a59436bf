//! Configuration types
//!
//! Board-specific settings of the bridge module, stored as postcard binary
//! data.

pub mod hardware;
pub mod storage;

pub use hardware::*;
pub use storage::*;
