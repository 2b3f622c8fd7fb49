//! Configuration types
//!
//! Construction-time sensing parameters, synchronization tuning and
//! persisted calibration snapshots.

pub mod calibration;
pub mod sense;
pub mod sync;
#[cfg(feature = "toml")]
pub mod toml;

pub use calibration::*;
pub use sense::*;
pub use sync::*;
