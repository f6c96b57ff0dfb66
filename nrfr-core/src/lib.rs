#![forbid(unsafe_code)]

//! Nrfr core: the IPC-safe payload model shared by the read and write paths,
//! the security-patch inputs of the dispatch policy, configuration and
//! error types.

pub mod config;
pub mod error;
pub mod keys;
pub mod logging;
pub mod patch;
pub mod payload;
pub mod types;

pub use config::NrfrConfig;
pub use error::{Error, PatchDateError, Result, SerializationError};
pub use patch::{PatchThreshold, SecurityPatch};
pub use payload::{filter, filter_lossy, Bundle, BundleValue, ConfigPayload, ConfigValue};
pub use types::{SlotIndex, SubscriptionId};
