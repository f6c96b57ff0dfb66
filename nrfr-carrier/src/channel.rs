#![forbid(unsafe_code)]

//! Collaborators reached through the externally granted privileged channel.
//!
//! Handles are acquired per call and dropped when the call returns; nothing in
//! this crate keeps one between operations.

use std::fmt;
use std::sync::Arc;

use nrfr_core::{Bundle, ConfigPayload, SubscriptionId};

use crate::error::ChannelError;

/// The carrier-config service (`ICarrierConfigLoader`).
pub trait CarrierConfigLoader: Send + Sync {
	fn get_config_for_sub_id(
		&self,
		sub_id: SubscriptionId,
		caller_package: &str,
	) -> Result<Option<ConfigPayload>, ChannelError>;

	fn override_config(
		&self,
		sub_id: SubscriptionId,
		payload: ConfigPayload,
		persistent: bool,
	) -> Result<(), ChannelError>;
}

/// The process-management service, used only to start the broker helper.
pub trait ActivityManager: Send + Sync {
	fn start_instrumentation(&self, launch: &InstrumentationLaunch) -> Result<(), ChannelError>;
}

pub trait PrivilegedChannel: Send + Sync {
	fn carrier_config_loader(&self) -> Result<Arc<dyn CarrierConfigLoader>, ChannelError>;
	fn activity_manager(&self) -> Result<Arc<dyn ActivityManager>, ChannelError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentName {
	pub package: String,
	pub class: String,
}

impl ComponentName {
	pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
		Self { package: package.into(), class: class.into() }
	}
}

impl fmt::Display for ComponentName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}/{}", self.package, self.class) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InstrumentationFlags(pub u32);

impl InstrumentationFlags {
	pub const NO_RESTART: Self = Self(nrfr_core::config::INSTR_FLAG_NO_RESTART);

	pub const fn bits(self) -> u32 { self.0 }
	pub const fn contains(self, other: Self) -> bool { self.0 & other.0 == other.0 }
}

/// Everything the activity manager needs to start the helper without a watcher.
#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentationLaunch {
	pub component: ComponentName,
	pub arguments: Bundle,
	pub flags: InstrumentationFlags,
	pub user_id: u32,
}
