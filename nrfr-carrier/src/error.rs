#![forbid(unsafe_code)]

use std::fmt;

use nrfr_core::SerializationError;
use thiserror::Error as ThisError;

pub type Result<T, E = DispatchError> = std::result::Result<T, E>;

/// Failures reaching or calling a privileged system service.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ChannelError {
	#[error("permission denied: {0}")]
	PermissionDenied(String),
	#[error("service unavailable: {0}")]
	ServiceUnavailable(String),
	#[error("transport error: {0}")]
	Transport(String),
	#[error("component not found: {0}")]
	ComponentNotFound(String),
}

impl ChannelError {
	pub fn permission(msg: impl Into<String>) -> Self { Self::PermissionDenied(msg.into()) }
	pub fn unavailable(msg: impl Into<String>) -> Self { Self::ServiceUnavailable(msg.into()) }
	pub fn transport(msg: impl Into<String>) -> Self { Self::Transport(msg.into()) }
}

/// How an override reached the configuration service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mechanism {
	/// In-process call through the privileged channel.
	Direct,
	/// Helper instrumentation process started through the activity manager.
	Brokered,
}

impl fmt::Display for Mechanism {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Direct => "direct",
			Self::Brokered => "brokered",
		})
	}
}

#[derive(Debug, ThisError)]
pub enum DispatchCause {
	#[error(transparent)]
	Serialization(#[from] SerializationError),
	#[error(transparent)]
	Channel(#[from] ChannelError),
}

#[derive(Debug, ThisError)]
#[error("{mechanism} override failed: {cause}")]
pub struct DispatchError {
	pub mechanism: Mechanism,
	#[source]
	pub cause: DispatchCause,
}

impl DispatchError {
	pub fn new(mechanism: Mechanism, cause: impl Into<DispatchCause>) -> Self {
		Self { mechanism, cause: cause.into() }
	}
}

/// Failures on the helper-process side of the brokered path.
#[derive(Debug, ThisError)]
pub enum BrokerError {
	#[error("launch arguments carry no subscription stamp")]
	MissingSubscription,
	#[error(transparent)]
	Serialization(#[from] SerializationError),
	#[error(transparent)]
	Channel(#[from] ChannelError),
}
