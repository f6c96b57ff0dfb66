use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	#[error("toml: {0}")]
	Toml(#[from] toml::ser::Error),
	#[error("config: {0}")]
	Config(String),
}

impl Error {
	pub fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }
}

/// A value whose runtime type cannot cross the privileged boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported type: key `{key}` holds {observed_type}")]
pub struct SerializationError {
	pub key: String,
	pub observed_type: &'static str,
}

impl SerializationError {
	pub const REASON: &'static str = "unsupported type";

	pub fn unsupported(key: impl Into<String>, observed_type: &'static str) -> Self {
		Self { key: key.into(), observed_type }
	}
}

/// The platform security-patch string could not be read as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchDateError {
	#[error("security patch level is not reported")]
	Missing,
	#[error("malformed security patch `{input}`: {reason}")]
	Malformed { input: String, reason: String },
}
