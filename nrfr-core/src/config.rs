use crate::error::{Error, Result};
use crate::patch::PatchThreshold;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// `INSTR_FLAG_NO_RESTART`: the target process is not restarted for the helper.
pub const INSTR_FLAG_NO_RESTART: u32 = 1 << 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NrfrConfig {
	pub log_level: String,
	/// Caller identity on reads, and the package owning the broker component.
	pub caller_package: String,
	pub broker_class: String,
	pub broker_threshold: PatchThreshold,
	pub instrumentation_flags: u32,
	pub persistent_overrides: bool,
}

impl Default for NrfrConfig {
	fn default() -> Self {
		Self {
			log_level: "info".into(),
			caller_package: "com.github.nrfr".into(),
			broker_class: "com.github.nrfr.utils.BrokerInstrumentation".into(),
			broker_threshold: PatchThreshold::DEFAULT,
			instrumentation_flags: INSTR_FLAG_NO_RESTART,
			persistent_overrides: true,
		}
	}
}

impl NrfrConfig {
	pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
		let data = fs::read_to_string(path)?;
		let cfg: Self = toml::from_str(&data).map_err(|e| Error::config(format!("toml parse error: {e}")))?;
		cfg.validate()?;
		Ok(cfg)
	}

	pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
		fs::write(path, toml::to_string_pretty(self)?)?;
		Ok(())
	}

	pub fn from_env() -> Result<Self> {
		let mut cfg = Self::default();
		if let Ok(v) = std::env::var("NRFR_LOG_LEVEL") { cfg.log_level = v; }
		if let Ok(v) = std::env::var("NRFR_CALLER_PACKAGE") { cfg.caller_package = v; }
		if let Ok(v) = std::env::var("NRFR_BROKER_THRESHOLD") { cfg.broker_threshold = v.parse()?; }
		cfg.validate()?;
		Ok(cfg)
	}

	pub fn validate(&self) -> Result<()> {
		let allowed = ["trace", "debug", "info", "warn", "error"];
		if !allowed.contains(&self.log_level.as_str()) {
			return Err(Error::config(format!("invalid log_level: {}", self.log_level)));
		}
		if self.caller_package.trim().is_empty() {
			return Err(Error::config("caller_package must not be empty"));
		}
		if self.broker_class.trim().is_empty() {
			return Err(Error::config("broker_class must not be empty"));
		}
		if self.broker_threshold.month0 > 11 {
			return Err(Error::config(format!("invalid broker_threshold month: {}", self.broker_threshold.month0 + 1)));
		}
		Ok(())
	}
}
