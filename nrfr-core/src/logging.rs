use tracing_subscriber::EnvFilter;

use crate::config::NrfrConfig;

/// Install a fmt subscriber at the configured level.
///
/// `RUST_LOG` wins when set. Returns `false` if a global subscriber was
/// already installed.
pub fn init(cfg: &NrfrConfig) -> bool {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));
	tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init().is_ok()
}
