// Dispatch threshold driven by configuration rather than the built-in date.

use std::fs;

use nrfr_carrier::testing::FakeChannel;
use nrfr_carrier::{ComponentName, Mechanism};
use nrfr_core::{NrfrConfig, PatchThreshold, SubscriptionId};
use nrfr_integration_tests::{TestHarness, TestResult};

#[test]
fn threshold_from_config_file() -> TestResult<()> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("nrfr.toml");
	fs::write(&path, "broker_threshold = '2026-06'\nbroker_class = 'org.example.Helper'\n")?;
	let config = NrfrConfig::load_from_file(&path)?;
	assert_eq!(config.broker_threshold, PatchThreshold::new(2026, 5));

	let mut before = TestHarness::with_parts(FakeChannel::default(), "2026-05-31", 34, config.clone());
	assert_eq!(before.dispatcher().reset_carrier_config(SubscriptionId(1))?, Mechanism::Direct);
	assert_eq!(before.run_pending_brokers()?, 0);

	let after = TestHarness::with_parts(FakeChannel::default(), "2026-06-01", 34, config);
	assert_eq!(after.dispatcher().reset_carrier_config(SubscriptionId(1))?, Mechanism::Brokered);
	let launch = &after.channel.activity.launches()[0];
	assert_eq!(launch.component, ComponentName::new("com.github.nrfr", "org.example.Helper"));
	Ok(())
}

#[test]
fn non_persistent_overrides_are_forwarded() -> TestResult<()> {
	let config = NrfrConfig { persistent_overrides: false, ..NrfrConfig::default() };
	let h = TestHarness::with_parts(FakeChannel::default(), "2025-01-01", 34, config);
	h.dispatcher().set_carrier_config(SubscriptionId(1), Some("nl"), None)?;
	assert!(!h.channel.loader.override_calls()[0].persistent);
	Ok(())
}

#[test]
fn threshold_from_environment() -> TestResult<()> {
	let old = std::env::var("NRFR_BROKER_THRESHOLD").ok();
	std::env::set_var("NRFR_BROKER_THRESHOLD", "2024-01");
	let config = NrfrConfig::from_env();
	std::env::set_var("NRFR_BROKER_THRESHOLD", "2024-13");
	let invalid = NrfrConfig::from_env();
	match old {
		Some(v) => std::env::set_var("NRFR_BROKER_THRESHOLD", v),
		None => std::env::remove_var("NRFR_BROKER_THRESHOLD"),
	}

	let config = config?;
	assert_eq!(config.broker_threshold, PatchThreshold::new(2024, 0));
	assert!(invalid.is_err());
	let h = TestHarness::with_parts(FakeChannel::default(), "2024-02-01", 34, config);
	assert_eq!(h.dispatcher().select_mechanism(), Mechanism::Brokered);
	Ok(())
}
