// Test harness for Nrfr integration tests
//
// Provides:
// - A fake privileged channel shared by every component under test
// - A scripted security-patch level per harness
// - A stand-in for the broker helper process that replays recorded
//   instrumentation launches against the carrier-config service

use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use nrfr_carrier::testing::{FakeChannel, FakeSubscriptions, FakeTelephony, RecordingLoader};
use nrfr_carrier::{
	BrokerArguments, ConfigQueryService, OverrideDispatcher, SimInventory, StaticPlatform, TelephonyService,
};
use nrfr_core::NrfrConfig;
use tracing::{debug, info};

/// Test result type alias
pub type TestResult<T> = Result<T>;

/// Route test logs through the test writer; repeated calls are ignored.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
		.try_init();
}

pub struct TestHarness {
	pub channel: Arc<FakeChannel>,
	pub platform: Arc<StaticPlatform>,
	pub config: NrfrConfig,
	broker_replays: usize,
}

impl TestHarness {
	/// Harness on a device reporting `security_patch` at SDK 34.
	pub fn new(security_patch: &str) -> Self {
		Self::with_parts(FakeChannel::default(), security_patch, 34, NrfrConfig::default())
	}

	pub fn with_loader(loader: RecordingLoader, security_patch: &str) -> Self {
		Self::with_parts(FakeChannel::with_loader(loader), security_patch, 34, NrfrConfig::default())
	}

	pub fn with_parts(channel: FakeChannel, security_patch: &str, sdk_int: u32, config: NrfrConfig) -> Self {
		init_tracing();
		Self {
			channel: Arc::new(channel),
			platform: Arc::new(StaticPlatform::new(security_patch, sdk_int)),
			config,
			broker_replays: 0,
		}
	}

	pub fn dispatcher(&self) -> OverrideDispatcher {
		OverrideDispatcher::new(self.channel.clone(), self.platform.clone(), &self.config)
	}

	pub fn query(&self) -> ConfigQueryService {
		ConfigQueryService::new(self.channel.clone(), self.config.caller_package.clone())
	}

	pub fn inventory(&self, subs: FakeSubscriptions, telephony: Option<Arc<FakeTelephony>>) -> SimInventory {
		let telephony = telephony.map(|t| t as Arc<dyn TelephonyService>);
		SimInventory::new(Arc::new(subs), telephony, self.platform.as_ref(), self.query())
	}

	/// Act as the helper process for every launch not yet replayed.
	///
	/// Returns the number of launches executed.
	pub fn run_pending_brokers(&mut self) -> TestResult<usize> {
		let launches = self.channel.activity.launches();
		let pending = &launches[self.broker_replays..];
		for launch in pending {
			ensure!(
				launch.component.class == self.config.broker_class,
				"unexpected instrumentation component {}",
				launch.component
			);
			let args = BrokerArguments::decode(&launch.arguments).context("decoding broker launch arguments")?;
			debug!(sub_id = %args.subscription_id, clear = args.clear, "replaying broker launch");
			args.execute(self.channel.loader.as_ref(), self.config.persistent_overrides)
				.context("broker override")?;
		}
		let ran = pending.len();
		self.broker_replays = launches.len();
		info!(ran, "broker launches replayed");
		Ok(ran)
	}
}
