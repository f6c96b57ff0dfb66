#![forbid(unsafe_code)]

//! In-memory stand-ins for the privileged channel and platform services.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use nrfr_core::{ConfigPayload, SubscriptionId};

use crate::channel::{ActivityManager, CarrierConfigLoader, InstrumentationLaunch, PrivilegedChannel};
use crate::error::ChannelError;
use crate::inventory::{SubscriptionLookup, TelephonyService};
use crate::platform::PlatformInfo;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> { m.lock().unwrap_or_else(PoisonError::into_inner) }

#[derive(Debug, Clone, PartialEq)]
pub struct OverrideCall {
	pub sub_id: SubscriptionId,
	pub payload: ConfigPayload,
	pub persistent: bool,
}

/// Carrier-config service that serves canned configs and records writes.
#[derive(Debug, Default)]
pub struct RecordingLoader {
	configs: Mutex<HashMap<SubscriptionId, ConfigPayload>>,
	read_callers: Mutex<Vec<String>>,
	calls: Mutex<Vec<OverrideCall>>,
	read_error: Option<ChannelError>,
	override_error: Option<ChannelError>,
}

impl RecordingLoader {
	pub fn with_config(self, sub_id: SubscriptionId, config: ConfigPayload) -> Self {
		lock(&self.configs).insert(sub_id, config);
		self
	}
	pub fn fail_reads_with(mut self, e: ChannelError) -> Self {
		self.read_error = Some(e);
		self
	}
	pub fn fail_overrides_with(mut self, e: ChannelError) -> Self {
		self.override_error = Some(e);
		self
	}
	pub fn override_calls(&self) -> Vec<OverrideCall> { lock(&self.calls).clone() }
	pub fn read_callers(&self) -> Vec<String> { lock(&self.read_callers).clone() }
}

impl CarrierConfigLoader for RecordingLoader {
	fn get_config_for_sub_id(&self, sub_id: SubscriptionId, caller_package: &str) -> Result<Option<ConfigPayload>, ChannelError> {
		lock(&self.read_callers).push(caller_package.to_owned());
		if let Some(e) = &self.read_error {
			return Err(e.clone());
		}
		Ok(lock(&self.configs).get(&sub_id).cloned())
	}

	fn override_config(&self, sub_id: SubscriptionId, payload: ConfigPayload, persistent: bool) -> Result<(), ChannelError> {
		if let Some(e) = &self.override_error {
			return Err(e.clone());
		}
		lock(&self.calls).push(OverrideCall { sub_id, payload, persistent });
		Ok(())
	}
}

#[derive(Debug, Default)]
pub struct RecordingActivityManager {
	launches: Mutex<Vec<InstrumentationLaunch>>,
	error: Option<ChannelError>,
}

impl RecordingActivityManager {
	pub fn fail_with(mut self, e: ChannelError) -> Self {
		self.error = Some(e);
		self
	}
	pub fn launches(&self) -> Vec<InstrumentationLaunch> { lock(&self.launches).clone() }
}

impl ActivityManager for RecordingActivityManager {
	fn start_instrumentation(&self, launch: &InstrumentationLaunch) -> Result<(), ChannelError> {
		if let Some(e) = &self.error {
			return Err(e.clone());
		}
		lock(&self.launches).push(launch.clone());
		Ok(())
	}
}

/// Privileged channel over the recording services; counts handle acquisitions.
#[derive(Debug, Default)]
pub struct FakeChannel {
	pub loader: Arc<RecordingLoader>,
	pub activity: Arc<RecordingActivityManager>,
	loader_denied: Option<ChannelError>,
	activity_denied: Option<ChannelError>,
	loader_acquired: AtomicUsize,
	activity_acquired: AtomicUsize,
}

impl FakeChannel {
	pub fn with_loader(loader: RecordingLoader) -> Self { Self { loader: Arc::new(loader), ..Self::default() } }
	pub fn with_activity_manager(mut self, am: RecordingActivityManager) -> Self {
		self.activity = Arc::new(am);
		self
	}
	pub fn deny_loader(mut self, e: ChannelError) -> Self {
		self.loader_denied = Some(e);
		self
	}
	pub fn deny_activity(mut self, e: ChannelError) -> Self {
		self.activity_denied = Some(e);
		self
	}
	pub fn loader_acquisitions(&self) -> usize { self.loader_acquired.load(Ordering::SeqCst) }
	pub fn activity_acquisitions(&self) -> usize { self.activity_acquired.load(Ordering::SeqCst) }
}

impl PrivilegedChannel for FakeChannel {
	fn carrier_config_loader(&self) -> Result<Arc<dyn CarrierConfigLoader>, ChannelError> {
		if let Some(e) = &self.loader_denied {
			return Err(e.clone());
		}
		self.loader_acquired.fetch_add(1, Ordering::SeqCst);
		Ok(self.loader.clone())
	}

	fn activity_manager(&self) -> Result<Arc<dyn ActivityManager>, ChannelError> {
		if let Some(e) = &self.activity_denied {
			return Err(e.clone());
		}
		self.activity_acquired.fetch_add(1, Ordering::SeqCst);
		Ok(self.activity.clone())
	}
}

/// Reports a different security patch on each call; the last one repeats.
#[derive(Debug)]
pub struct ScriptedPlatform {
	patches: Mutex<VecDeque<String>>,
	sdk_int: u32,
}

impl ScriptedPlatform {
	pub fn new<I, S>(patches: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { patches: Mutex::new(patches.into_iter().map(Into::into).collect()), sdk_int: 35 }
	}
}

impl PlatformInfo for ScriptedPlatform {
	fn security_patch(&self) -> Option<String> {
		let mut q = lock(&self.patches);
		if q.len() > 1 { q.pop_front() } else { q.front().cloned() }
	}
	fn sdk_int(&self) -> u32 { self.sdk_int }
}

#[derive(Debug, Default)]
pub struct FakeSubscriptions {
	slots: HashMap<u32, Vec<SubscriptionId>>,
}

impl FakeSubscriptions {
	pub fn with_slot(mut self, physical_slot: u32, ids: Vec<SubscriptionId>) -> Self {
		self.slots.insert(physical_slot, ids);
		self
	}
}

impl SubscriptionLookup for FakeSubscriptions {
	fn sub_ids(&self, physical_slot: u32) -> Option<Vec<SubscriptionId>> { self.slots.get(&physical_slot).cloned() }
}

/// Names known per subscription; unknown subscriptions fail the lookup.
#[derive(Debug, Default)]
pub struct FakeTelephony {
	names: HashMap<SubscriptionId, String>,
	default_name: String,
	native: AtomicUsize,
	scoped: AtomicUsize,
}

impl FakeTelephony {
	pub fn with_name(mut self, sub_id: SubscriptionId, name: impl Into<String>) -> Self {
		self.names.insert(sub_id, name.into());
		self
	}
	pub fn with_default(mut self, name: impl Into<String>) -> Self {
		self.default_name = name.into();
		self
	}
	pub fn native_lookups(&self) -> usize { self.native.load(Ordering::SeqCst) }
	pub fn scoped_lookups(&self) -> usize { self.scoped.load(Ordering::SeqCst) }

	fn lookup(&self, sub_id: SubscriptionId) -> Result<String, ChannelError> {
		self.names
			.get(&sub_id)
			.cloned()
			.ok_or_else(|| ChannelError::unavailable(format!("no operator for subscription {sub_id}")))
	}
}

impl TelephonyService for FakeTelephony {
	fn network_operator_name(&self, sub_id: SubscriptionId) -> Result<String, ChannelError> {
		self.native.fetch_add(1, Ordering::SeqCst);
		self.lookup(sub_id)
	}
	fn scoped_network_operator_name(&self, sub_id: SubscriptionId) -> Result<String, ChannelError> {
		self.scoped.fetch_add(1, Ordering::SeqCst);
		self.lookup(sub_id)
	}
	fn default_network_operator_name(&self) -> String { self.default_name.clone() }
}
