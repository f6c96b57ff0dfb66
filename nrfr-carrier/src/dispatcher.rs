#![forbid(unsafe_code)]

//! Write side: pick a transport for each override and run it.
//!
//! On builds patched at or after the configured threshold the in-process
//! `overrideConfig` call no longer goes through, so those builds hand the
//! request to a helper instrumentation process instead. The choice is made
//! fresh on every call from the reported security-patch level; a missing or
//! unreadable level selects the direct path.

use std::sync::Arc;

use nrfr_core::{filter, Bundle, ConfigPayload, NrfrConfig, PatchThreshold, SecurityPatch, SubscriptionId};
use tracing::{debug, info};

use crate::channel::{ComponentName, InstrumentationFlags, InstrumentationLaunch, PrivilegedChannel};
use crate::error::{DispatchError, Mechanism, Result};
use crate::platform::PlatformInfo;
use crate::request::OverrideRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchPolicy {
	pub threshold: PatchThreshold,
}

impl DispatchPolicy {
	pub const fn new(threshold: PatchThreshold) -> Self { Self { threshold } }

	pub fn select(&self, reported_patch: Option<&str>) -> Mechanism {
		match SecurityPatch::from_reported(reported_patch) {
			Ok(patch) if self.threshold.is_met_by(&patch) => Mechanism::Brokered,
			Ok(_) => Mechanism::Direct,
			Err(e) => {
				debug!(error = %e, "security patch unreadable, falling back to direct override");
				Mechanism::Direct
			}
		}
	}
}

pub struct OverrideDispatcher {
	channel: Arc<dyn PrivilegedChannel>,
	platform: Arc<dyn PlatformInfo>,
	policy: DispatchPolicy,
	broker: ComponentName,
	flags: InstrumentationFlags,
	persistent: bool,
}

impl OverrideDispatcher {
	pub fn new(channel: Arc<dyn PrivilegedChannel>, platform: Arc<dyn PlatformInfo>, cfg: &NrfrConfig) -> Self {
		Self {
			channel,
			platform,
			policy: DispatchPolicy::new(cfg.broker_threshold),
			broker: ComponentName::new(cfg.caller_package.clone(), cfg.broker_class.clone()),
			flags: InstrumentationFlags(cfg.instrumentation_flags),
			persistent: cfg.persistent_overrides,
		}
	}

	pub fn policy(&self) -> DispatchPolicy { self.policy }

	pub fn select_mechanism(&self) -> Mechanism {
		self.policy.select(self.platform.security_patch().as_deref())
	}

	/// Apply one request; the returned mechanism is the one that succeeded.
	pub fn apply(&self, request: &OverrideRequest) -> Result<Mechanism> {
		self.dispatch_arguments(request.subscription_id, request.build_arguments())
	}

	/// Send an already built argument bundle; it must carry the subscription
	/// stamp. Either transport rejects it whole if any value is not
	/// persistable, before any service handle is acquired.
	pub fn dispatch_arguments(&self, sub_id: SubscriptionId, args: Bundle) -> Result<Mechanism> {
		let mechanism = self.select_mechanism();
		debug!(%sub_id, %mechanism, keys = args.len(), "dispatching carrier config override");
		let payload = filter(&args).map_err(|e| DispatchError::new(mechanism, e))?;
		match mechanism {
			Mechanism::Direct => self.override_directly(sub_id, payload)?,
			Mechanism::Brokered => self.override_via_broker(Bundle::from(payload))?,
		}
		info!(%sub_id, %mechanism, "carrier config override applied");
		Ok(mechanism)
	}

	pub fn set_carrier_config(
		&self,
		sub_id: SubscriptionId,
		country_code: Option<&str>,
		carrier_name: Option<&str>,
	) -> Result<Mechanism> {
		self.apply(&OverrideRequest::set(sub_id, country_code, carrier_name))
	}

	pub fn reset_carrier_config(&self, sub_id: SubscriptionId) -> Result<Mechanism> {
		self.apply(&OverrideRequest::clear(sub_id))
	}

	fn override_directly(&self, sub_id: SubscriptionId, payload: ConfigPayload) -> Result<()> {
		let loader = self
			.channel
			.carrier_config_loader()
			.map_err(|e| DispatchError::new(Mechanism::Direct, e))?;
		loader
			.override_config(sub_id, payload, self.persistent)
			.map_err(|e| DispatchError::new(Mechanism::Direct, e))
	}

	fn override_via_broker(&self, args: Bundle) -> Result<()> {
		let am = self
			.channel
			.activity_manager()
			.map_err(|e| DispatchError::new(Mechanism::Brokered, e))?;
		let launch = InstrumentationLaunch { component: self.broker.clone(), arguments: args, flags: self.flags, user_id: 0 };
		am.start_instrumentation(&launch).map_err(|e| DispatchError::new(Mechanism::Brokered, e))
	}
}
