#![forbid(unsafe_code)]

//! SIM slot enumeration for display.

use std::sync::Arc;

use nrfr_core::{SlotIndex, SubscriptionId};
use serde::Serialize;
use tracing::debug;

use crate::error::ChannelError;
use crate::platform::{PlatformInfo, SDK_Q};
use crate::query::{ConfigQueryService, OverrideLabels};

/// `SubscriptionManager.getSubId(slotIndex)`.
pub trait SubscriptionLookup: Send + Sync {
	/// `None` when the slot holds no active subscription.
	fn sub_ids(&self, physical_slot: u32) -> Option<Vec<SubscriptionId>>;
}

/// Operator-name queries on the telephony service.
pub trait TelephonyService: Send + Sync {
	/// Per-subscription query available from SDK 29.
	fn network_operator_name(&self, sub_id: SubscriptionId) -> Result<String, ChannelError>;
	/// Older builds: the name as seen by a manager scoped to `sub_id`.
	fn scoped_network_operator_name(&self, sub_id: SubscriptionId) -> Result<String, ChannelError>;
	/// Name for the default subscription.
	fn default_network_operator_name(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorNameStrategy {
	Native,
	Legacy,
}

impl OperatorNameStrategy {
	pub const fn negotiate(sdk_int: u32) -> Self {
		if sdk_int >= SDK_Q { Self::Native } else { Self::Legacy }
	}
}

/// Carrier display names, with the lookup strategy fixed at construction.
pub struct CarrierNameResolver {
	telephony: Option<Arc<dyn TelephonyService>>,
	strategy: OperatorNameStrategy,
}

impl CarrierNameResolver {
	pub fn new(telephony: Option<Arc<dyn TelephonyService>>, sdk_int: u32) -> Self {
		Self { telephony, strategy: OperatorNameStrategy::negotiate(sdk_int) }
	}

	pub fn strategy(&self) -> OperatorNameStrategy { self.strategy }

	/// Empty when no telephony service is available.
	pub fn resolve(&self, sub_id: SubscriptionId) -> String {
		let Some(telephony) = self.telephony.as_deref() else { return String::new() };
		let looked_up = match self.strategy {
			OperatorNameStrategy::Native => telephony.network_operator_name(sub_id),
			OperatorNameStrategy::Legacy => telephony.scoped_network_operator_name(sub_id),
		};
		looked_up.unwrap_or_else(|e| {
			debug!(%sub_id, error = %e, "operator name lookup failed, using default subscription");
			telephony.default_network_operator_name()
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimCardInfo {
	pub slot: SlotIndex,
	pub subscription_id: SubscriptionId,
	pub carrier_name: String,
	pub overrides: OverrideLabels,
}

pub struct SimInventory {
	subscriptions: Arc<dyn SubscriptionLookup>,
	names: CarrierNameResolver,
	query: ConfigQueryService,
}

impl SimInventory {
	pub fn new(
		subscriptions: Arc<dyn SubscriptionLookup>,
		telephony: Option<Arc<dyn TelephonyService>>,
		platform: &dyn PlatformInfo,
		query: ConfigQueryService,
	) -> Self {
		Self { subscriptions, names: CarrierNameResolver::new(telephony, platform.sdk_int()), query }
	}

	/// Slots without a subscription are left out.
	pub fn sim_cards(&self) -> Vec<SimCardInfo> {
		SlotIndex::ALL
			.into_iter()
			.filter_map(|slot| {
				let subscription_id = self.subscriptions.sub_ids(slot.physical())?.first().copied()?;
				Some(SimCardInfo {
					slot,
					subscription_id,
					carrier_name: self.names.resolve(subscription_id),
					overrides: self.query.get_overrides(subscription_id),
				})
			})
			.collect()
	}
}
