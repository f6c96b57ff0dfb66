#![forbid(unsafe_code)]

//! Read side: the overrides currently applied to a subscription.

use std::collections::BTreeMap;
use std::sync::Arc;

use nrfr_core::keys::{
	KEY_CARRIER_NAME_OVERRIDE_BOOL, KEY_CARRIER_NAME_STRING, KEY_SIM_COUNTRY_ISO_OVERRIDE_STRING, LABEL_CARRIER_NAME,
	LABEL_COUNTRY_CODE,
};
use nrfr_core::{filter_lossy, Bundle, ConfigPayload, SubscriptionId};
use tracing::{debug, warn};

use crate::channel::PrivilegedChannel;
use crate::error::ChannelError;

/// Display label → value.
pub type OverrideLabels = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentOverrides {
	pub country_code: Option<String>,
	pub carrier_name: Option<String>,
}

impl CurrentOverrides {
	/// Projects the two override keys; every other key is ignored.
	pub fn from_payload(payload: &ConfigPayload) -> Self {
		let country_code = payload.get_string(KEY_SIM_COUNTRY_ISO_OVERRIDE_STRING).map(str::to_owned);
		let carrier_name = payload
			.get_bool(KEY_CARRIER_NAME_OVERRIDE_BOOL, false)
			.then(|| payload.get_string(KEY_CARRIER_NAME_STRING).map(str::to_owned))
			.flatten();
		Self { country_code, carrier_name }
	}

	/// Same projection over a loosely typed bundle, such as recorded launch
	/// arguments; entries outside the whitelist are skipped.
	pub fn from_bundle(bundle: &Bundle) -> Self { Self::from_payload(&filter_lossy(bundle)) }

	pub fn is_empty(&self) -> bool { self.country_code.is_none() && self.carrier_name.is_none() }

	pub fn into_labels(self) -> OverrideLabels {
		let mut out = OverrideLabels::new();
		if let Some(cc) = self.country_code {
			out.insert(LABEL_COUNTRY_CODE.to_owned(), cc);
		}
		if let Some(name) = self.carrier_name {
			out.insert(LABEL_CARRIER_NAME.to_owned(), name);
		}
		out
	}
}

pub struct ConfigQueryService {
	channel: Arc<dyn PrivilegedChannel>,
	caller_package: String,
}

impl ConfigQueryService {
	pub fn new(channel: Arc<dyn PrivilegedChannel>, caller_package: impl Into<String>) -> Self {
		Self { channel, caller_package: caller_package.into() }
	}

	/// A subscription the service returns nothing for has no overrides.
	pub fn try_current_overrides(&self, sub_id: SubscriptionId) -> Result<CurrentOverrides, ChannelError> {
		let loader = self.channel.carrier_config_loader()?;
		let config = loader.get_config_for_sub_id(sub_id, &self.caller_package)?;
		Ok(config.as_ref().map(CurrentOverrides::from_payload).unwrap_or_default())
	}

	/// Best-effort labels for display; any failure reads as "no overrides".
	pub fn get_overrides(&self, sub_id: SubscriptionId) -> OverrideLabels {
		match self.try_current_overrides(sub_id) {
			Ok(current) => {
				debug!(%sub_id, ?current, "read carrier config overrides");
				current.into_labels()
			}
			Err(e) => {
				warn!(%sub_id, error = %e, "carrier config read failed, reporting no overrides");
				OverrideLabels::new()
			}
		}
	}
}
