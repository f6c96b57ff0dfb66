#![forbid(unsafe_code)]

use nrfr_core::keys::{KEY_CARRIER_NAME_OVERRIDE_BOOL, KEY_CARRIER_NAME_STRING, KEY_CLEAR, KEY_SIM_COUNTRY_ISO_OVERRIDE_STRING, KEY_SUB_ID};
use nrfr_core::{Bundle, SubscriptionId};

/// One write against a subscription's carrier config.
///
/// With `clear` set the value fields are ignored and every override for the
/// subscription is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRequest {
	pub subscription_id: SubscriptionId,
	pub country_code: Option<String>,
	pub carrier_name: Option<String>,
	pub clear: bool,
}

impl OverrideRequest {
	pub fn set(subscription_id: SubscriptionId, country_code: Option<&str>, carrier_name: Option<&str>) -> Self {
		Self {
			subscription_id,
			country_code: country_code.map(str::to_owned),
			carrier_name: carrier_name.map(str::to_owned),
			clear: false,
		}
	}

	pub fn clear(subscription_id: SubscriptionId) -> Self {
		Self { subscription_id, country_code: None, carrier_name: None, clear: true }
	}

	/// Codes of exactly two UTF-16 units, lower-cased; anything else is dropped.
	pub fn normalized_country_code(&self) -> Option<String> {
		self.country_code
			.as_deref()
			.filter(|c| c.encode_utf16().count() == 2)
			.map(str::to_lowercase)
	}

	pub fn normalized_carrier_name(&self) -> Option<&str> {
		self.carrier_name.as_deref().filter(|n| !n.is_empty())
	}

	/// The bundle both transports carry, stamped with the target subscription.
	pub fn build_arguments(&self) -> Bundle {
		let mut args = Bundle::new();
		if self.clear {
			args.put_bool(KEY_CLEAR, true);
		} else {
			if let Some(cc) = self.normalized_country_code() {
				args.put_string(KEY_SIM_COUNTRY_ISO_OVERRIDE_STRING, cc);
			}
			if let Some(name) = self.normalized_carrier_name() {
				args.put_bool(KEY_CARRIER_NAME_OVERRIDE_BOOL, true);
				args.put_string(KEY_CARRIER_NAME_STRING, name);
			}
		}
		args.put_int(KEY_SUB_ID, self.subscription_id.get());
		args
	}
}
