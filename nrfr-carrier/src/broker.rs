#![forbid(unsafe_code)]

//! Helper-process side of the brokered path.
//!
//! The instrumentation component receives the dispatcher's argument bundle as
//! its launch arguments and performs the `overrideConfig` call the caller
//! could not make in-process. The payload it forwards is the same one the
//! direct path would have sent.

use nrfr_core::keys::{KEY_CLEAR, KEY_SUB_ID};
use nrfr_core::{filter, Bundle, ConfigPayload, SubscriptionId};
use tracing::info;

use crate::channel::CarrierConfigLoader;
use crate::error::BrokerError;

#[derive(Debug, Clone, PartialEq)]
pub struct BrokerArguments {
	pub subscription_id: SubscriptionId,
	pub clear: bool,
	pub payload: ConfigPayload,
}

impl BrokerArguments {
	pub fn decode(args: &Bundle) -> Result<Self, BrokerError> {
		let subscription_id = args.get_int(KEY_SUB_ID).map(SubscriptionId).ok_or(BrokerError::MissingSubscription)?;
		let clear = args.get_bool(KEY_CLEAR, false);
		let payload = filter(args)?;
		Ok(Self { subscription_id, clear, payload })
	}

	pub fn execute(self, loader: &dyn CarrierConfigLoader, persistent: bool) -> Result<(), BrokerError> {
		let Self { subscription_id, clear, payload } = self;
		loader.override_config(subscription_id, payload, persistent)?;
		info!(sub_id = %subscription_id, clear, "broker applied carrier config override");
		Ok(())
	}
}
