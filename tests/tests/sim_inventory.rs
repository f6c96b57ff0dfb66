// SIM slot listing composed from subscription lookup, operator names and
// the current override state read through the privileged channel.

use std::sync::Arc;

use nrfr_carrier::testing::{FakeChannel, FakeSubscriptions, FakeTelephony, RecordingLoader};
use nrfr_carrier::{ChannelError, OperatorNameStrategy};
use nrfr_core::keys::{
	KEY_CARRIER_NAME_OVERRIDE_BOOL, KEY_CARRIER_NAME_STRING, KEY_SIM_COUNTRY_ISO_OVERRIDE_STRING, LABEL_CARRIER_NAME,
	LABEL_COUNTRY_CODE,
};
use nrfr_core::{ConfigPayload, NrfrConfig, SlotIndex, SubscriptionId};
use nrfr_integration_tests::TestHarness;

fn overridden() -> ConfigPayload {
	let mut p = ConfigPayload::new();
	p.put_string(KEY_SIM_COUNTRY_ISO_OVERRIDE_STRING, "tw");
	p.put_bool(KEY_CARRIER_NAME_OVERRIDE_BOOL, true);
	p.put_string(KEY_CARRIER_NAME_STRING, "Nrfr");
	p.put_int("carrier_default_wfc_ims_mode_int", 2);
	p
}

#[test]
fn dual_sim_listing() {
	let loader = RecordingLoader::default().with_config(SubscriptionId(1), overridden()).with_config(SubscriptionId(2), ConfigPayload::new());
	let h = TestHarness::with_loader(loader, "2025-01-01");
	let subs = FakeSubscriptions::default()
		.with_slot(0, vec![SubscriptionId(1)])
		.with_slot(1, vec![SubscriptionId(2), SubscriptionId(9)]);
	let tel = Arc::new(FakeTelephony::default().with_name(SubscriptionId(1), "Alpha").with_name(SubscriptionId(2), "Beta"));

	let cards = h.inventory(subs, Some(tel.clone())).sim_cards();
	assert_eq!(cards.len(), 2);

	assert_eq!(cards[0].slot, SlotIndex::First);
	assert_eq!(cards[0].carrier_name, "Alpha");
	assert_eq!(cards[0].overrides.len(), 2);
	assert_eq!(cards[0].overrides[LABEL_COUNTRY_CODE], "tw");
	assert_eq!(cards[0].overrides[LABEL_CARRIER_NAME], "Nrfr");

	assert_eq!(cards[1].slot, SlotIndex::Second);
	assert_eq!(cards[1].subscription_id, SubscriptionId(2));
	assert!(cards[1].overrides.is_empty());

	assert_eq!(tel.native_lookups(), 2);
	assert_eq!(tel.scoped_lookups(), 0);

	let json = serde_json::to_value(&cards[0]).unwrap();
	assert_eq!(json["carrier_name"], "Alpha");
	assert_eq!(json["overrides"]["country code"], "tw");
}

#[test]
fn old_sdk_uses_scoped_lookup() {
	let h = TestHarness::with_parts(FakeChannel::default(), "2019-08-05", 28, NrfrConfig::default());
	let subs = FakeSubscriptions::default().with_slot(0, vec![SubscriptionId(4)]);
	let tel = Arc::new(FakeTelephony::default().with_default("Fallback"));
	let cards = h.inventory(subs, Some(tel.clone())).sim_cards();
	assert_eq!(cards[0].carrier_name, "Fallback");
	assert_eq!(tel.scoped_lookups(), 1);
	assert_eq!(OperatorNameStrategy::negotiate(28), OperatorNameStrategy::Legacy);
}

#[test]
fn unreadable_config_still_lists_the_slot() {
	let channel = FakeChannel::default().deny_loader(ChannelError::permission("not granted"));
	let h = TestHarness::with_parts(channel, "2025-01-01", 34, NrfrConfig::default());
	let subs = FakeSubscriptions::default().with_slot(0, vec![SubscriptionId(1)]);
	let cards = h.inventory(subs, None).sim_cards();
	assert_eq!(cards.len(), 1);
	assert_eq!(cards[0].carrier_name, "");
	assert!(cards[0].overrides.is_empty());
}

#[test]
fn no_sims_no_cards() {
	let h = TestHarness::new("2025-01-01");
	assert!(h.inventory(FakeSubscriptions::default(), None).sim_cards().is_empty());
}
