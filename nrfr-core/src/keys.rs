//! Fixed carrier-config keys and the labels exposed to callers.

/// ISO country override, stored lower-cased.
pub const KEY_SIM_COUNTRY_ISO_OVERRIDE_STRING: &str = "sim_country_iso_override_string";
/// Gates whether [`KEY_CARRIER_NAME_STRING`] is honoured.
pub const KEY_CARRIER_NAME_OVERRIDE_BOOL: &str = "carrier_name_override_bool";
pub const KEY_CARRIER_NAME_STRING: &str = "carrier_name_string";

/// Set alone (plus the stamp) to drop every override for a subscription.
pub const KEY_CLEAR: &str = "moder_clear";
/// Target subscription, stamped on every outgoing bundle.
pub const KEY_SUB_ID: &str = "moder_subId";

pub const LABEL_COUNTRY_CODE: &str = "country code";
pub const LABEL_CARRIER_NAME: &str = "carrier name";
