use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform-assigned identifier of an active SIM profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(pub i32);

impl SubscriptionId {
	pub const fn get(self) -> i32 { self.0 }
}

impl From<i32> for SubscriptionId {
	fn from(v: i32) -> Self { Self(v) }
}

impl From<SubscriptionId> for i32 {
	fn from(v: SubscriptionId) -> Self { v.0 }
}

impl fmt::Display for SubscriptionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// Physical SIM slot, numbered from 1 for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SlotIndex {
	First = 1,
	Second = 2,
}

impl SlotIndex {
	pub const ALL: [SlotIndex; 2] = [SlotIndex::First, SlotIndex::Second];

	/// 1-based number shown to users.
	pub const fn number(self) -> u8 { self as u8 }

	/// 0-based index expected by the platform subscription lookup.
	pub const fn physical(self) -> u32 { self as u32 - 1 }
}

impl fmt::Display for SlotIndex {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.number()) }
}
