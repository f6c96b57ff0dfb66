#![forbid(unsafe_code)]

/// First SDK level with `TelephonyManager#getNetworkOperatorName(int)`.
pub const SDK_Q: u32 = 29;

/// Build properties read at the moment a decision needs them.
pub trait PlatformInfo: Send + Sync {
	/// Raw `ro.build.version.security_patch`, if the build reports one.
	fn security_patch(&self) -> Option<String>;
	fn sdk_int(&self) -> u32;
}

/// Fixed build properties, for hosts that read them once and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPlatform {
	pub security_patch: Option<String>,
	pub sdk_int: u32,
}

impl StaticPlatform {
	pub fn new(security_patch: impl Into<String>, sdk_int: u32) -> Self {
		Self { security_patch: Some(security_patch.into()), sdk_int }
	}
}

impl PlatformInfo for StaticPlatform {
	fn security_patch(&self) -> Option<String> { self.security_patch.clone() }
	fn sdk_int(&self) -> u32 { self.sdk_int }
}
