#![forbid(unsafe_code)]

//! Nrfr carrier: reading and overriding per-subscription carrier config
//! through a privileged system-service channel.
//!
//! - Read path (`ConfigQueryService`): best-effort, failures read as "no overrides"
//! - Write path (`OverrideDispatcher`): direct or brokered, failures always surface
//! - Broker side (`BrokerArguments`): what the helper process does with its launch arguments
//! - Slot listing (`SimInventory`)

pub mod broker;
pub mod channel;
pub mod dispatcher;
pub mod error;
pub mod inventory;
pub mod platform;
pub mod query;
pub mod request;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use broker::BrokerArguments;
pub use channel::{ActivityManager, CarrierConfigLoader, ComponentName, InstrumentationFlags, InstrumentationLaunch, PrivilegedChannel};
pub use dispatcher::{DispatchPolicy, OverrideDispatcher};
pub use error::{BrokerError, ChannelError, DispatchCause, DispatchError, Mechanism, Result};
pub use inventory::{CarrierNameResolver, OperatorNameStrategy, SimCardInfo, SimInventory, SubscriptionLookup, TelephonyService};
pub use platform::{PlatformInfo, StaticPlatform};
pub use query::{ConfigQueryService, CurrentOverrides, OverrideLabels};
pub use request::OverrideRequest;
