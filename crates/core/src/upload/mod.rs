//! Upload flow
//!
//! - [`session`]: the idle → loading → loaded | failed state machine
//! - [`subscription`]: listener bookkeeping shared by channel adapters
//! - [`ports`]: real-time channel and file source boundaries

pub mod ports;
pub mod session;
pub mod subscription;

pub use session::{UploadPhase, UploadService};
pub use subscription::{ListenerRegistry, Subscription, SubscriptionId};
