pub mod delivery;
pub mod registry;

pub use delivery::DeliveryError;
pub use registry::{BroadcastError, SubscribeError};
