/// Common error types: subscription validation, broadcast validation, delivery.
pub mod error;
/// Pub/Sub core: Registry, topic tree, typed subscriptions, broadcast reports.
pub mod pubsub;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Operation errors.
pub use error::{BroadcastError, DeliveryError, SubscribeError};
/// Pub/Sub API.
pub use pubsub::{BroadcastReport, DeliveryFailure, Registry, RegistryConfig, WILDCARD};
