//! Port for publishing listing lifecycle events.

use async_trait::async_trait;

use crate::domain::ListingEvent;

use super::define_port_error;

define_port_error! {
    /// Errors raised by event sinks.
    pub enum ListingEventsError {
        /// The event could not be delivered.
        Delivery { message: String } =>
            "listing event delivery failed: {message}",
    }
}

/// Sink for listing events.
///
/// Delivery is best effort: callers log failures and carry on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingEvents: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: &ListingEvent) -> Result<(), ListingEventsError>;
}
