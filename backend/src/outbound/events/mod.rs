//! Listing event sinks.

mod tracing_listing_events;

pub use tracing_listing_events::TracingListingEvents;
