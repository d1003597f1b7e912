//! Event sink that records listing events as structured log lines.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ListingEvent;
use crate::domain::ports::{ListingEvents, ListingEventsError};

/// Emits every listing event on the `marketplace::events` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListingEvents;

#[async_trait]
impl ListingEvents for TracingListingEvents {
    async fn publish(&self, event: &ListingEvent) -> Result<(), ListingEventsError> {
        info!(
            target: "marketplace::events",
            event = event.kind.as_str(),
            listing_id = %event.listing_id,
            code = %event.code,
            owner = %event.owner,
            actor = event.actor.map(|actor| actor.to_string()),
            views = event.views,
            trace_id = event.trace_id.map(|id| id.to_string()),
            "listing event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{Listing, ListingCode, ListingDraft, ListingEventKind, ListingId, UserId};

    #[tokio::test]
    async fn publish_never_fails() {
        let listing = Listing::create(
            ListingId::random(),
            ListingCode::first(),
            UserId::random(),
            ListingDraft {
                title: "Camera".to_owned(),
                description: "Mirrorless body".to_owned(),
                price: 150_000.0,
                currency: None,
                category: "Hobbies".to_owned(),
                images: vec![],
                country: "Sri Lanka".to_owned(),
                urgent: false,
                badge: None,
            }
            .validate()
            .expect("valid draft"),
            Utc::now(),
        );
        let event = ListingEvent::new(ListingEventKind::Created, &listing, None);
        assert!(TracingListingEvents.publish(&event).await.is_ok());
    }
}
