//! Builders wiring listing services onto the configured storage adapters.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use marketplace::domain::ports::{
    ListingCodeSequence, ListingCommand, ListingQuery, ListingRepository,
};
use marketplace::domain::{ListingCommandService, ListingQueryService};
use marketplace::inbound::http::state::HttpState;
use marketplace::outbound::events::TracingListingEvents;
use marketplace::outbound::memory::InMemoryListingStore;
use marketplace::outbound::persistence::{DieselListingCodeSequence, DieselListingRepository};
use marketplace::outbound::token::JwtTokenVerifier;

use super::ServerConfig;

/// Command and query services sharing one repository and event sink.
fn listing_services<R, S>(
    repo: Arc<R>,
    sequence: Arc<S>,
) -> (Arc<dyn ListingCommand>, Arc<dyn ListingQuery>)
where
    R: ListingRepository + 'static,
    S: ListingCodeSequence + 'static,
{
    let events = Arc::new(TracingListingEvents);
    let command = ListingCommandService::new(
        repo.clone(),
        sequence,
        events.clone(),
        Arc::new(DefaultClock),
    );
    let query = ListingQueryService::new(repo, events);
    (Arc::new(command), Arc::new(query))
}

/// Build handler state from the server configuration.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let (listings, listings_query) = match &config.db_pool {
        Some(pool) => {
            info!("listings stored in PostgreSQL");
            listing_services(
                Arc::new(DieselListingRepository::new(pool.clone())),
                Arc::new(DieselListingCodeSequence::new(pool.clone())),
            )
        }
        None => {
            info!("no database configured; listings kept in memory");
            let store = Arc::new(InMemoryListingStore::new());
            listing_services(store.clone(), store)
        }
    };
    let tokens = Arc::new(JwtTokenVerifier::new(config.token_secret.as_bytes()));
    HttpState::new(listings, listings_query, tokens)
}
