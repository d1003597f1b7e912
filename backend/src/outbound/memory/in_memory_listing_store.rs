//! In-memory listing store implementing both the repository and the code
//! sequence ports.
//!
//! A single mutex guards listings and the code counter so allocation and
//! inserts observe one consistent state. The counter only moves forward:
//! deleting the newest listing never frees its code.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    ListingCodeSequence, ListingCodeSequenceError, ListingRepository, ListingRepositoryError,
};
use crate::domain::{Listing, ListingCode, ListingFilter, ListingId};

#[derive(Debug, Default)]
struct StoreState {
    listings: HashMap<ListingId, Listing>,
    last_code: Option<ListingCode>,
}

impl StoreState {
    fn observe_code(&mut self, code: ListingCode) {
        if self.last_code.is_none_or(|last| code > last) {
            self.last_code = Some(code);
        }
    }
}

/// Listing storage held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryListingStore {
    state: Mutex<StoreState>,
}

impl InMemoryListingStore {
    /// Create an empty store whose first allocated code is `LST00001`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `listings`; allocation resumes after the
    /// highest code present.
    pub fn with_listings(listings: impl IntoIterator<Item = Listing>) -> Self {
        let mut state = StoreState::default();
        for listing in listings {
            state.observe_code(listing.code());
            state.listings.insert(listing.id(), listing);
        }
        Self {
            state: Mutex::new(state),
        }
    }
}

#[async_trait]
impl ListingCodeSequence for InMemoryListingStore {
    async fn next_code(&self) -> Result<ListingCode, ListingCodeSequenceError> {
        let mut state = self.state.lock().await;
        let next = match state.last_code {
            None => ListingCode::first(),
            Some(last) => last
                .next()
                .map_err(|_| ListingCodeSequenceError::exhausted())?,
        };
        state.last_code = Some(next);
        Ok(next)
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingStore {
    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        let mut state = self.state.lock().await;
        if state
            .listings
            .values()
            .any(|existing| existing.code() == listing.code())
        {
            return Err(ListingRepositoryError::duplicate_code(
                listing.code().to_string(),
            ));
        }
        state.observe_code(listing.code());
        state.listings.insert(listing.id(), listing.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        Ok(self.state.lock().await.listings.get(id).cloned())
    }

    async fn find_by_code(
        &self,
        code: &ListingCode,
    ) -> Result<Option<Listing>, ListingRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .listings
            .values()
            .find(|listing| listing.code() == *code)
            .cloned())
    }

    async fn list(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ListingRepositoryError> {
        let state = self.state.lock().await;
        let mut matching: Vec<Listing> = state
            .listings
            .values()
            .filter(|listing| filter.matches(listing))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.code().cmp(&a.code()))
        });
        Ok(matching)
    }

    async fn update(&self, listing: &Listing) -> Result<bool, ListingRepositoryError> {
        let mut state = self.state.lock().await;
        let Some(stored) = state.listings.get_mut(&listing.id()) else {
            return Ok(false);
        };
        // Views are owned by `increment_views`; keep the stored count.
        let mut record = listing.record().clone();
        record.views = stored.views();
        *stored = Listing::from(record);
        Ok(true)
    }

    async fn delete(&self, id: &ListingId) -> Result<bool, ListingRepositoryError> {
        Ok(self.state.lock().await.listings.remove(id).is_some())
    }

    async fn increment_views(
        &self,
        id: &ListingId,
    ) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut state = self.state.lock().await;
        Ok(state.listings.get_mut(id).map(|listing| {
            listing.record_view();
            listing.clone()
        }))
    }
}
