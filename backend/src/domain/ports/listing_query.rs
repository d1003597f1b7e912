//! Driving port for listing reads.
//!
//! All reads are public except `list_owned`. Collections come back newest
//! first.

use async_trait::async_trait;

use crate::domain::{Error, Listing, ListingId, Principal, SearchCriteria};

/// Use-cases that read listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingQuery: Send + Sync {
    /// Every listing.
    async fn list_listings(&self) -> Result<Vec<Listing>, Error>;

    /// Featured listings.
    async fn list_featured(&self) -> Result<Vec<Listing>, Error>;

    /// Listings owned by the caller.
    async fn list_owned(&self, principal: Principal) -> Result<Vec<Listing>, Error>;

    /// Listings matching `criteria`.
    async fn search_listings(&self, criteria: SearchCriteria) -> Result<Vec<Listing>, Error>;

    /// Look a listing up by its textual code; malformed codes are rejected.
    async fn get_by_code(&self, code: String) -> Result<Listing, Error>;

    /// Fetch a listing for display, counting the view.
    async fn view_listing(
        &self,
        listing_id: ListingId,
        viewer: Option<Principal>,
    ) -> Result<Listing, Error>;
}
