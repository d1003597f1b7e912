//! Port for listing persistence.

use async_trait::async_trait;

use crate::domain::{Listing, ListingCode, ListingFilter, ListingId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by listing repository adapters.
    pub enum ListingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "listing repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "listing repository query failed: {message}",
        /// Another listing already holds the code.
        DuplicateCode { code: String } =>
            "listing code {code} is already in use",
    }
}

/// Port for reading and writing listings.
///
/// `list` returns listings newest first: `created_at` descending, ties broken
/// by code descending.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Store a new listing.
    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError>;

    /// Find a listing by storage key.
    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError>;

    /// Find a listing by its code.
    async fn find_by_code(
        &self,
        code: &ListingCode,
    ) -> Result<Option<Listing>, ListingRepositoryError>;

    /// List listings satisfying `filter`, newest first.
    async fn list(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ListingRepositoryError>;

    /// Overwrite the mutable fields of an existing listing.
    ///
    /// Returns `false` when the listing no longer exists.
    async fn update(&self, listing: &Listing) -> Result<bool, ListingRepositoryError>;

    /// Remove a listing. Returns `false` when it did not exist.
    async fn delete(&self, id: &ListingId) -> Result<bool, ListingRepositoryError>;

    /// Atomically add one view and return the updated listing.
    async fn increment_views(
        &self,
        id: &ListingId,
    ) -> Result<Option<Listing>, ListingRepositoryError>;
}
