//! Driving port for listing mutations.

use async_trait::async_trait;

use crate::domain::{DeletedListing, Error, Listing, ListingDraft, ListingId, ListingPatch, Principal};

/// Request to publish a new listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateListingRequest {
    pub principal: Principal,
    pub draft: ListingDraft,
}

/// Request to edit an existing listing.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateListingRequest {
    pub principal: Principal,
    pub listing_id: ListingId,
    pub patch: ListingPatch,
}

/// Request to remove a listing, either as owner or as moderator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteListingRequest {
    pub principal: Principal,
    pub listing_id: ListingId,
}

/// Request to change the featured flag of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetFeaturedRequest {
    pub principal: Principal,
    pub listing_id: ListingId,
    pub featured: bool,
}

/// Use-cases that change listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingCommand: Send + Sync {
    /// Allocate a code and store a new listing owned by the caller.
    async fn create_listing(&self, request: CreateListingRequest) -> Result<Listing, Error>;

    /// Apply an owner edit.
    async fn update_listing(&self, request: UpdateListingRequest) -> Result<Listing, Error>;

    /// Remove one of the caller's listings.
    async fn delete_listing(&self, request: DeleteListingRequest)
    -> Result<DeletedListing, Error>;

    /// Remove any listing as an administrator.
    async fn moderate_delete(
        &self,
        request: DeleteListingRequest,
    ) -> Result<DeletedListing, Error>;

    /// Feature or unfeature any listing as an administrator.
    async fn set_featured(&self, request: SetFeaturedRequest) -> Result<Listing, Error>;
}
