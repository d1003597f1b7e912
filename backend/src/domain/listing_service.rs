//! Listing domain services.
//!
//! These services implement the listing driving ports: the command service
//! allocates codes and enforces ownership, the query service serves public
//! reads and counts views.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    CreateListingRequest, DeleteListingRequest, ListingCodeSequence, ListingCodeSequenceError,
    ListingCommand, ListingEvents, ListingQuery, ListingRepository, ListingRepositoryError,
    SetFeaturedRequest, UpdateListingRequest,
};
use crate::domain::{
    DeletedListing, Error, Listing, ListingAction, ListingCode, ListingEvent, ListingEventKind,
    ListingFilter, ListingId, ListingValidationError, Principal, SearchCriteria,
    SearchValidationError, authorize,
};

fn map_repository_error(error: ListingRepositoryError) -> Error {
    match error {
        ListingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("listing repository unavailable: {message}"))
        }
        ListingRepositoryError::Query { message } => {
            Error::internal(format!("listing repository error: {message}"))
        }
        ListingRepositoryError::DuplicateCode { code } => {
            Error::conflict(format!("listing code {code} is already in use"))
        }
    }
}

fn map_sequence_error(error: ListingCodeSequenceError) -> Error {
    match error {
        ListingCodeSequenceError::Connection { message } => {
            Error::service_unavailable(format!("listing code sequence unavailable: {message}"))
        }
        ListingCodeSequenceError::Query { message } => {
            Error::internal(format!("listing code sequence error: {message}"))
        }
        ListingCodeSequenceError::Exhausted => Error::internal("listing code sequence exhausted"),
    }
}

fn map_validation_error(error: ListingValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

fn map_search_error(error: SearchValidationError) -> Error {
    let code = match error {
        SearchValidationError::NonFiniteBound { .. } => "invalid_number",
        SearchValidationError::InvertedRange { .. } => "invalid_range",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": code,
    }))
}

fn listing_not_found(id: &ListingId) -> Error {
    Error::not_found(format!("listing {id} not found"))
}

async fn publish<E>(events: &E, event: ListingEvent)
where
    E: ListingEvents + ?Sized,
{
    if let Err(error) = events.publish(&event).await {
        warn!(
            %error,
            kind = event.kind.as_str(),
            code = %event.code,
            listing_id = %event.listing_id,
            "listing event delivery failed"
        );
    }
}

/// Listing service implementing the command driving port.
#[derive(Clone)]
pub struct ListingCommandService<R, S, E> {
    listing_repo: Arc<R>,
    code_sequence: Arc<S>,
    events: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<R, S, E> ListingCommandService<R, S, E> {
    /// Create a new command service.
    pub fn new(
        listing_repo: Arc<R>,
        code_sequence: Arc<S>,
        events: Arc<E>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            listing_repo,
            code_sequence,
            events,
            clock,
        }
    }
}

impl<R, S, E> ListingCommandService<R, S, E>
where
    R: ListingRepository,
    S: ListingCodeSequence,
    E: ListingEvents,
{
    async fn load(&self, id: &ListingId) -> Result<Listing, Error> {
        self.listing_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| listing_not_found(id))
    }

    async fn store_update(&self, listing: &Listing) -> Result<(), Error> {
        let found = self
            .listing_repo
            .update(listing)
            .await
            .map_err(map_repository_error)?;
        if found {
            Ok(())
        } else {
            Err(listing_not_found(&listing.id()))
        }
    }

    async fn remove(
        &self,
        principal: Principal,
        listing_id: ListingId,
        action: ListingAction,
    ) -> Result<DeletedListing, Error> {
        let listing = self.load(&listing_id).await?;
        authorize(&principal, action, &listing)?;

        let removed = self
            .listing_repo
            .delete(&listing_id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(listing_not_found(&listing_id));
        }

        info!(
            code = %listing.code(),
            listing_id = %listing_id,
            actor = %principal.id(),
            moderated = matches!(action, ListingAction::ModerateDelete),
            "listing deleted"
        );
        publish(
            self.events.as_ref(),
            ListingEvent::new(ListingEventKind::Deleted, &listing, Some(*principal.id())),
        )
        .await;
        Ok(listing.deleted_summary())
    }
}

#[async_trait]
impl<R, S, E> ListingCommand for ListingCommandService<R, S, E>
where
    R: ListingRepository,
    S: ListingCodeSequence,
    E: ListingEvents,
{
    async fn create_listing(&self, request: CreateListingRequest) -> Result<Listing, Error> {
        let CreateListingRequest { principal, draft } = request;
        let draft = draft.validate().map_err(map_validation_error)?;

        let code = self
            .code_sequence
            .next_code()
            .await
            .map_err(map_sequence_error)?;
        let listing = Listing::create(
            ListingId::random(),
            code,
            *principal.id(),
            draft,
            self.clock.utc(),
        );

        self.listing_repo
            .insert(&listing)
            .await
            .map_err(map_repository_error)?;

        info!(
            code = %listing.code(),
            listing_id = %listing.id(),
            owner = %principal.id(),
            "listing created"
        );
        publish(
            self.events.as_ref(),
            ListingEvent::new(ListingEventKind::Created, &listing, Some(*principal.id())),
        )
        .await;
        Ok(listing)
    }

    async fn update_listing(&self, request: UpdateListingRequest) -> Result<Listing, Error> {
        let UpdateListingRequest {
            principal,
            listing_id,
            patch,
        } = request;
        let listing = self.load(&listing_id).await?;
        authorize(
            &principal,
            ListingAction::Update {
                changes_featured: patch.changes_featured(&listing),
            },
            &listing,
        )?;

        let updated = listing
            .patched(patch, self.clock.utc())
            .map_err(map_validation_error)?;
        self.store_update(&updated).await?;

        publish(
            self.events.as_ref(),
            ListingEvent::new(ListingEventKind::Updated, &updated, Some(*principal.id())),
        )
        .await;
        Ok(updated)
    }

    async fn delete_listing(&self, request: DeleteListingRequest) -> Result<DeletedListing, Error> {
        self.remove(request.principal, request.listing_id, ListingAction::Delete)
            .await
    }

    async fn moderate_delete(
        &self,
        request: DeleteListingRequest,
    ) -> Result<DeletedListing, Error> {
        self.remove(
            request.principal,
            request.listing_id,
            ListingAction::ModerateDelete,
        )
        .await
    }

    async fn set_featured(&self, request: SetFeaturedRequest) -> Result<Listing, Error> {
        let SetFeaturedRequest {
            principal,
            listing_id,
            featured,
        } = request;
        let listing = self.load(&listing_id).await?;
        authorize(&principal, ListingAction::SetFeatured, &listing)?;

        let updated = listing.with_featured(featured, self.clock.utc());
        self.store_update(&updated).await?;

        info!(
            code = %updated.code(),
            listing_id = %listing_id,
            featured,
            "listing featured flag changed"
        );
        publish(
            self.events.as_ref(),
            ListingEvent::new(ListingEventKind::Updated, &updated, Some(*principal.id())),
        )
        .await;
        Ok(updated)
    }
}

/// Listing service implementing the query driving port.
#[derive(Clone)]
pub struct ListingQueryService<R, E> {
    listing_repo: Arc<R>,
    events: Arc<E>,
}

impl<R, E> ListingQueryService<R, E> {
    /// Create a new query service.
    pub fn new(listing_repo: Arc<R>, events: Arc<E>) -> Self {
        Self {
            listing_repo,
            events,
        }
    }
}

impl<R, E> ListingQueryService<R, E>
where
    R: ListingRepository,
{
    async fn list(&self, filter: ListingFilter) -> Result<Vec<Listing>, Error> {
        self.listing_repo
            .list(&filter)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R, E> ListingQuery for ListingQueryService<R, E>
where
    R: ListingRepository,
    E: ListingEvents,
{
    async fn list_listings(&self) -> Result<Vec<Listing>, Error> {
        self.list(ListingFilter::all()).await
    }

    async fn list_featured(&self) -> Result<Vec<Listing>, Error> {
        self.list(ListingFilter::featured()).await
    }

    async fn list_owned(&self, principal: Principal) -> Result<Vec<Listing>, Error> {
        self.list(ListingFilter::owned_by(*principal.id())).await
    }

    async fn search_listings(&self, criteria: SearchCriteria) -> Result<Vec<Listing>, Error> {
        let filter = ListingFilter::try_from(criteria).map_err(map_search_error)?;
        self.list(filter).await
    }

    async fn get_by_code(&self, code: String) -> Result<Listing, Error> {
        let parsed = ListingCode::parse(&code).map_err(|err| {
            Error::invalid_request(format!("invalid listing code: {err}")).with_details(json!({
                "field": "code",
                "value": code,
                "code": "invalid_listing_code",
            }))
        })?;

        self.listing_repo
            .find_by_code(&parsed)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("listing {parsed} not found")))
    }

    async fn view_listing(
        &self,
        listing_id: ListingId,
        viewer: Option<Principal>,
    ) -> Result<Listing, Error> {
        let listing = self
            .listing_repo
            .increment_views(&listing_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| listing_not_found(&listing_id))?;

        publish(
            self.events.as_ref(),
            ListingEvent::new(
                ListingEventKind::Viewed,
                &listing,
                viewer.map(|principal| *principal.id()),
            ),
        )
        .await;
        Ok(listing)
    }
}

#[cfg(test)]
#[path = "listing_service_tests.rs"]
mod tests;
