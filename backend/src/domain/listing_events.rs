//! Domain events emitted by the listing lifecycle.
//!
//! Events are transport agnostic; analytics or notification consumers sit
//! behind the [`ListingEvents`](crate::domain::ports::ListingEvents) port.

use crate::domain::{Listing, ListingCode, ListingId, TraceId, UserId};

/// What happened to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingEventKind {
    Created,
    Updated,
    Deleted,
    Viewed,
}

impl ListingEventKind {
    /// Stable name used in logs and payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "listing.created",
            Self::Updated => "listing.updated",
            Self::Deleted => "listing.deleted",
            Self::Viewed => "listing.viewed",
        }
    }
}

/// Event describing a listing change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEvent {
    /// Kind of change.
    pub kind: ListingEventKind,
    /// Listing storage key.
    pub listing_id: ListingId,
    /// Listing code.
    pub code: ListingCode,
    /// Owner of the listing.
    pub owner: UserId,
    /// Caller who triggered the change, absent for anonymous views.
    pub actor: Option<UserId>,
    /// View count after the change.
    pub views: u64,
    /// Correlation identifier of the triggering request.
    pub trace_id: Option<TraceId>,
}

impl ListingEvent {
    /// Build an event for `listing`, capturing the trace identifier in scope.
    #[must_use]
    pub fn new(kind: ListingEventKind, listing: &Listing, actor: Option<UserId>) -> Self {
        Self {
            kind,
            listing_id: listing.id(),
            code: listing.code(),
            owner: *listing.owner(),
            actor,
            views: listing.views(),
            trace_id: TraceId::current(),
        }
    }
}
