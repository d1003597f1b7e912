//! Domain primitives and aggregates.
//!
//! Purpose: hold the marketplace rules (listing validation, code allocation,
//! ownership policy and search) independent of HTTP and storage. Value types
//! validate on construction so adapters only ever see well-formed listings.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Listing and its value types: the classified advert aggregate.
//! - ListingCode: the public `LST00001` identifier.
//! - Principal: the verified caller a request acts for.
//! - ListingCommandService / ListingQueryService: driving port
//!   implementations.

pub mod auth;
pub mod error;
pub mod listing;
pub mod listing_code;
pub mod listing_events;
pub mod listing_policy;
mod listing_service;
pub mod ports;
pub mod search;
pub mod slug;
pub mod trace_id;
pub mod user;

pub use self::auth::{ADMIN_ROLE, Principal, Role};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listing::{
    BADGE_MAX, COUNTRY_MAX, Country, CurrencyCode, DEFAULT_CURRENCY, DESCRIPTION_MAX,
    DeletedListing, IMAGES_MAX, ImageUrl, Listing, ListingBadge, ListingCategory,
    ListingDescription, ListingDraft, ListingId, ListingPatch, ListingRecord, ListingTitle,
    ListingValidationError, Price, TITLE_MAX, UnknownCategoryError, ValidListingDraft,
    parse_images,
};
pub use self::listing_code::{
    LISTING_CODE_MIN_DIGITS, LISTING_CODE_PREFIX, ListingCode, ListingCodeError,
};
pub use self::listing_events::{ListingEvent, ListingEventKind};
pub use self::listing_policy::{ListingAction, PolicyDenial, authorize};
pub use self::listing_service::{ListingCommandService, ListingQueryService};
pub use self::search::{ListingFilter, SearchCriteria, SearchValidationError};
pub use self::slug::{ListingSlug, ListingSlugError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use marketplace::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
