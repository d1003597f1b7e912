//! Listing HTTP handlers.
//!
//! ```text
//! GET    /api/v1/listings
//! POST   /api/v1/listings
//! GET    /api/v1/listings/featured
//! GET    /api/v1/listings/mine
//! GET    /api/v1/listings/search
//! GET    /api/v1/listings/search/{query}
//! GET    /api/v1/listings/code/{code}
//! GET    /api/v1/listings/{id}
//! PUT    /api/v1/listings/{id}
//! DELETE /api/v1/listings/{id}
//! ```
//!
//! Fixed segments must be registered before `/listings/{id}`; see
//! [`super::configure_api`].

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::ports::{CreateListingRequest, DeleteListingRequest, UpdateListingRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{Caller, OptionalCaller};
use crate::inbound::http::dto::{
    CreateListingBody, DeletedListingBody, ListingBody, ListingCollectionBody, SearchQueryParams,
    UpdateListingBody,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_listing_id;

/// List every listing, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/listings",
    responses(
        (status = 200, description = "All listings", body = ListingCollectionBody),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "listListings",
    security([])
)]
#[get("/listings")]
pub async fn list_listings(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ListingCollectionBody>> {
    let listings = state.listings_query.list_listings().await?;
    Ok(web::Json(listings.into()))
}

/// Publish a listing owned by the caller.
///
/// The server assigns the id, the `LST` code, the slug and timestamps.
#[utoipa::path(
    post,
    path = "/api/v1/listings",
    request_body = CreateListingBody,
    responses(
        (status = 201, description = "Listing created", body = ListingBody),
        (status = 400, description = "Invalid listing", body = ErrorSchema),
        (status = 401, description = "No token provided", body = ErrorSchema),
        (status = 403, description = "Invalid token", body = ErrorSchema),
        (status = 409, description = "Code collision", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "createListing",
    security(("BearerToken" = []))
)]
#[post("/listings")]
pub async fn create_listing(
    state: web::Data<HttpState>,
    caller: Caller,
    payload: web::Json<CreateListingBody>,
) -> ApiResult<HttpResponse> {
    let listing = state
        .listings
        .create_listing(CreateListingRequest {
            principal: caller.0,
            draft: payload.into_inner().into(),
        })
        .await?;
    Ok(HttpResponse::Created().json(ListingBody::from(listing)))
}

/// List featured listings, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/listings/featured",
    responses(
        (status = 200, description = "Featured listings", body = ListingCollectionBody),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "listFeaturedListings",
    security([])
)]
#[get("/listings/featured")]
pub async fn list_featured(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ListingCollectionBody>> {
    let listings = state.listings_query.list_featured().await?;
    Ok(web::Json(listings.into()))
}

/// List the caller's own listings.
#[utoipa::path(
    get,
    path = "/api/v1/listings/mine",
    responses(
        (status = 200, description = "Caller's listings", body = ListingCollectionBody),
        (status = 401, description = "No token provided", body = ErrorSchema),
        (status = 403, description = "Invalid token", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "listMyListings",
    security(("BearerToken" = []))
)]
#[get("/listings/mine")]
pub async fn list_mine(
    state: web::Data<HttpState>,
    caller: Caller,
) -> ApiResult<web::Json<ListingCollectionBody>> {
    let listings = state.listings_query.list_owned(caller.0).await?;
    Ok(web::Json(listings.into()))
}

/// Filter listings by category and price.
#[utoipa::path(
    get,
    path = "/api/v1/listings/search",
    params(SearchQueryParams),
    responses(
        (status = 200, description = "Matching listings", body = ListingCollectionBody),
        (status = 400, description = "Invalid price range", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "searchListings",
    security([])
)]
#[get("/listings/search")]
pub async fn search_listings(
    state: web::Data<HttpState>,
    params: web::Query<SearchQueryParams>,
) -> ApiResult<web::Json<ListingCollectionBody>> {
    let criteria = params.into_inner().into_criteria(None);
    let listings = state.listings_query.search_listings(criteria).await?;
    Ok(web::Json(listings.into()))
}

/// Search listings by free text in title, description or category.
#[utoipa::path(
    get,
    path = "/api/v1/listings/search/{query}",
    params(
        ("query" = String, Path, description = "Literal text to look for"),
        SearchQueryParams
    ),
    responses(
        (status = 200, description = "Matching listings", body = ListingCollectionBody),
        (status = 400, description = "Invalid price range", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "searchListingsByText",
    security([])
)]
#[get("/listings/search/{query}")]
pub async fn search_listings_by_text(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: web::Query<SearchQueryParams>,
) -> ApiResult<web::Json<ListingCollectionBody>> {
    let criteria = params.into_inner().into_criteria(Some(path.into_inner()));
    let listings = state.listings_query.search_listings(criteria).await?;
    Ok(web::Json(listings.into()))
}

/// Fetch a listing by its public code, e.g. `LST00001`.
#[utoipa::path(
    get,
    path = "/api/v1/listings/code/{code}",
    params(("code" = String, Path, description = "Listing code", example = "LST00001")),
    responses(
        (status = 200, description = "Listing", body = ListingBody),
        (status = 400, description = "Malformed code", body = ErrorSchema),
        (status = 404, description = "Unknown code", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "getListingByCode",
    security([])
)]
#[get("/listings/code/{code}")]
pub async fn get_listing_by_code(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListingBody>> {
    let listing = state.listings_query.get_by_code(path.into_inner()).await?;
    Ok(web::Json(listing.into()))
}

/// Fetch a listing for display and count the view.
#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, format = "uuid", description = "Listing id")),
    responses(
        (status = 200, description = "Listing with updated view count", body = ListingBody),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Unknown listing", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "viewListing",
    security((), ("BearerToken" = []))
)]
#[get("/listings/{id}")]
pub async fn view_listing(
    state: web::Data<HttpState>,
    caller: OptionalCaller,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListingBody>> {
    let listing_id = parse_listing_id(&path)?;
    let listing = state
        .listings_query
        .view_listing(listing_id, caller.0)
        .await?;
    Ok(web::Json(listing.into()))
}

/// Edit one of the caller's listings.
#[utoipa::path(
    put,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, format = "uuid", description = "Listing id")),
    request_body = UpdateListingBody,
    responses(
        (status = 200, description = "Updated listing", body = ListingBody),
        (status = 400, description = "Invalid change", body = ErrorSchema),
        (status = 401, description = "No token provided", body = ErrorSchema),
        (status = 403, description = "Not the owner, or featured changed", body = ErrorSchema),
        (status = 404, description = "Unknown listing", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "updateListing",
    security(("BearerToken" = []))
)]
#[put("/listings/{id}")]
pub async fn update_listing(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<UpdateListingBody>,
) -> ApiResult<web::Json<ListingBody>> {
    let listing_id = parse_listing_id(&path)?;
    let listing = state
        .listings
        .update_listing(UpdateListingRequest {
            principal: caller.0,
            listing_id,
            patch: payload.into_inner().into(),
        })
        .await?;
    Ok(web::Json(listing.into()))
}

/// Remove one of the caller's listings.
#[utoipa::path(
    delete,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, format = "uuid", description = "Listing id")),
    responses(
        (status = 200, description = "Removed listing", body = DeletedListingBody),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "No token provided", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Unknown listing", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "deleteListing",
    security(("BearerToken" = []))
)]
#[delete("/listings/{id}")]
pub async fn delete_listing(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedListingBody>> {
    let listing_id = parse_listing_id(&path)?;
    let deleted = state
        .listings
        .delete_listing(DeleteListingRequest {
            principal: caller.0,
            listing_id,
        })
        .await?;
    Ok(web::Json(deleted.into()))
}

#[cfg(test)]
#[path = "listings_tests.rs"]
mod tests;
