//! Moderation endpoints, restricted to administrators.
//!
//! ```text
//! DELETE /api/v1/admin/listings/{id}
//! PUT    /api/v1/admin/listings/{id}/featured
//! ```
//!
//! Role checks happen in the domain so a customer token yields 403 rather
//! than a missing route.

use actix_web::{delete, put, web};

use crate::domain::ports::{DeleteListingRequest, SetFeaturedRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Caller;
use crate::inbound::http::dto::{DeletedListingBody, ListingBody, SetFeaturedBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_listing_id;

/// Remove any listing.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/listings/{id}",
    params(("id" = String, Path, format = "uuid", description = "Listing id")),
    responses(
        (status = 200, description = "Removed listing", body = DeletedListingBody),
        (status = 401, description = "No token provided", body = ErrorSchema),
        (status = 403, description = "Caller is not an administrator", body = ErrorSchema),
        (status = 404, description = "Unknown listing", body = ErrorSchema)
    ),
    tags = ["moderation"],
    operation_id = "moderateDeleteListing",
    security(("BearerToken" = []))
)]
#[delete("/admin/listings/{id}")]
pub async fn moderate_delete_listing(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedListingBody>> {
    let listing_id = parse_listing_id(&path)?;
    let deleted = state
        .listings
        .moderate_delete(DeleteListingRequest {
            principal: caller.0,
            listing_id,
        })
        .await?;
    Ok(web::Json(deleted.into()))
}

/// Feature or unfeature any listing.
#[utoipa::path(
    put,
    path = "/api/v1/admin/listings/{id}/featured",
    params(("id" = String, Path, format = "uuid", description = "Listing id")),
    request_body = SetFeaturedBody,
    responses(
        (status = 200, description = "Updated listing", body = ListingBody),
        (status = 401, description = "No token provided", body = ErrorSchema),
        (status = 403, description = "Caller is not an administrator", body = ErrorSchema),
        (status = 404, description = "Unknown listing", body = ErrorSchema)
    ),
    tags = ["moderation"],
    operation_id = "setListingFeatured",
    security(("BearerToken" = []))
)]
#[put("/admin/listings/{id}/featured")]
pub async fn set_listing_featured(
    state: web::Data<HttpState>,
    caller: Caller,
    path: web::Path<String>,
    payload: web::Json<SetFeaturedBody>,
) -> ApiResult<web::Json<ListingBody>> {
    let listing_id = parse_listing_id(&path)?;
    let listing = state
        .listings
        .set_featured(SetFeaturedRequest {
            principal: caller.0,
            listing_id,
            featured: payload.featured,
        })
        .await?;
    Ok(web::Json(listing.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{MockListingCommand, MockListingQuery, MockTokenVerifier};
    use crate::domain::{Error, ListingId, Principal, Role, UserId};

    const LISTING_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn state(role: Role, commands: MockListingCommand) -> HttpState {
        let mut tokens = MockTokenVerifier::new();
        tokens
            .expect_verify()
            .returning(move |_| Ok(Principal::new(UserId::random(), role)));
        HttpState::new(
            Arc::new(commands),
            Arc::new(MockListingQuery::new()),
            Arc::new(tokens),
        )
    }

    async fn send(state: HttpState, req: actix_test::TestRequest) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(moderate_delete_listing)
                .service(set_listing_featured),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            req.insert_header(("Authorization", "Bearer token")).to_request(),
        )
        .await;
        let status = res.status();
        let body = actix_test::read_body(res).await;
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    #[rstest]
    #[actix_web::test]
    async fn customer_cannot_feature() {
        let mut commands = MockListingCommand::new();
        commands
            .expect_set_featured()
            .times(1)
            .returning(|_| Err(Error::forbidden("administrator role required")));

        let (status, body) = send(
            state(Role::Customer, commands),
            actix_test::TestRequest::put()
                .uri(&format!("/admin/listings/{LISTING_ID}/featured"))
                .set_json(json!({"featured": true})),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "forbidden");
    }

    #[rstest]
    #[actix_web::test]
    async fn moderation_delete_passes_parsed_id() {
        let id = ListingId::from_uuid(uuid::Uuid::parse_str(LISTING_ID).expect("uuid"));
        let mut commands = MockListingCommand::new();
        commands
            .expect_moderate_delete()
            .withf(move |request| request.listing_id == id)
            .times(1)
            .returning(|_| Err(Error::not_found("listing not found")));

        let (status, _) = send(
            state(Role::Admin, commands),
            actix_test::TestRequest::delete().uri(&format!("/admin/listings/{LISTING_ID}")),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_id_never_reaches_domain() {
        let mut commands = MockListingCommand::new();
        commands.expect_moderate_delete().never();

        let (status, body) = send(
            state(Role::Admin, commands),
            actix_test::TestRequest::delete().uri("/admin/listings/LST00001"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["code"], "invalid_uuid");
    }

    #[rstest]
    #[actix_web::test]
    async fn featured_flag_is_forwarded() {
        let mut commands = MockListingCommand::new();
        commands
            .expect_set_featured()
            .withf(|request| !request.featured)
            .times(1)
            .returning(|_| Err(Error::not_found("listing not found")));

        let (status, _) = send(
            state(Role::Admin, commands),
            actix_test::TestRequest::put()
                .uri(&format!("/admin/listings/{LISTING_ID}/featured"))
                .set_json(json!({"featured": false})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
