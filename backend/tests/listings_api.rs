//! End-to-end tests for the listing API over the in-memory adapters.
//!
//! Requests pass through the real middleware, extractors, services, token
//! verifier and store; only the database is replaced.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use futures_util::future::join_all;
use jsonwebtoken::{EncodingKey, Header, encode};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use uuid::Uuid;

use marketplace::Trace;
use marketplace::domain::{ListingCommandService, ListingQueryService, TRACE_ID_HEADER};
use marketplace::inbound::http::configure_api;
use marketplace::inbound::http::state::HttpState;
use marketplace::outbound::events::TracingListingEvents;
use marketplace::outbound::memory::InMemoryListingStore;
use marketplace::outbound::token::JwtTokenVerifier;

const SECRET: &[u8] = b"integration-secret-with-32-bytes!";

struct Identity {
    id: Uuid,
    token: String,
}

fn identity(role: Option<&str>) -> Identity {
    let id = Uuid::new_v4();
    let mut claims = json!({ "id": id.to_string() });
    if let Some(role) = role {
        claims["role"] = json!(role);
    }
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET))
        .expect("token encodes");
    Identity { id, token }
}

#[fixture]
fn alice() -> Identity {
    identity(None)
}

#[fixture]
fn bob() -> Identity {
    identity(Some("customer"))
}

#[fixture]
fn admin() -> Identity {
    identity(Some("admin"))
}

fn http_state() -> HttpState {
    let store = Arc::new(InMemoryListingStore::new());
    let events = Arc::new(TracingListingEvents);
    HttpState::new(
        Arc::new(ListingCommandService::new(
            store.clone(),
            store.clone(),
            events.clone(),
            Arc::new(DefaultClock),
        )),
        Arc::new(ListingQueryService::new(store, events)),
        Arc::new(JwtTokenVerifier::new(SECRET)),
    )
}

async fn init_app()
-> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(http_state()))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure_api)),
    )
    .await
}

async fn send<S>(app: &S, req: TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn authed(req: TestRequest, who: &Identity) -> TestRequest {
    req.insert_header(("Authorization", format!("Bearer {}", who.token)))
}

fn draft(title: &str, category: &str, price: f64) -> Value {
    json!({
        "title": title,
        "description": format!("{title} in good condition"),
        "price": price,
        "category": category,
        "images": ["https://img.example/1.jpg"],
        "country": "Sri Lanka"
    })
}

async fn create<S>(app: &S, who: &Identity, body: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let (status, listing) = send(
        app,
        authed(TestRequest::post().uri("/api/v1/listings"), who).set_json(body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {listing}");
    listing
}

#[rstest]
#[actix_web::test]
async fn codes_are_sequential_and_slugs_follow(alice: Identity) {
    let app = init_app().await;

    let first = create(&app, &alice, draft("Road Bike", "Hobbies", 1200.0)).await;
    let second = create(&app, &alice, draft("Oak Desk", "Home & Living", 800.0)).await;

    assert_eq!(first["code"], "LST00001");
    assert_eq!(second["code"], "LST00002");
    assert_eq!(first["slug"], "road-bike-lst00001");
    assert_eq!(first["owner"], alice.id.to_string());
    assert_eq!(first["currency"], "LKR");
    assert_eq!(first["featured"], false);
}

#[rstest]
#[actix_web::test]
async fn invalid_drafts_do_not_consume_codes(alice: Identity) {
    let app = init_app().await;

    let (status, body) = send(
        &app,
        authed(TestRequest::post().uri("/api/v1/listings"), &alice)
            .set_json(draft("Lamp", "Spaceships", 10.0)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "category");

    let created = create(&app, &alice, draft("Lamp", "Home & Living", 10.0)).await;
    assert_eq!(created["code"], "LST00001");
}

#[rstest]
#[actix_web::test]
async fn anonymous_and_forged_callers_are_rejected() {
    let app = init_app().await;

    let (anonymous, _) = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/listings")
            .set_json(draft("Kayak", "Hobbies", 300.0)),
    )
    .await;
    let (forged, body) = send(
        &app,
        TestRequest::post()
            .uri("/api/v1/listings")
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .set_json(draft("Kayak", "Hobbies", 300.0)),
    )
    .await;

    assert_eq!(anonymous, StatusCode::UNAUTHORIZED);
    assert_eq!(forged, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Invalid token.");
}

#[rstest]
#[actix_web::test]
async fn only_owner_may_edit_and_never_featured(alice: Identity, bob: Identity) {
    let app = init_app().await;
    let listing = create(&app, &alice, draft("Guitar", "Hobbies", 500.0)).await;
    let uri = format!("/api/v1/listings/{}", listing["id"].as_str().expect("id"));

    let (by_bob, _) = send(
        &app,
        authed(TestRequest::put().uri(&uri), &bob).set_json(json!({"price": 1.0})),
    )
    .await;
    let (feature_self, _) = send(
        &app,
        authed(TestRequest::put().uri(&uri), &alice).set_json(json!({"featured": true})),
    )
    .await;
    let (edited, body) = send(
        &app,
        authed(TestRequest::put().uri(&uri), &alice)
            .set_json(json!({"title": "Electric Guitar", "featured": false})),
    )
    .await;

    assert_eq!(by_bob, StatusCode::FORBIDDEN);
    assert_eq!(feature_self, StatusCode::FORBIDDEN);
    assert_eq!(edited, StatusCode::OK);
    assert_eq!(body["slug"], "electric-guitar-lst00001");
    assert_eq!(body["code"], "LST00001");
}

#[rstest]
#[actix_web::test]
async fn admin_features_and_featured_list_follows(alice: Identity, admin: Identity) {
    let app = init_app().await;
    let listing = create(&app, &alice, draft("Camera", "Hobbies", 900.0)).await;
    create(&app, &alice, draft("Tripod", "Hobbies", 90.0)).await;
    let uri = format!(
        "/api/v1/admin/listings/{}/featured",
        listing["id"].as_str().expect("id")
    );

    let (by_owner, _) = send(
        &app,
        authed(TestRequest::put().uri(&uri), &alice).set_json(json!({"featured": true})),
    )
    .await;
    let (by_admin, body) = send(
        &app,
        authed(TestRequest::put().uri(&uri), &admin).set_json(json!({"featured": true})),
    )
    .await;
    let (_, featured) = send(&app, TestRequest::get().uri("/api/v1/listings/featured")).await;

    assert_eq!(by_owner, StatusCode::FORBIDDEN);
    assert_eq!(by_admin, StatusCode::OK);
    assert_eq!(body["featured"], true);
    assert_eq!(featured["count"], 1);
    assert_eq!(featured["listings"][0]["code"], "LST00001");
}

#[rstest]
#[actix_web::test]
async fn search_matches_text_category_and_price(alice: Identity) {
    let app = init_app().await;
    create(&app, &alice, draft("Red bicycle", "Hobbies", 150.0)).await;
    create(&app, &alice, draft("Blue bicycle", "Hobbies", 450.0)).await;
    create(&app, &alice, draft("Sofa", "Home & Living", 300.0)).await;

    let (_, by_text) = send(
        &app,
        TestRequest::get().uri("/api/v1/listings/search/BICYCLE?maxPrice=200"),
    )
    .await;
    let (_, by_category) = send(
        &app,
        TestRequest::get().uri("/api/v1/listings/search?category=home"),
    )
    .await;
    let (inverted, body) = send(
        &app,
        TestRequest::get().uri("/api/v1/listings/search?minPrice=500&maxPrice=100"),
    )
    .await;

    assert_eq!(by_text["count"], 1);
    assert_eq!(by_text["listings"][0]["title"], "Red bicycle");
    assert_eq!(by_category["count"], 1);
    assert_eq!(by_category["listings"][0]["title"], "Sofa");
    assert_eq!(inverted, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_range");
}

#[rstest]
#[actix_web::test]
async fn views_increment_and_code_lookup_does_not(alice: Identity) {
    let app = init_app().await;
    let listing = create(&app, &alice, draft("Drone", "Hobbies", 700.0)).await;
    let uri = format!("/api/v1/listings/{}", listing["id"].as_str().expect("id"));

    send(&app, TestRequest::get().uri(&uri)).await;
    let (status, body) = send(&app, TestRequest::get().uri(&uri)).await;
    let (_, by_code) = send(&app, TestRequest::get().uri("/api/v1/listings/code/LST00001")).await;
    let (malformed, _) = send(&app, TestRequest::get().uri("/api/v1/listings/code/LST1")).await;
    let (missing, _) = send(&app, TestRequest::get().uri("/api/v1/listings/code/LST00042")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["views"], 2);
    assert_eq!(by_code["views"], 2);
    assert_eq!(malformed, StatusCode::BAD_REQUEST);
    assert_eq!(missing, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn deleted_codes_are_never_reused(alice: Identity, admin: Identity) {
    let app = init_app().await;
    create(&app, &alice, draft("Chair", "Home & Living", 40.0)).await;
    let second = create(&app, &alice, draft("Table", "Home & Living", 90.0)).await;
    let id = second["id"].as_str().expect("id");

    let (by_admin_as_owner, _) = send(
        &app,
        authed(TestRequest::delete().uri(&format!("/api/v1/listings/{id}")), &admin),
    )
    .await;
    let (deleted, summary) = send(
        &app,
        authed(TestRequest::delete().uri(&format!("/api/v1/listings/{id}")), &alice),
    )
    .await;
    let third = create(&app, &alice, draft("Shelf", "Home & Living", 60.0)).await;

    assert_eq!(by_admin_as_owner, StatusCode::FORBIDDEN);
    assert_eq!(deleted, StatusCode::OK);
    assert_eq!(
        summary,
        json!({"id": id, "code": "LST00002", "title": "Table"})
    );
    assert_eq!(third["code"], "LST00003");
}

#[rstest]
#[actix_web::test]
async fn moderation_removes_any_listing(alice: Identity, bob: Identity, admin: Identity) {
    let app = init_app().await;
    let listing = create(&app, &alice, draft("Scooter", "Vehicles", 2500.0)).await;
    let uri = format!(
        "/api/v1/admin/listings/{}",
        listing["id"].as_str().expect("id")
    );

    let (by_customer, _) = send(&app, authed(TestRequest::delete().uri(&uri), &bob)).await;
    let (by_admin, _) = send(&app, authed(TestRequest::delete().uri(&uri), &admin)).await;
    let (again, _) = send(&app, authed(TestRequest::delete().uri(&uri), &admin)).await;

    assert_eq!(by_customer, StatusCode::FORBIDDEN);
    assert_eq!(by_admin, StatusCode::OK);
    assert_eq!(again, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn mine_lists_only_callers_listings(alice: Identity, bob: Identity) {
    let app = init_app().await;
    create(&app, &alice, draft("Skates", "Hobbies", 80.0)).await;
    create(&app, &bob, draft("Helmet", "Hobbies", 30.0)).await;

    let (_, mine) = send(
        &app,
        authed(TestRequest::get().uri("/api/v1/listings/mine"), &bob),
    )
    .await;
    let (_, all) = send(&app, TestRequest::get().uri("/api/v1/listings")).await;

    assert_eq!(mine["count"], 1);
    assert_eq!(mine["listings"][0]["title"], "Helmet");
    assert_eq!(all["count"], 2);
    assert_eq!(all["listings"][0]["code"], "LST00002");
}

#[rstest]
#[actix_web::test]
async fn concurrent_creates_receive_distinct_codes(alice: Identity) {
    let app = init_app().await;
    let requests = (0..16).map(|n| {
        test::call_service(
            &app,
            authed(TestRequest::post().uri("/api/v1/listings"), &alice)
                .set_json(draft(&format!("Item {n}"), "Essentials", 10.0))
                .to_request(),
        )
    });

    let mut codes = Vec::new();
    for res in join_all(requests).await {
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        codes.push(body["code"].as_str().expect("code").to_owned());
    }
    codes.sort();
    codes.dedup();

    assert_eq!(codes.len(), 16);
    assert_eq!(codes.first().map(String::as_str), Some("LST00001"));
    assert_eq!(codes.last().map(String::as_str), Some("LST00016"));
}

#[rstest]
#[actix_web::test]
async fn errors_echo_trace_id() {
    let app = init_app().await;

    let res = test::call_service(
        &app,
        TestRequest::get()
            .uri("/api/v1/listings/not-a-uuid")
            .to_request(),
    )
    .await;
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(res).await;

    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "invalid_uuid");
    assert_eq!(body["traceId"], header);
}
