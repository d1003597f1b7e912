//! HTTP inbound adapter exposing REST endpoints.

pub mod admin_listings;
pub mod auth;
pub mod dto;
pub mod error;
pub mod health;
pub mod listings;
pub mod schemas;
pub mod state;
pub mod token_config;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

use admin_listings::{moderate_delete_listing, set_listing_featured};
use error::{json_error_handler, path_error_handler, query_error_handler};
use listings::{
    create_listing, delete_listing, get_listing_by_code, list_featured, list_listings, list_mine,
    search_listings, search_listings_by_text, update_listing, view_listing,
};

/// Register the `/api/v1` routes and extractor error handlers.
///
/// Mount inside a scope: `web::scope("/api/v1").configure(configure_api)`.
/// Static listing segments are registered ahead of `/listings/{id}` so they
/// are not captured as ids.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(list_listings)
        .service(create_listing)
        .service(list_featured)
        .service(list_mine)
        .service(search_listings)
        .service(search_listings_by_text)
        .service(get_listing_by_code)
        .service(view_listing)
        .service(update_listing)
        .service(delete_listing)
        .service(moderate_delete_listing)
        .service(set_listing_featured);
}
