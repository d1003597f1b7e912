//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every listing, moderation and probe endpoint plus the
//! bearer token security scheme. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::dto::{
    CreateListingBody, DeletedListingBody, ListingBody, ListingCollectionBody, SetFeaturedBody,
    UpdateListingBody,
};
use crate::inbound::http::health::ProbeBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let bearer = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("HS256 token carrying `id` and `role` claims."))
            .build();
        components.add_security_scheme("BearerToken", SecurityScheme::Http(bearer));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Marketplace listings API",
        description = "Classified listings with server-assigned LST codes, owner edits and moderation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::listings::list_listings,
        crate::inbound::http::listings::create_listing,
        crate::inbound::http::listings::list_featured,
        crate::inbound::http::listings::list_mine,
        crate::inbound::http::listings::search_listings,
        crate::inbound::http::listings::search_listings_by_text,
        crate::inbound::http::listings::get_listing_by_code,
        crate::inbound::http::listings::view_listing,
        crate::inbound::http::listings::update_listing,
        crate::inbound::http::listings::delete_listing,
        crate::inbound::http::admin_listings::moderate_delete_listing,
        crate::inbound::http::admin_listings::set_listing_featured,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ListingBody,
        ListingCollectionBody,
        CreateListingBody,
        UpdateListingBody,
        DeletedListingBody,
        SetFeaturedBody,
        ProbeBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "listings", description = "Browse, publish and edit listings"),
        (name = "moderation", description = "Administrator-only listing controls"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn object_fields(schema: &RefOr<Schema>) -> Vec<String> {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_is_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_fields(schemas.get(ERROR_SCHEMA_NAME).expect("Error schema"));

        assert!(fields.contains(&"code".to_owned()));
        assert!(fields.contains(&"traceId".to_owned()));
    }

    #[rstest]
    fn listing_schema_exposes_code_and_views() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_fields(schemas.get("ListingBody").expect("ListingBody schema"));

        for field in ["code", "slug", "views", "createdAt", "owner"] {
            assert!(fields.contains(&field.to_owned()), "missing {field}");
        }
    }

    #[rstest]
    #[case("/api/v1/listings")]
    #[case("/api/v1/listings/{id}")]
    #[case("/api/v1/listings/code/{code}")]
    #[case("/api/v1/admin/listings/{id}/featured")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
