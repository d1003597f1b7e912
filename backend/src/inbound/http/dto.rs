//! JSON bodies exchanged by the listing endpoints.
//!
//! Every body is camelCase on the wire. Conversions into domain drafts and
//! patches perform no validation; the domain rejects bad values.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{DeletedListing, Listing, ListingDraft, ListingPatch, SearchCriteria};

/// Listing as returned by every read and write endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(example = "LST00001")]
    pub code: String,
    #[schema(example = "toyota-axio-2016-lst00001")]
    pub slug: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    #[schema(example = "LKR")]
    pub currency: String,
    #[schema(example = "Vehicles")]
    pub category: String,
    pub images: Vec<String>,
    pub country: String,
    pub featured: bool,
    pub urgent: bool,
    pub badge: Option<String>,
    #[schema(format = "uuid")]
    pub owner: String,
    pub views: u64,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<&Listing> for ListingBody {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id().to_string(),
            code: listing.code().to_string(),
            slug: listing.slug().as_str().to_owned(),
            title: listing.title().as_str().to_owned(),
            description: listing.description().as_str().to_owned(),
            price: listing.price().amount(),
            currency: listing.currency().as_str().to_owned(),
            category: listing.category().as_str().to_owned(),
            images: listing
                .images()
                .iter()
                .map(|image| image.as_str().to_owned())
                .collect(),
            country: listing.country().as_str().to_owned(),
            featured: listing.featured(),
            urgent: listing.urgent(),
            badge: listing.badge().map(|badge| badge.as_str().to_owned()),
            owner: listing.owner().to_string(),
            views: listing.views(),
            created_at: listing.created_at().to_rfc3339(),
            updated_at: listing.updated_at().to_rfc3339(),
        }
    }
}

impl From<Listing> for ListingBody {
    fn from(listing: Listing) -> Self {
        Self::from(&listing)
    }
}

/// Collection envelope: `{ "count": n, "listings": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingCollectionBody {
    pub count: usize,
    pub listings: Vec<ListingBody>,
}

impl From<Vec<Listing>> for ListingCollectionBody {
    fn from(listings: Vec<Listing>) -> Self {
        let listings: Vec<ListingBody> = listings.iter().map(ListingBody::from).collect();
        Self {
            count: listings.len(),
            listings,
        }
    }
}

/// Summary of a removed listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedListingBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub code: String,
    pub title: String,
}

impl From<DeletedListing> for DeletedListingBody {
    fn from(value: DeletedListing) -> Self {
        Self {
            id: value.id.to_string(),
            code: value.code.to_string(),
            title: value.title.as_str().to_owned(),
        }
    }
}

/// Request payload for publishing a listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingBody {
    pub title: String,
    pub description: String,
    pub price: f64,
    /// ISO 4217 code; `LKR` when omitted.
    #[serde(default)]
    pub currency: Option<String>,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub country: String,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub badge: Option<String>,
}

impl From<CreateListingBody> for ListingDraft {
    fn from(body: CreateListingBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            price: body.price,
            currency: body.currency,
            category: body.category,
            images: body.images,
            country: body.country,
            urgent: body.urgent,
            badge: body.badge,
        }
    }
}

/// Request payload for editing a listing. Omitted fields stay unchanged.
///
/// `"badge": null` clears the badge; leaving `badge` out keeps it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListingBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgent: Option<bool>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub badge: Option<Option<String>>,
    /// Owners may only restate the current value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// Distinguish an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateListingBody> for ListingPatch {
    fn from(body: UpdateListingBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            price: body.price,
            currency: body.currency,
            category: body.category,
            images: body.images,
            country: body.country,
            urgent: body.urgent,
            badge: body.badge,
            featured: body.featured,
        }
    }
}

/// Request payload for the moderation featured toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetFeaturedBody {
    pub featured: bool,
}

/// Query parameters accepted by the search endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchQueryParams {
    /// Case-insensitive substring of the category name.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl SearchQueryParams {
    /// Combine the parameters with optional free text from the path.
    pub fn into_criteria(self, text: Option<String>) -> SearchCriteria {
        SearchCriteria {
            text,
            category: self.category,
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::{ListingCode, ListingId, UserId};

    fn listing() -> Listing {
        let draft = ListingDraft {
            title: "Toyota Axio 2016".into(),
            description: "Single owner".into(),
            price: 6_500_000.0,
            currency: None,
            category: "vehicles".into(),
            images: vec!["https://img.example/axio.jpg".into()],
            country: "Sri Lanka".into(),
            urgent: true,
            badge: Some("Hot".into()),
        }
        .validate()
        .expect("valid draft");
        Listing::create(
            ListingId::random(),
            ListingCode::from_number(7).expect("valid code"),
            UserId::random(),
            draft,
            Utc.with_ymd_and_hms(2026, 10, 1, 9, 30, 0).single().expect("valid time"),
        )
    }

    #[rstest]
    fn listing_body_uses_camel_case_and_public_code() {
        let value = serde_json::to_value(ListingBody::from(listing())).expect("serialise");

        assert_eq!(value["code"], "LST00007");
        assert_eq!(value["slug"], "toyota-axio-2016-lst00007");
        assert_eq!(value["currency"], "LKR");
        assert_eq!(value["category"], "Vehicles");
        assert_eq!(value["createdAt"], "2026-10-01T09:30:00+00:00");
        assert_eq!(value["views"], 0);
        assert!(value.get("created_at").is_none());
    }

    #[rstest]
    fn collection_counts_listings() {
        let body = ListingCollectionBody::from(vec![listing(), listing()]);
        assert_eq!(body.count, 2);
        assert_eq!(body.listings.len(), 2);
    }

    #[rstest]
    #[case(json!({}), None)]
    #[case(json!({"badge": null}), Some(None))]
    #[case(json!({"badge": "New"}), Some(Some("New".to_owned())))]
    fn update_body_distinguishes_null_badge(
        #[case] payload: serde_json::Value,
        #[case] expected: Option<Option<String>>,
    ) {
        let body: UpdateListingBody = serde_json::from_value(payload).expect("deserialise");
        assert_eq!(ListingPatch::from(body).badge, expected);
    }

    #[rstest]
    fn create_body_defaults_optional_fields() {
        let body: CreateListingBody = serde_json::from_value(json!({
            "title": "Desk",
            "description": "Oak",
            "price": 1500,
            "category": "Home & Living",
            "country": "Sri Lanka"
        }))
        .expect("deserialise");

        let draft = ListingDraft::from(body);
        assert!(draft.images.is_empty());
        assert!(!draft.urgent);
        assert_eq!(draft.currency, None);
    }

    #[rstest]
    fn search_params_read_camel_case() {
        let params: SearchQueryParams =
            serde_json::from_value(json!({"minPrice": 10.0, "category": "hob"}))
                .expect("deserialise");
        let criteria = params.into_criteria(Some("lego".into()));

        assert_eq!(criteria.min_price, Some(10.0));
        assert_eq!(criteria.max_price, None);
        assert_eq!(criteria.category.as_deref(), Some("hob"));
        assert_eq!(criteria.text.as_deref(), Some("lego"));
    }
}
