//! Listing aggregate: a classified advert offered by one user.
//!
//! ## Invariants
//! - `code`, `owner`, `id` and `created_at` never change after creation.
//! - `slug` always reflects the current title and the code.
//! - `featured` starts false; only administrators change it.
//! - `views` only grows.

mod category;
mod values;

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use self::category::{ListingCategory, UnknownCategoryError};
pub use self::values::{
    BADGE_MAX, COUNTRY_MAX, Country, CurrencyCode, DEFAULT_CURRENCY, DESCRIPTION_MAX, IMAGES_MAX,
    ImageUrl, ListingBadge, ListingDescription, ListingTitle, ListingValidationError, Price,
    TITLE_MAX, parse_images,
};
use crate::domain::{ListingCode, ListingSlug, UserId};

/// Storage key of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListingId(Uuid);

impl ListingId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied fields for a new listing, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency: Option<String>,
    pub category: String,
    pub images: Vec<String>,
    pub country: String,
    pub urgent: bool,
    pub badge: Option<String>,
}

impl ListingDraft {
    /// Validate every field; the currency defaults to `LKR`.
    pub fn validate(self) -> Result<ValidListingDraft, ListingValidationError> {
        let Self {
            title,
            description,
            price,
            currency,
            category,
            images,
            country,
            urgent,
            badge,
        } = self;

        Ok(ValidListingDraft {
            title: ListingTitle::new(&title)?,
            description: ListingDescription::new(&description)?,
            price: Price::new(price)?,
            currency: currency
                .as_deref()
                .map(CurrencyCode::new)
                .transpose()?
                .unwrap_or_else(CurrencyCode::default_currency),
            category: parse_category(&category)?,
            images: parse_images(&images)?,
            country: Country::new(&country)?,
            urgent,
            badge: badge.as_deref().map(ListingBadge::new).transpose()?,
        })
    }
}

/// Draft whose fields passed validation; the only input to [`Listing::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidListingDraft {
    title: ListingTitle,
    description: ListingDescription,
    price: Price,
    currency: CurrencyCode,
    category: ListingCategory,
    images: Vec<ImageUrl>,
    country: Country,
    urgent: bool,
    badge: Option<ListingBadge>,
}

/// Optional field changes for an existing listing, before validation.
///
/// `badge: Some(None)` clears the badge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub country: Option<String>,
    pub urgent: Option<bool>,
    pub badge: Option<Option<String>>,
    pub featured: Option<bool>,
}

impl ListingPatch {
    /// Whether applying the patch would flip the featured flag of `listing`.
    #[must_use]
    pub fn changes_featured(&self, listing: &Listing) -> bool {
        self.featured
            .is_some_and(|featured| featured != listing.featured())
    }
}

/// Fully validated listing state as read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    pub id: ListingId,
    pub code: ListingCode,
    pub slug: ListingSlug,
    pub title: ListingTitle,
    pub description: ListingDescription,
    pub price: Price,
    pub currency: CurrencyCode,
    pub category: ListingCategory,
    pub images: Vec<ImageUrl>,
    pub country: Country,
    pub featured: bool,
    pub urgent: bool,
    pub badge: Option<ListingBadge>,
    pub owner: UserId,
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Summary returned after a listing is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedListing {
    pub id: ListingId,
    pub code: ListingCode,
    pub title: ListingTitle,
}

/// A classified listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    record: ListingRecord,
}

impl Listing {
    /// Build a new listing owned by `owner` from a validated draft.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use marketplace::domain::{Listing, ListingCode, ListingDraft, ListingId, UserId};
    ///
    /// let draft = ListingDraft {
    ///     title: "Road bike".to_owned(),
    ///     description: "Light and fast".to_owned(),
    ///     price: 85000.0,
    ///     currency: None,
    ///     category: "Hobbies".to_owned(),
    ///     images: vec![],
    ///     country: "Sri Lanka".to_owned(),
    ///     urgent: false,
    ///     badge: Some("new".to_owned()),
    /// };
    /// let listing = Listing::create(
    ///     ListingId::random(),
    ///     ListingCode::first(),
    ///     UserId::random(),
    ///     draft.validate().expect("valid draft"),
    ///     Utc::now(),
    /// );
    /// assert_eq!(listing.slug().as_str(), "road-bike-lst00001");
    /// assert_eq!(listing.currency().as_str(), "LKR");
    /// ```
    #[must_use]
    pub fn create(
        id: ListingId,
        code: ListingCode,
        owner: UserId,
        draft: ValidListingDraft,
        now: DateTime<Utc>,
    ) -> Self {
        let ValidListingDraft {
            title,
            description,
            price,
            currency,
            category,
            images,
            country,
            urgent,
            badge,
        } = draft;

        Self {
            record: ListingRecord {
                id,
                code,
                slug: ListingSlug::derive(title.as_str(), code),
                title,
                description,
                price,
                currency,
                category,
                images,
                country,
                featured: false,
                urgent,
                badge,
                owner,
                views: 0,
                created_at: now,
                updated_at: now,
            },
        }
    }

    /// Return a copy of this listing with `patch` applied.
    ///
    /// Validation happens before any field changes; on error the listing is
    /// left untouched. Authorisation is the caller's concern.
    pub fn patched(&self, patch: ListingPatch, now: DateTime<Utc>) -> Result<Self, ListingValidationError> {
        let ListingPatch {
            title,
            description,
            price,
            currency,
            category,
            images,
            country,
            urgent,
            badge,
            featured,
        } = patch;

        let mut next = self.record.clone();
        if let Some(title) = title {
            next.title = ListingTitle::new(&title)?;
            next.slug = ListingSlug::derive(next.title.as_str(), next.code);
        }
        if let Some(description) = description {
            next.description = ListingDescription::new(&description)?;
        }
        if let Some(price) = price {
            next.price = Price::new(price)?;
        }
        if let Some(currency) = currency {
            next.currency = CurrencyCode::new(&currency)?;
        }
        if let Some(category) = category {
            next.category = parse_category(&category)?;
        }
        if let Some(images) = images {
            next.images = parse_images(&images)?;
        }
        if let Some(country) = country {
            next.country = Country::new(&country)?;
        }
        if let Some(urgent) = urgent {
            next.urgent = urgent;
        }
        if let Some(badge) = badge {
            next.badge = badge.as_deref().map(ListingBadge::new).transpose()?;
        }
        if let Some(featured) = featured {
            next.featured = featured;
        }
        next.updated_at = now;
        Ok(Self { record: next })
    }

    /// Return a copy with the featured flag set.
    #[must_use]
    pub fn with_featured(&self, featured: bool, now: DateTime<Utc>) -> Self {
        let mut record = self.record.clone();
        record.featured = featured;
        record.updated_at = now;
        Self { record }
    }

    /// Summary of this listing for deletion responses.
    #[must_use]
    pub fn deleted_summary(&self) -> DeletedListing {
        DeletedListing {
            id: self.record.id,
            code: self.record.code,
            title: self.record.title.clone(),
        }
    }

    /// Count one more view.
    pub fn record_view(&mut self) {
        self.record.views = self.record.views.saturating_add(1);
    }

    /// Borrow the full record.
    pub fn record(&self) -> &ListingRecord {
        &self.record
    }

    pub fn id(&self) -> ListingId {
        self.record.id
    }

    pub fn code(&self) -> ListingCode {
        self.record.code
    }

    pub fn slug(&self) -> &ListingSlug {
        &self.record.slug
    }

    pub fn title(&self) -> &ListingTitle {
        &self.record.title
    }

    pub fn description(&self) -> &ListingDescription {
        &self.record.description
    }

    pub fn price(&self) -> Price {
        self.record.price
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.record.currency
    }

    pub fn category(&self) -> ListingCategory {
        self.record.category
    }

    pub fn images(&self) -> &[ImageUrl] {
        &self.record.images
    }

    pub fn country(&self) -> &Country {
        &self.record.country
    }

    pub fn featured(&self) -> bool {
        self.record.featured
    }

    pub fn urgent(&self) -> bool {
        self.record.urgent
    }

    pub fn badge(&self) -> Option<&ListingBadge> {
        self.record.badge.as_ref()
    }

    pub fn owner(&self) -> &UserId {
        &self.record.owner
    }

    pub fn views(&self) -> u64 {
        self.record.views
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.record.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.record.updated_at
    }
}

impl From<ListingRecord> for Listing {
    fn from(record: ListingRecord) -> Self {
        Self { record }
    }
}

impl From<Listing> for ListingRecord {
    fn from(listing: Listing) -> Self {
        listing.record
    }
}

fn parse_category(value: &str) -> Result<ListingCategory, ListingValidationError> {
    value
        .parse()
        .map_err(|err: UnknownCategoryError| ListingValidationError::UnknownCategory {
            value: err.value,
        })
}
