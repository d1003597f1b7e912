//! Listing search criteria and the storage-level filter they compile to.
//!
//! Free text is always matched literally: callers cannot inject patterns.
//! Storage adapters either evaluate [`ListingFilter::matches`] directly or
//! translate the filter into an equivalent query.

use crate::domain::{Listing, UserId};

/// Raw search parameters as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    /// Text matched against title, description and category name.
    pub text: Option<String>,
    /// Text matched against the category name only.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

/// Reasons search criteria are rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchValidationError {
    /// A bound is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFiniteBound { field: &'static str },
    /// The lower bound exceeds the upper bound.
    #[error("minPrice ({min}) must not exceed maxPrice ({max})")]
    InvertedRange { min: f64, max: f64 },
}

impl SearchValidationError {
    /// Name of the offending request field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::NonFiniteBound { field } => *field,
            Self::InvertedRange { .. } => "minPrice",
        }
    }
}

/// Normalised selection applied by listing repositories.
///
/// Text needles are trimmed and lower-cased; empty needles are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub featured_only: bool,
    pub owner: Option<UserId>,
    pub text: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ListingFilter {
    /// Every listing.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Featured listings only.
    #[must_use]
    pub fn featured() -> Self {
        Self {
            featured_only: true,
            ..Self::default()
        }
    }

    /// Listings owned by `owner`.
    #[must_use]
    pub fn owned_by(owner: UserId) -> Self {
        Self {
            owner: Some(owner),
            ..Self::default()
        }
    }

    /// Whether `listing` satisfies every condition of the filter.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        if self.featured_only && !listing.featured() {
            return false;
        }
        if self.owner.is_some_and(|owner| &owner != listing.owner()) {
            return false;
        }
        let category = listing.category().as_str().to_lowercase();
        if let Some(needle) = &self.category {
            if !category.contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(needle) = &self.text {
            let in_title = listing.title().as_str().to_lowercase().contains(needle.as_str());
            let in_description = listing
                .description()
                .as_str()
                .to_lowercase()
                .contains(needle.as_str());
            if !(in_title || in_description || category.contains(needle.as_str())) {
                return false;
            }
        }
        let price = listing.price().amount();
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }
        true
    }
}

fn needle(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_lowercase())
        .filter(|trimmed| !trimmed.is_empty())
}

fn finite_bound(value: Option<f64>, field: &'static str) -> Result<Option<f64>, SearchValidationError> {
    match value {
        Some(bound) if !bound.is_finite() => Err(SearchValidationError::NonFiniteBound { field }),
        other => Ok(other),
    }
}

impl TryFrom<SearchCriteria> for ListingFilter {
    type Error = SearchValidationError;

    fn try_from(value: SearchCriteria) -> Result<Self, Self::Error> {
        let min_price = finite_bound(value.min_price, "minPrice")?;
        let max_price = finite_bound(value.max_price, "maxPrice")?;
        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(SearchValidationError::InvertedRange { min, max });
            }
        }
        Ok(Self {
            featured_only: false,
            owner: None,
            text: needle(value.text),
            category: needle(value.category),
            min_price,
            max_price,
        })
    }
}
