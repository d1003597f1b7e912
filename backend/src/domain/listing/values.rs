//! Validated value types making up a listing.

use std::fmt;

use url::Url;

/// Maximum title length in characters.
pub const TITLE_MAX: usize = 120;
/// Maximum description length in characters.
pub const DESCRIPTION_MAX: usize = 5000;
/// Maximum country length in characters.
pub const COUNTRY_MAX: usize = 64;
/// Maximum badge length in characters.
pub const BADGE_MAX: usize = 16;
/// Maximum number of images attached to one listing.
pub const IMAGES_MAX: usize = 10;
/// Currency applied when the caller supplies none.
pub const DEFAULT_CURRENCY: &str = "LKR";

/// Validation failures for listing fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListingValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("price must be a finite number greater than zero")]
    InvalidPrice { value: f64 },
    #[error("currency must be a three-letter code")]
    InvalidCurrency { value: String },
    #[error("unknown category: {value}")]
    UnknownCategory { value: String },
    #[error("images[{index}] must be an absolute http(s) URL")]
    InvalidImageUrl { index: usize, value: String },
    #[error("at most {max} images are allowed")]
    TooManyImages { max: usize },
    #[error("country must not be empty")]
    EmptyCountry,
    #[error("country must be at most {max} characters")]
    CountryTooLong { max: usize },
    #[error("badge must not be empty")]
    EmptyBadge,
    #[error("badge must be at most {max} characters")]
    BadgeTooLong { max: usize },
}

impl ListingValidationError {
    /// Name of the offending request field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::EmptyDescription | Self::DescriptionTooLong { .. } => "description",
            Self::InvalidPrice { .. } => "price",
            Self::InvalidCurrency { .. } => "currency",
            Self::UnknownCategory { .. } => "category",
            Self::InvalidImageUrl { .. } | Self::TooManyImages { .. } => "images",
            Self::EmptyCountry | Self::CountryTooLong { .. } => "country",
            Self::EmptyBadge | Self::BadgeTooLong { .. } => "badge",
        }
    }

    /// Machine-readable failure code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::EmptyDescription | Self::EmptyCountry | Self::EmptyBadge => {
                "empty"
            }
            Self::TitleTooLong { .. }
            | Self::DescriptionTooLong { .. }
            | Self::CountryTooLong { .. }
            | Self::BadgeTooLong { .. } => "too_long",
            Self::InvalidPrice { .. } => "invalid_price",
            Self::InvalidCurrency { .. } => "invalid_currency",
            Self::UnknownCategory { .. } => "unknown_category",
            Self::InvalidImageUrl { .. } => "invalid_url",
            Self::TooManyImages { .. } => "too_many_images",
        }
    }
}

fn bounded_text(
    value: &str,
    max: usize,
    empty: ListingValidationError,
    too_long: ListingValidationError,
) -> Result<String, ListingValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    if trimmed.chars().count() > max {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

macro_rules! text_value {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Borrow the validated text.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }
    };
}

text_value! {
    /// Trimmed listing title, 1 to 120 characters.
    ListingTitle
}

impl ListingTitle {
    /// Validate a title.
    pub fn new(value: &str) -> Result<Self, ListingValidationError> {
        bounded_text(
            value,
            TITLE_MAX,
            ListingValidationError::EmptyTitle,
            ListingValidationError::TitleTooLong { max: TITLE_MAX },
        )
        .map(Self)
    }
}

text_value! {
    /// Trimmed listing description, 1 to 5000 characters.
    ListingDescription
}

impl ListingDescription {
    /// Validate a description.
    pub fn new(value: &str) -> Result<Self, ListingValidationError> {
        bounded_text(
            value,
            DESCRIPTION_MAX,
            ListingValidationError::EmptyDescription,
            ListingValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            },
        )
        .map(Self)
    }
}

text_value! {
    /// Country the item is offered in.
    Country
}

impl Country {
    /// Validate a country name.
    pub fn new(value: &str) -> Result<Self, ListingValidationError> {
        bounded_text(
            value,
            COUNTRY_MAX,
            ListingValidationError::EmptyCountry,
            ListingValidationError::CountryTooLong { max: COUNTRY_MAX },
        )
        .map(Self)
    }
}

text_value! {
    /// Short upper-case marker such as `NEW` or `HOT`.
    ListingBadge
}

impl ListingBadge {
    /// Validate and upper-case a badge.
    pub fn new(value: &str) -> Result<Self, ListingValidationError> {
        bounded_text(
            value,
            BADGE_MAX,
            ListingValidationError::EmptyBadge,
            ListingValidationError::BadgeTooLong { max: BADGE_MAX },
        )
        .map(|badge| Self(badge.to_uppercase()))
    }
}

text_value! {
    /// ISO-4217 style three-letter currency code, upper-cased.
    CurrencyCode
}

impl CurrencyCode {
    /// Validate and upper-case a currency code.
    ///
    /// # Examples
    /// ```
    /// use marketplace::domain::CurrencyCode;
    ///
    /// assert_eq!(CurrencyCode::new(" usd ").expect("valid").as_str(), "USD");
    /// assert!(CurrencyCode::new("US").is_err());
    /// ```
    pub fn new(value: &str) -> Result<Self, ListingValidationError> {
        let trimmed = value.trim();
        if trimmed.len() != 3 || !trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ListingValidationError::InvalidCurrency {
                value: value.to_owned(),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// The marketplace default currency.
    #[must_use]
    pub fn default_currency() -> Self {
        Self(DEFAULT_CURRENCY.to_owned())
    }
}

text_value! {
    /// Absolute `http` or `https` image URL.
    ImageUrl
}

impl ImageUrl {
    fn parse_at(index: usize, value: &str) -> Result<Self, ListingValidationError> {
        let trimmed = value.trim();
        let invalid = || ListingValidationError::InvalidImageUrl {
            index,
            value: value.to_owned(),
        };
        let url = Url::parse(trimmed).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(invalid());
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Validate a single image URL.
    pub fn new(value: &str) -> Result<Self, ListingValidationError> {
        Self::parse_at(0, value)
    }
}

/// Validate a list of image URLs, enforcing the per-listing limit.
pub fn parse_images<S: AsRef<str>>(values: &[S]) -> Result<Vec<ImageUrl>, ListingValidationError> {
    if values.len() > IMAGES_MAX {
        return Err(ListingValidationError::TooManyImages { max: IMAGES_MAX });
    }
    values
        .iter()
        .enumerate()
        .map(|(index, value)| ImageUrl::parse_at(index, value.as_ref()))
        .collect()
}

/// Asking price, strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Validate a price.
    pub fn new(value: f64) -> Result<Self, ListingValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ListingValidationError::InvalidPrice { value });
        }
        Ok(Self(value))
    }

    /// Raw amount.
    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
