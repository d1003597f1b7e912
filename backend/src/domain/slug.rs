//! URL slugs derived from listing titles.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and hyphens. A listing slug always ends with the
//! lower-cased listing code, which keeps it unique even when titles repeat.

use std::fmt;

use crate::domain::ListingCode;

/// Return `true` when `value` is a valid slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    is_trimmed_non_empty(value) && has_allowed_slug_chars(value)
}

fn is_trimmed_non_empty(value: &str) -> bool {
    !value.is_empty() && value.trim() == value
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Error returned when a stored slug is not well formed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid listing slug: {value}")]
pub struct ListingSlugError {
    value: String,
}

/// Slug identifying a listing in URLs (`red-bicycle-lst00042`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingSlug(String);

impl ListingSlug {
    /// Derive a slug from a title and the listing's code.
    ///
    /// ASCII letters and digits of the title are lower-cased and grouped
    /// into words; every other character separates words.
    ///
    /// # Examples
    /// ```
    /// use marketplace::domain::{ListingCode, ListingSlug};
    ///
    /// let code = ListingCode::from_number(42).expect("valid code");
    /// let slug = ListingSlug::derive("Red Bicycle (2019)!", code);
    /// assert_eq!(slug.as_str(), "red-bicycle-2019-lst00042");
    /// ```
    #[must_use]
    pub fn derive(title: &str, code: ListingCode) -> Self {
        let mut words: Vec<String> = title
            .split(|ch: char| !ch.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();
        words.push(code.slug_suffix());
        Self(words.join("-"))
    }

    /// Validate a previously stored slug.
    pub fn parse(value: impl Into<String>) -> Result<Self, ListingSlugError> {
        let value = value.into();
        if is_valid_slug(&value) {
            Ok(Self(value))
        } else {
            Err(ListingSlugError { value })
        }
    }

    /// Borrow the slug text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ListingSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
