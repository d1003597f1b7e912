//! Fixed listing categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned for a category name outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown listing category: {value}")]
pub struct UnknownCategoryError {
    /// Rejected input.
    pub value: String,
}

/// Marketplace category a listing is filed under.
///
/// Parsing ignores case and surrounding whitespace; serialisation uses the
/// display names.
///
/// # Examples
/// ```
/// use marketplace::domain::ListingCategory;
///
/// let category: ListingCategory = "home & living".parse().expect("known category");
/// assert_eq!(category, ListingCategory::HomeAndLiving);
/// assert_eq!(category.as_str(), "Home & Living");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ListingCategory {
    Vehicles,
    Hobbies,
    HomeAndLiving,
    BusinessAndIndustry,
    Property,
    WomensFashionAndBeauty,
    MensFashionAndGrooming,
    Essentials,
    Education,
}

impl ListingCategory {
    /// Every category in display order.
    pub const ALL: [Self; 9] = [
        Self::Vehicles,
        Self::Hobbies,
        Self::HomeAndLiving,
        Self::BusinessAndIndustry,
        Self::Property,
        Self::WomensFashionAndBeauty,
        Self::MensFashionAndGrooming,
        Self::Essentials,
        Self::Education,
    ];

    /// Display name, also used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vehicles => "Vehicles",
            Self::Hobbies => "Hobbies",
            Self::HomeAndLiving => "Home & Living",
            Self::BusinessAndIndustry => "Business & Industry",
            Self::Property => "Property",
            Self::WomensFashionAndBeauty => "Women's Fashion & Beauty",
            Self::MensFashionAndGrooming => "Men's Fashion & Grooming",
            Self::Essentials => "Essentials",
            Self::Education => "Education",
        }
    }
}

impl fmt::Display for ListingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingCategory {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategoryError {
                value: s.to_owned(),
            })
    }
}

impl TryFrom<String> for ListingCategory {
    type Error = UnknownCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ListingCategory> for String {
    fn from(value: ListingCategory) -> Self {
        value.as_str().to_owned()
    }
}
