//! Human-readable listing codes (`LST00001`, `LST00002`, ...).
//!
//! A code wraps a positive sequence number. Allocation lives behind the
//! [`ListingCodeSequence`](crate::domain::ports::ListingCodeSequence) port so
//! that concurrent writers never observe the same number.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prefix shared by every listing code.
pub const LISTING_CODE_PREFIX: &str = "LST";
/// Minimum number of digits after the prefix; shorter numbers are zero padded.
pub const LISTING_CODE_MIN_DIGITS: usize = 5;

/// Reasons a listing code cannot be parsed or produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingCodeError {
    /// The value does not start with `LST`.
    #[error("listing code must start with {LISTING_CODE_PREFIX}")]
    MissingPrefix,
    /// Characters after the prefix are not all ASCII digits.
    #[error("listing code must end in decimal digits")]
    InvalidDigits,
    /// Fewer than five digits follow the prefix.
    #[error("listing code must have at least {LISTING_CODE_MIN_DIGITS} digits")]
    TooFewDigits,
    /// Digits carry more zero padding than the canonical form.
    #[error("listing code is not in canonical form")]
    NonCanonical,
    /// Sequence numbers start at one.
    #[error("listing code number must be at least 1")]
    Zero,
    /// The number does not fit the code range.
    #[error("listing code number is out of range")]
    OutOfRange,
    /// No codes remain after the current one.
    #[error("listing code range exhausted")]
    Exhausted,
}

/// Unique, immutable listing code.
///
/// # Examples
/// ```
/// use marketplace::domain::ListingCode;
///
/// let code: ListingCode = "LST00042".parse().expect("valid code");
/// assert_eq!(code.number(), 42);
/// assert_eq!(code.to_string(), "LST00042");
/// assert_eq!(ListingCode::first().to_string(), "LST00001");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ListingCode(u32);

impl ListingCode {
    /// Code handed to the very first listing.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// Wrap a sequence number.
    pub fn from_number(number: u32) -> Result<Self, ListingCodeError> {
        if number == 0 {
            return Err(ListingCodeError::Zero);
        }
        Ok(Self(number))
    }

    /// Wrap a sequence value as produced by a database sequence.
    pub fn from_sequence_value(value: i64) -> Result<Self, ListingCodeError> {
        let number = u32::try_from(value).map_err(|_| {
            if value <= 0 {
                ListingCodeError::Zero
            } else {
                ListingCodeError::Exhausted
            }
        })?;
        Self::from_number(number)
    }

    /// Underlying sequence number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }

    /// Code following this one.
    pub fn next(self) -> Result<Self, ListingCodeError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(ListingCodeError::Exhausted)
    }

    /// Parse the canonical textual form.
    pub fn parse(value: &str) -> Result<Self, ListingCodeError> {
        let digits = value
            .strip_prefix(LISTING_CODE_PREFIX)
            .ok_or(ListingCodeError::MissingPrefix)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ListingCodeError::InvalidDigits);
        }
        if digits.len() < LISTING_CODE_MIN_DIGITS {
            return Err(ListingCodeError::TooFewDigits);
        }
        let number: u32 = digits.parse().map_err(|_| ListingCodeError::OutOfRange)?;
        let code = Self::from_number(number)?;
        if code.to_string() != value {
            return Err(ListingCodeError::NonCanonical);
        }
        Ok(code)
    }

    /// Lower-case form used as the slug suffix (`lst00042`).
    #[must_use]
    pub fn slug_suffix(self) -> String {
        self.to_string().to_ascii_lowercase()
    }
}

impl fmt::Display for ListingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{LISTING_CODE_PREFIX}{:0width$}",
            self.0,
            width = LISTING_CODE_MIN_DIGITS
        )
    }
}

impl FromStr for ListingCode {
    type Err = ListingCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ListingCode {
    type Error = ListingCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ListingCode> for String {
    fn from(value: ListingCode) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, "LST00001")]
    #[case(42, "LST00042")]
    #[case(99_999, "LST99999")]
    #[case(100_000, "LST100000")]
    fn formats_zero_padded(#[case] number: u32, #[case] expected: &str) {
        let code = ListingCode::from_number(number).expect("valid number");
        assert_eq!(code.to_string(), expected);
        assert_eq!(ListingCode::parse(expected), Ok(code));
    }

    #[rstest]
    #[case("", ListingCodeError::MissingPrefix)]
    #[case("lst00001", ListingCodeError::MissingPrefix)]
    #[case("ABC00001", ListingCodeError::MissingPrefix)]
    #[case("LST", ListingCodeError::InvalidDigits)]
    #[case("LST0001a", ListingCodeError::InvalidDigits)]
    #[case("LST-0001", ListingCodeError::InvalidDigits)]
    #[case("LST+00001", ListingCodeError::InvalidDigits)]
    #[case("LST0001", ListingCodeError::TooFewDigits)]
    #[case("LST00000", ListingCodeError::Zero)]
    #[case("LST000001", ListingCodeError::NonCanonical)]
    #[case("LST99999999999", ListingCodeError::OutOfRange)]
    fn rejects_malformed_codes(#[case] raw: &str, #[case] expected: ListingCodeError) {
        assert_eq!(ListingCode::parse(raw), Err(expected));
    }

    #[rstest]
    fn next_increments() {
        let code = ListingCode::first().next().expect("room for more");
        assert_eq!(code.to_string(), "LST00002");
    }

    #[rstest]
    fn next_fails_at_range_end() {
        let last = ListingCode::from_number(u32::MAX).expect("valid number");
        assert_eq!(last.next(), Err(ListingCodeError::Exhausted));
    }

    #[rstest]
    #[case(0, ListingCodeError::Zero)]
    #[case(-3, ListingCodeError::Zero)]
    #[case(i64::from(u32::MAX) + 1, ListingCodeError::Exhausted)]
    fn sequence_values_outside_range_fail(#[case] value: i64, #[case] expected: ListingCodeError) {
        assert_eq!(ListingCode::from_sequence_value(value), Err(expected));
    }

    #[rstest]
    fn slug_suffix_is_lower_case() {
        let code = ListingCode::from_number(42).expect("valid number");
        assert_eq!(code.slug_suffix(), "lst00042");
    }

    #[rstest]
    fn orders_by_number() {
        let a = ListingCode::from_number(9).expect("valid number");
        let b = ListingCode::from_number(10).expect("valid number");
        assert!(a < b);
    }
}
