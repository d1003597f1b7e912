//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, ListingId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse the `{id}` path segment of listing routes.
pub(crate) fn parse_listing_id(value: &str) -> Result<ListingId, Error> {
    parse_uuid(value, FieldName::new("id")).map(ListingId::from_uuid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use rstest::rstest;

    #[rstest]
    fn parse_listing_id_accepts_uuids() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id = parse_listing_id(raw).expect("valid uuid");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case("LST00001")]
    fn parse_listing_id_rejects_garbage(#[case] raw: &str) {
        let err = parse_listing_id(raw).expect_err("invalid uuid");
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "id", "value": raw, "code": "invalid_uuid"}))
        );
    }
}
