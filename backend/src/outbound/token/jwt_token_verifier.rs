//! HS256 JWT verification for bearer credentials.
//!
//! Tokens carry the caller id in `id` and the role either as `role` or as the
//! legacy `isAdmin` flag. `exp` is optional; when present it is enforced.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{TokenVerificationError, TokenVerifier};
use crate::domain::{Principal, Role, UserId};

/// Claims read from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtClaims {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Verifies HS256 tokens signed with a shared secret.
pub struct JwtTokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    /// Build a verifier for tokens signed with `secret`.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_aud = false;
        validation.leeway = 0;
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<Principal, TokenVerificationError> {
        let data = decode::<JwtClaims>(token, &self.key, &self.validation).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenVerificationError::expired(),
                _ => TokenVerificationError::invalid(err.to_string()),
            }
        })?;

        let claims = data.claims;
        let id = UserId::new(&claims.id)
            .map_err(|err| TokenVerificationError::invalid(format!("id claim: {err}")))?;
        let role = Role::from_claims(claims.role.as_deref(), claims.is_admin);
        Ok(Principal::new(id, role))
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header, encode};
    use rstest::{fixture, rstest};

    use super::*;

    const SECRET: &[u8] = b"marketplace-test-secret-marketplace";

    fn token_for(claims: &JwtClaims, secret: &[u8]) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .expect("token encodes")
    }

    fn now() -> u64 {
        u64::try_from(chrono::Utc::now().timestamp()).expect("positive timestamp")
    }

    #[fixture]
    fn user_id() -> UserId {
        UserId::random()
    }

    #[fixture]
    fn verifier() -> JwtTokenVerifier {
        JwtTokenVerifier::new(SECRET)
    }

    #[rstest]
    #[case(None, None, Role::Customer)]
    #[case(Some("admin"), None, Role::Admin)]
    #[case(Some("customer"), Some(true), Role::Admin)]
    #[case(None, Some(false), Role::Customer)]
    fn verify_reads_identity_and_role(
        verifier: JwtTokenVerifier,
        user_id: UserId,
        #[case] role: Option<&str>,
        #[case] is_admin: Option<bool>,
        #[case] expected: Role,
    ) {
        let token = token_for(
            &JwtClaims {
                id: user_id.to_string(),
                role: role.map(str::to_owned),
                is_admin,
                exp: Some(now() + 600),
            },
            SECRET,
        );

        let principal = verifier.verify(&token).expect("token verifies");
        assert_eq!(principal.id(), &user_id);
        assert_eq!(principal.role(), expected);
    }

    #[rstest]
    fn verify_accepts_tokens_without_expiry(verifier: JwtTokenVerifier, user_id: UserId) {
        let token = token_for(
            &JwtClaims {
                id: user_id.to_string(),
                role: None,
                is_admin: None,
                exp: None,
            },
            SECRET,
        );
        assert!(verifier.verify(&token).is_ok());
    }

    #[rstest]
    fn verify_rejects_expired_tokens(verifier: JwtTokenVerifier, user_id: UserId) {
        let token = token_for(
            &JwtClaims {
                id: user_id.to_string(),
                role: None,
                is_admin: None,
                exp: Some(now() - 3600),
            },
            SECRET,
        );
        assert_eq!(
            verifier.verify(&token),
            Err(TokenVerificationError::Expired)
        );
    }

    #[rstest]
    fn verify_rejects_foreign_signatures(verifier: JwtTokenVerifier, user_id: UserId) {
        let token = token_for(
            &JwtClaims {
                id: user_id.to_string(),
                role: None,
                is_admin: None,
                exp: None,
            },
            b"some-other-secret-some-other-secret",
        );
        assert!(matches!(
            verifier.verify(&token),
            Err(TokenVerificationError::Invalid { .. })
        ));
    }

    #[rstest]
    #[case("not-a-jwt")]
    #[case("")]
    fn verify_rejects_malformed_tokens(verifier: JwtTokenVerifier, #[case] token: &str) {
        assert!(verifier.verify(token).is_err());
    }

    #[rstest]
    fn verify_rejects_non_uuid_ids(verifier: JwtTokenVerifier) {
        let token = token_for(
            &JwtClaims {
                id: "507f1f77bcf86cd799439011".to_owned(),
                role: None,
                is_admin: None,
                exp: None,
            },
            SECRET,
        );
        assert!(matches!(
            verifier.verify(&token),
            Err(TokenVerificationError::Invalid { .. })
        ));
    }
}
