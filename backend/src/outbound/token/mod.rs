//! Bearer credential verification.

mod jwt_token_verifier;

pub use jwt_token_verifier::{JwtClaims, JwtTokenVerifier};
