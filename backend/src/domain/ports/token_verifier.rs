//! Port for turning bearer credentials into a caller identity.

use crate::domain::Principal;

use super::define_port_error;

define_port_error! {
    /// Errors raised while verifying a credential.
    pub enum TokenVerificationError {
        /// The credential is malformed, tampered with, or carries bad claims.
        Invalid { message: String } =>
            "invalid token: {message}",
        /// The credential is past its expiry.
        Expired =>
            "token expired",
    }
}

/// Verifies bearer credentials issued by the identity provider.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Verify `token` and return the caller it identifies.
    fn verify(&self, token: &str) -> Result<Principal, TokenVerificationError>;
}
