//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ListingCommand, ListingQuery, TokenVerifier};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub listings: Arc<dyn ListingCommand>,
    pub listings_query: Arc<dyn ListingQuery>,
    pub tokens: Arc<dyn TokenVerifier>,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(
        listings: Arc<dyn ListingCommand>,
        listings_query: Arc<dyn ListingQuery>,
        tokens: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            listings,
            listings_query,
            tokens,
        }
    }
}
