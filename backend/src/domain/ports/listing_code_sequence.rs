//! Port for allocating listing codes.
//!
//! Each call hands out a code no other call has received or will receive,
//! including codes of listings that were later deleted.

use async_trait::async_trait;

use crate::domain::ListingCode;

use super::define_port_error;

define_port_error! {
    /// Errors raised by listing code allocators.
    pub enum ListingCodeSequenceError {
        /// The backing store could not be reached.
        Connection { message: String } =>
            "listing code sequence unavailable: {message}",
        /// Reading the next value failed.
        Query { message: String } =>
            "listing code sequence failed: {message}",
        /// Every representable code has been issued.
        Exhausted =>
            "listing code sequence exhausted",
    }
}

/// Atomic source of listing codes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingCodeSequence: Send + Sync {
    /// Reserve the next code.
    async fn next_code(&self) -> Result<ListingCode, ListingCodeSequenceError>;
}
