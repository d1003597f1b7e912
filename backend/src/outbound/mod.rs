//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed listing storage and code sequence
//! - **memory**: process-local store used when no database is configured
//! - **token**: HS256 bearer token verification
//! - **events**: structured-log listing event sink
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod events;
pub mod memory;
pub mod persistence;
pub mod token;
