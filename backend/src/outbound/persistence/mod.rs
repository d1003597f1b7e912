//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the listing ports backed
//! by PostgreSQL via the Diesel ORM with async support through `diesel-async`
//! and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Atomic codes**: listing codes come from a PostgreSQL sequence, so
//!   concurrent writers never share a code and deleted codes are never reused.
//!
//! # Example
//!
//! ```ignore
//! use marketplace::outbound::persistence::{DbPool, DieselListingRepository, PoolConfig};
//!
//! let config = PoolConfig::new("postgres://localhost/marketplace");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselListingRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_listing_code_sequence;
mod diesel_listing_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_listing_code_sequence::DieselListingCodeSequence;
pub use diesel_listing_repository::DieselListingRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError};
