//! Process-local adapters used when no database is configured.

mod in_memory_listing_store;

pub use in_memory_listing_store::InMemoryListingStore;
