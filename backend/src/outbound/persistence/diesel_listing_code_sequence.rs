//! PostgreSQL-backed `ListingCodeSequence` drawing from `listing_code_seq`.
//!
//! `nextval` is atomic across sessions and never hands a value out twice, even
//! when the surrounding transaction rolls back.

use async_trait::async_trait;
use diesel::sql_types::BigInt;
use diesel::{QueryableByName, sql_query};
use diesel_async::RunQueryDsl;

use crate::domain::ListingCode;
use crate::domain::ports::{ListingCodeSequence, ListingCodeSequenceError};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::pool::DbPool;

#[derive(Debug, QueryableByName)]
struct SequenceValue {
    #[diesel(sql_type = BigInt)]
    value: i64,
}

/// Diesel-backed listing code allocator.
#[derive(Clone)]
pub struct DieselListingCodeSequence {
    pool: DbPool,
}

impl DieselListingCodeSequence {
    /// Create a new allocator with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingCodeSequence for DieselListingCodeSequence {
    async fn next_code(&self) -> Result<ListingCode, ListingCodeSequenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, ListingCodeSequenceError::connection))?;

        let next = sql_query("SELECT nextval('listing_code_seq') AS value")
            .get_result::<SequenceValue>(&mut conn)
            .await
            .map_err(|err| {
                map_basic_diesel_error(
                    err,
                    ListingCodeSequenceError::query,
                    ListingCodeSequenceError::connection,
                )
            })?;

        ListingCode::from_sequence_value(next.value)
            .map_err(|_| ListingCodeSequenceError::exhausted())
    }
}
