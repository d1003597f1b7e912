//! PostgreSQL-backed `ListingRepository` implementation using Diesel ORM.
//!
//! Rows are re-validated through the domain constructors on the way out so a
//! hand-edited row surfaces as a query error instead of an invalid listing.

use async_trait::async_trait;
use diesel::PgTextExpressionMethods;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ListingRepository, ListingRepositoryError};
use crate::domain::{
    Country, CurrencyCode, Listing, ListingBadge, ListingCategory, ListingCode,
    ListingDescription, ListingFilter, ListingId, ListingRecord, ListingSlug, ListingTitle, Price,
    UserId, parse_images,
};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{ListingRow, ListingUpdate, NewListingRow};
use super::pool::{DbPool, PoolError};
use super::schema::listings;

/// Diesel-backed implementation of the listing repository port.
#[derive(Clone)]
pub struct DieselListingRepository {
    pool: DbPool,
}

impl DieselListingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ListingRepositoryError {
    map_basic_pool_error(error, ListingRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ListingRepositoryError {
    map_basic_diesel_error(
        error,
        ListingRepositoryError::query,
        ListingRepositoryError::connection,
    )
}

/// Escape `%`, `_` and `\` so user text matches literally under `ILIKE`.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn corrupt_row(field: &str, err: impl std::fmt::Display) -> ListingRepositoryError {
    ListingRepositoryError::query(format!("stored listing has invalid {field}: {err}"))
}

/// Convert a database row into a validated domain listing.
fn row_to_listing(row: ListingRow) -> Result<Listing, ListingRepositoryError> {
    let ListingRow {
        id,
        code_number,
        slug,
        title,
        description,
        price,
        currency,
        category,
        images,
        country,
        featured,
        urgent,
        badge,
        owner_id,
        views,
        created_at,
        updated_at,
    } = row;

    let record = ListingRecord {
        id: ListingId::from_uuid(id),
        code: ListingCode::from_sequence_value(code_number)
            .map_err(|err| corrupt_row("code", err))?,
        slug: ListingSlug::parse(slug).map_err(|err| corrupt_row("slug", err))?,
        title: ListingTitle::new(&title).map_err(|err| corrupt_row("title", err))?,
        description: ListingDescription::new(&description)
            .map_err(|err| corrupt_row("description", err))?,
        price: Price::new(price).map_err(|err| corrupt_row("price", err))?,
        currency: CurrencyCode::new(&currency).map_err(|err| corrupt_row("currency", err))?,
        category: category
            .parse::<ListingCategory>()
            .map_err(|err| corrupt_row("category", err))?,
        images: parse_images(&images).map_err(|err| corrupt_row("images", err))?,
        country: Country::new(&country).map_err(|err| corrupt_row("country", err))?,
        featured,
        urgent,
        badge: badge
            .as_deref()
            .map(ListingBadge::new)
            .transpose()
            .map_err(|err| corrupt_row("badge", err))?,
        owner: UserId::from_uuid(owner_id),
        views: u64::try_from(views).map_err(|err| corrupt_row("views", err))?,
        created_at,
        updated_at,
    };
    Ok(Listing::from(record))
}

fn views_column(listing: &Listing) -> i64 {
    i64::try_from(listing.views()).unwrap_or(i64::MAX)
}

fn apply_filter<'a>(
    mut query: listings::BoxedQuery<'a, Pg>,
    filter: &ListingFilter,
) -> listings::BoxedQuery<'a, Pg> {
    if filter.featured_only {
        query = query.filter(listings::featured.eq(true));
    }
    if let Some(owner) = filter.owner {
        query = query.filter(listings::owner_id.eq(*owner.as_uuid()));
    }
    if let Some(category) = &filter.category {
        query = query.filter(listings::category.ilike(like_pattern(category)));
    }
    if let Some(text) = &filter.text {
        let pattern = like_pattern(text);
        query = query.filter(
            listings::title
                .ilike(pattern.clone())
                .or(listings::description.ilike(pattern.clone()))
                .or(listings::category.ilike(pattern)),
        );
    }
    if let Some(min) = filter.min_price {
        query = query.filter(listings::price.ge(min));
    }
    if let Some(max) = filter.max_price {
        query = query.filter(listings::price.le(max));
    }
    query
}

#[async_trait]
impl ListingRepository for DieselListingRepository {
    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewListingRow {
            id: *listing.id().as_uuid(),
            code_number: i64::from(listing.code().number()),
            slug: listing.slug().as_str(),
            title: listing.title().as_str(),
            description: listing.description().as_str(),
            price: listing.price().amount(),
            currency: listing.currency().as_str(),
            category: listing.category().as_str(),
            images: listing.images().iter().map(|image| image.as_str()).collect(),
            country: listing.country().as_str(),
            featured: listing.featured(),
            urgent: listing.urgent(),
            badge: listing.badge().map(ListingBadge::as_str),
            owner_id: *listing.owner().as_uuid(),
            views: views_column(listing),
            created_at: listing.created_at(),
            updated_at: listing.updated_at(),
        };

        diesel::insert_into(listings::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    ListingRepositoryError::duplicate_code(listing.code().to_string())
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = listings::table
            .filter(listings::id.eq(id.as_uuid()))
            .select(ListingRow::as_select())
            .first::<ListingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_listing).transpose()
    }

    async fn find_by_code(
        &self,
        code: &ListingCode,
    ) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = listings::table
            .filter(listings::code_number.eq(i64::from(code.number())))
            .select(ListingRow::as_select())
            .first::<ListingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_listing).transpose()
    }

    async fn list(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ListingRow> = apply_filter(listings::table.into_boxed(), filter)
            .order((listings::created_at.desc(), listings::code_number.desc()))
            .select(ListingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_listing).collect()
    }

    async fn update(&self, listing: &Listing) -> Result<bool, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = ListingUpdate {
            slug: listing.slug().as_str(),
            title: listing.title().as_str(),
            description: listing.description().as_str(),
            price: listing.price().amount(),
            currency: listing.currency().as_str(),
            category: listing.category().as_str(),
            images: listing.images().iter().map(|image| image.as_str()).collect(),
            country: listing.country().as_str(),
            featured: listing.featured(),
            urgent: listing.urgent(),
            badge: listing.badge().map(ListingBadge::as_str),
            updated_at: listing.updated_at(),
        };

        let affected = diesel::update(listings::table.filter(listings::id.eq(listing.id().as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn delete(&self, id: &ListingId) -> Result<bool, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(listings::table.filter(listings::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn increment_views(
        &self,
        id: &ListingId,
    ) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(listings::table.filter(listings::id.eq(id.as_uuid())))
            .set(listings::views.eq(listings::views + 1))
            .returning(ListingRow::as_returning())
            .get_result::<ListingRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_listing).transpose()
    }
}
