//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::listings;

/// Row struct for reading from the listings table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = listings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListingRow {
    pub id: Uuid,
    pub code_number: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub category: String,
    pub images: Vec<String>,
    pub country: String,
    pub featured: bool,
    pub urgent: bool,
    pub badge: Option<String>,
    pub owner_id: Uuid,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new listing records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = listings)]
pub(crate) struct NewListingRow<'a> {
    pub id: Uuid,
    pub code_number: i64,
    pub slug: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub currency: &'a str,
    pub category: &'a str,
    pub images: Vec<&'a str>,
    pub country: &'a str,
    pub featured: bool,
    pub urgent: bool,
    pub badge: Option<&'a str>,
    pub owner_id: Uuid,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for the mutable columns of a listing.
///
/// `badge` is written even when `None` so that clearing it sticks.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = listings)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ListingUpdate<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub currency: &'a str,
    pub category: &'a str,
    pub images: Vec<&'a str>,
    pub country: &'a str,
    pub featured: bool,
    pub urgent: bool,
    pub badge: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
