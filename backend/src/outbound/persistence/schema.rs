//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Classified listings.
    ///
    /// `code_number` is drawn from `listing_code_seq` and rendered as
    /// `LST00001` at the domain boundary.
    listings (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique sequence number behind the public listing code.
        code_number -> Int8,
        slug -> Varchar,
        title -> Varchar,
        description -> Text,
        price -> Float8,
        currency -> Varchar,
        /// Category display name.
        category -> Varchar,
        images -> Array<Text>,
        country -> Varchar,
        featured -> Bool,
        urgent -> Bool,
        badge -> Nullable<Varchar>,
        owner_id -> Uuid,
        views -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
