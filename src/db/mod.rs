//! Database module: model, schema, and the pooled CRUD gateway.
//!
//! Layout:
//! - `models.rs`: Rust struct mirroring a `schools` row
//! - `schema.rs`: SQL DDL for initializing the database
//! - `store.rs`: parameterized queries behind a bounded connection pool

pub mod models;
pub mod schema;
pub mod store;

pub use models::School;
pub use schema::SCHOOLS_INIT;
pub use store::{SchoolStore, SqlitePool, connect};
