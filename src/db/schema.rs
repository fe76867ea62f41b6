//! SQL DDL for the school directory table.

/// SQLite schema:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT, so ids are never reused
///   after a delete
/// - `created_at` RFC3339 UTC text, set by the database at insert
///
/// String length caps (50 for name, 255 for address) are enforced at the
/// validation layer; SQLite ignores varchar widths.
pub const SCHOOLS_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS schools (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    address TEXT NOT NULL,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
"#;
