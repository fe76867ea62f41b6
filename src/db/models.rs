use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `schools` table. `id` and `created_at` are assigned by
/// the database and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}
