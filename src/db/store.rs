use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use crate::db::models::School;
use crate::db::schema::SCHOOLS_INIT;
use crate::error::ApiError;

pub type SqlitePool = Pool<Sqlite>;

/// Pool ceiling; acquisitions past it queue rather than fail.
const MAX_CONNECTIONS: u32 = 10;

/// Open the database (creating the file when missing) and wrap the pool
/// in a [`SchoolStore`].
pub async fn connect(database_url: &str) -> Result<SchoolStore, ApiError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await?;
    Ok(SchoolStore::new(pool))
}

/// CRUD gateway for the `schools` table. Every statement is parameterized
/// through `bind`; user input never reaches the SQL text.
#[derive(Clone)]
pub struct SchoolStore {
    pool: SqlitePool,
}

impl SchoolStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Connectivity check; startup aborts when this fails.
    pub async fn ping(&self) -> Result<(), ApiError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), ApiError> {
        // execute statement-by-statement (sqlx::query rejects multi-commands)
        for stmt in SCHOOLS_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert one school, returning the generated id.
    pub async fn create(
        &self,
        name: &str,
        address: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<i64, ApiError> {
        let result = sqlx::query(
            "INSERT INTO schools (name, address, latitude, longitude) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(address)
        .bind(latitude)
        .bind(longitude)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<School>, ApiError> {
        let row = sqlx::query(
            "SELECT id, name, address, latitude, longitude, created_at FROM schools WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_model).transpose()
    }

    pub async fn list_all(&self) -> Result<Vec<School>, ApiError> {
        let rows = sqlx::query(
            "SELECT id, name, address, latitude, longitude, created_at FROM schools ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    /// Update every caller-mutable field. Returns the affected-row count;
    /// zero means no such id.
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        address: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<u64, ApiError> {
        let result = sqlx::query(
            "UPDATE schools SET name = ?, address = ?, latitude = ?, longitude = ? WHERE id = ?",
        )
        .bind(name)
        .bind(address)
        .bind(latitude)
        .bind(longitude)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Single atomic DELETE; the affected count distinguishes a missing row.
    pub async fn delete_by_id(&self, id: i64) -> Result<u64, ApiError> {
        let result = sqlx::query("DELETE FROM schools WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    fn row_to_model(row: SqliteRow) -> Result<School, ApiError> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let address: String = row.try_get("address")?;
        let latitude: f64 = row.try_get("latitude")?;
        let longitude: f64 = row.try_get("longitude")?;
        let created_at_str: String = row.try_get("created_at")?;

        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc);

        Ok(School {
            id,
            name,
            address,
            latitude,
            longitude,
            created_at,
        })
    }
}
