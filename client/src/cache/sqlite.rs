//! SQLite-backed durable cache.

use std::str::FromStr;

use async_trait::async_trait;
use roster_engine::{Error, IdSet, Record, RecordId, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::CacheStore;

/// Durable cache stored in a single `users` table.
///
/// Each row holds the record's JSON-encoded id as key and the full record as
/// JSON text, so integer and string ids never collide.
#[derive(Debug, Clone)]
pub struct SqliteCache {
    pool: SqlitePool,
}

impl SqliteCache {
    /// Open (creating if missing) the database at `url` and run migrations.
    pub async fn connect(url: &str) -> crate::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // A single connection keeps `sqlite::memory:` databases shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        tracing::info!(url = %url, "Running cache migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Wrap an already migrated pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn unavailable(e: sqlx::Error) -> Error {
    Error::CacheUnavailable(e.to_string())
}

fn encode_id(id: &RecordId) -> Result<String> {
    serde_json::to_string(id).map_err(|e| Error::CacheUnavailable(e.to_string()))
}

#[async_trait]
impl CacheStore for SqliteCache {
    async fn read_all(&self) -> Result<Vec<Record>> {
        let rows = sqlx::query_scalar::<_, String>("SELECT record FROM users")
            .fetch_all(&self.pool)
            .await
            .map_err(unavailable)?;

        tracing::debug!(count = rows.len(), "Read records from cache");

        rows.iter()
            .map(|row| {
                serde_json::from_str::<Record>(row)
                    .map_err(|e| Error::MalformedRecord(e.to_string()))
            })
            .collect()
    }

    async fn upsert(&self, records: &[Record]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(unavailable)?;

        for record in records {
            let id = encode_id(record.id())?;
            let body =
                serde_json::to_string(record).map_err(|e| Error::CacheUnavailable(e.to_string()))?;

            sqlx::query(
                r#"
                INSERT INTO users (id, record)
                VALUES (?1, ?2)
                ON CONFLICT (id) DO UPDATE SET record = excluded.record
                "#,
            )
            .bind(id)
            .bind(body)
            .execute(&mut *tx)
            .await
            .map_err(unavailable)?;
        }

        tx.commit().await.map_err(unavailable)?;
        tracing::debug!(count = records.len(), "Upserted records into cache");
        Ok(())
    }

    async fn remove(&self, ids: &IdSet) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(unavailable)?;

        for id in ids {
            sqlx::query("DELETE FROM users WHERE id = ?1")
                .bind(encode_id(id)?)
                .execute(&mut *tx)
                .await
                .map_err(unavailable)?;
        }

        tx.commit().await.map_err(unavailable)?;
        tracing::debug!(count = ids.len(), "Removed records from cache");
        Ok(())
    }
}
