use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

/// One recorded vote. At most one row exists per voter token; re-voting
/// rewrites `photo_id` and `updated_at` in place.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteRow {
    pub voter_token: String,
    pub photo_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Durable vote store over a single sqlite file.
#[derive(Clone)]
pub struct Ledger {
    pool: SqlitePool,
}

impl Ledger {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::init(pool).await
    }

    /// Private in-memory database, one connection so every query sees the
    /// same data. Used by tests.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::init(pool).await
    }

    async fn init(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS votes (
                voter_token TEXT PRIMARY KEY,
                photo_id TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_votes_photo_id ON votes(photo_id)")
            .execute(&pool)
            .await?;

        Ok(Self { pool })
    }

    /// Records or replaces the voter's choice in one statement, so two
    /// submissions with the same token can never interleave into a
    /// half-written row. `created_at` survives an overwrite.
    pub async fn upsert(
        &self,
        voter_token: &str,
        photo_id: &str,
        now_ms: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO votes (voter_token, photo_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT(voter_token) DO UPDATE
             SET photo_id = excluded.photo_id, updated_at = excluded.updated_at",
        )
        .bind(voter_token)
        .bind(photo_id)
        .bind(now_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Grouped vote counts, one entry per distinct voted photo id.
    pub async fn counts_by_photo(&self) -> Result<HashMap<String, i64>, sqlx::Error> {
        let rows = sqlx::query("SELECT photo_id, COUNT(*) AS votes FROM votes GROUP BY photo_id")
            .fetch_all(&self.pool)
            .await?;

        let mut counts = HashMap::with_capacity(rows.len());
        for row in rows {
            counts.insert(row.try_get("photo_id")?, row.try_get("votes")?);
        }
        Ok(counts)
    }

    pub async fn total_count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM votes")
            .fetch_one(&self.pool)
            .await
    }

    pub async fn find(&self, voter_token: &str) -> Result<Option<VoteRow>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT voter_token, photo_id, created_at, updated_at
             FROM votes WHERE voter_token = ?1",
        )
        .bind(voter_token)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(VoteRow {
                voter_token: row.try_get("voter_token")?,
                photo_id: row.try_get("photo_id")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })
        })
        .transpose()
    }
}
