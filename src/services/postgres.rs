use async_trait::async_trait;
use crate::core::repository::{NotificationSink, RepositoryError};
use crate::models::{Casting, MatchResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

impl From<PostgresError> for RepositoryError {
    fn from(err: PostgresError) -> Self {
        RepositoryError::Backend(err.to_string())
    }
}

/// PostgreSQL client for the match notification outbox
///
/// Top matches are written to `match_notifications`; the delivery service
/// (email, push, chat) drains the table independently.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Write one outbox row per match, in rank order
    pub async fn record_top_matches(
        &self,
        casting: &Casting,
        matches: &[MatchResult],
    ) -> Result<u64, PostgresError> {
        let query = r#"
            INSERT INTO match_notifications (id, casting_id, model_id, score, rank, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (casting_id, model_id)
            DO UPDATE SET
                score = EXCLUDED.score,
                rank = EXCLUDED.rank
        "#;

        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for (index, m) in matches.iter().enumerate() {
            let result = sqlx::query(query)
                .bind(uuid::Uuid::new_v4())
                .bind(&casting.id)
                .bind(&m.model_id)
                .bind(m.score)
                .bind(index as i32 + 1)
                .execute(&mut *tx)
                .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;

        tracing::debug!(
            "Queued {} match notifications for casting {}",
            written,
            casting.id
        );

        Ok(written)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl NotificationSink for PostgresClient {
    async fn notify_top_matches(
        &self,
        casting: &Casting,
        matches: &[MatchResult],
    ) -> Result<(), RepositoryError> {
        self.record_top_matches(casting, matches).await?;
        Ok(())
    }
}
