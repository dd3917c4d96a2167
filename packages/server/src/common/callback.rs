use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Raw provider callback payload, stored verbatim for later analysis.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageCallback {
    pub id: Uuid,
    pub provider: String,
    pub payload: serde_json::Value,
    pub received_at: DateTime<Utc>,
}

impl MessageCallback {
    /// Record a callback payload from the named provider.
    pub async fn create(
        provider: &str,
        payload: serde_json::Value,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, MessageCallback>(
            r#"
            INSERT INTO message_callbacks (id, provider, payload)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(provider)
        .bind(payload)
        .fetch_one(pool)
        .await
    }

    /// Callbacks recorded for a provider, most recent first.
    pub async fn list_for_provider(
        provider: &str,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, MessageCallback>(
            "SELECT * FROM message_callbacks WHERE provider = $1 ORDER BY received_at DESC",
        )
        .bind(provider)
        .fetch_all(pool)
        .await
    }
}
