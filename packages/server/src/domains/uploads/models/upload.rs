use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Stored upload: content plus integrity metadata.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Upload {
    pub id: Uuid,
    pub title: String,
    pub content_type: String,
    pub language: String,
    pub size: i64,
    pub hash: String,
    pub base64data: String,
    pub url: String,
    pub creation_time: DateTime<Utc>,
}

impl Upload {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        id: Uuid,
        title: &str,
        content_type: &str,
        language: &str,
        size: i64,
        hash: &str,
        base64data: &str,
        url: &str,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Upload>(
            r#"
            INSERT INTO uploads
                (id, title, content_type, language, size, hash, base64data, url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(content_type)
        .bind(language)
        .bind(size)
        .bind(hash)
        .bind(base64data)
        .bind(url)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Upload>("SELECT * FROM uploads WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
