use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Log row for one outbound email. `status` is filled in when the Mailgun
/// delivery webhook reports back.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmailLog {
    pub id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub message_id: Option<String>,
    pub status: Option<String>,
    pub sent_at: DateTime<Utc>,
}

impl EmailLog {
    pub async fn create(
        recipient: &str,
        subject: &str,
        message_id: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, EmailLog>(
            r#"
            INSERT INTO email_logs (id, recipient, subject, message_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(recipient)
        .bind(subject)
        .bind(message_id)
        .fetch_one(pool)
        .await
    }

    /// Attach a delivery status to the rows with the given provider message
    /// id (one send to several recipients shares an id).
    pub async fn update_status(
        message_id: &str,
        status: &str,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, EmailLog>(
            r#"
            UPDATE email_logs
            SET status = $2
            WHERE message_id = $1
            RETURNING *
            "#,
        )
        .bind(message_id)
        .bind(status)
        .fetch_all(pool)
        .await
    }

    /// Log rows for a recipient, most recent first.
    pub async fn list_for_recipient(
        recipient: &str,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, EmailLog>(
            "SELECT * FROM email_logs WHERE recipient = $1 ORDER BY sent_at DESC",
        )
        .bind(recipient)
        .fetch_all(pool)
        .await
    }
}
