use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Log row for one outbound SMS recipient. `status` starts empty and is
/// filled in when the gateway posts a delivery report.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SmsLog {
    pub id: Uuid,
    pub phone_number: String,
    pub message: String,
    pub sender: String,
    pub message_id: Option<String>,
    pub status: Option<String>,
    pub sent_at: DateTime<Utc>,
}

impl SmsLog {
    pub async fn create(
        phone_number: &str,
        message: &str,
        sender: &str,
        message_id: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, SmsLog>(
            r#"
            INSERT INTO sms_logs (id, phone_number, message, sender, message_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(phone_number)
        .bind(message)
        .bind(sender)
        .bind(message_id)
        .fetch_one(pool)
        .await
    }

    /// Attach a delivery status to the log row with the given provider
    /// message id. Returns the updated row, if one matched.
    pub async fn update_status(
        message_id: &str,
        status: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, SmsLog>(
            r#"
            UPDATE sms_logs
            SET status = $2
            WHERE message_id = $1
            RETURNING *
            "#,
        )
        .bind(message_id)
        .bind(status)
        .fetch_optional(pool)
        .await
    }

    /// Log rows for a phone number, most recent first.
    pub async fn list_for_phone(
        phone_number: &str,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, SmsLog>(
            "SELECT * FROM sms_logs WHERE phone_number = $1 ORDER BY sent_at DESC",
        )
        .bind(phone_number)
        .fetch_all(pool)
        .await
    }
}
