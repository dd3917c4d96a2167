use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// OTP record - one per identifier (E.164 phone number or lowercased email).
///
/// The store is a keyed overwrite: saving a fresh code for an identifier
/// supersedes the previous one, so verification only ever sees the latest
/// code. Records are invalidated on use, never physically deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OtpCode {
    pub identifier: String,
    pub code: String,
    pub is_valid: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl OtpCode {
    /// Upsert the code for an identifier. Any previous code is overwritten
    /// and the fresh record starts out valid.
    pub async fn save(
        identifier: &str,
        code: &str,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, OtpCode>(
            r#"
            INSERT INTO otp_codes (identifier, code, is_valid, created_at)
            VALUES ($1, $2, TRUE, now())
            ON CONFLICT (identifier) DO UPDATE
                SET code = EXCLUDED.code,
                    is_valid = TRUE,
                    created_at = now()
            RETURNING *
            "#,
        )
        .bind(identifier)
        .bind(code)
        .fetch_one(pool)
        .await
    }

    /// The most recent (and only) record for an identifier, if any.
    pub async fn find_latest(
        identifier: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, OtpCode>("SELECT * FROM otp_codes WHERE identifier = $1")
            .bind(identifier)
            .fetch_optional(pool)
            .await
    }

    /// Mark the identifier's record as consumed.
    pub async fn invalidate(identifier: &str, pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE otp_codes SET is_valid = FALSE WHERE identifier = $1")
            .bind(identifier)
            .execute(pool)
            .await?;
        Ok(())
    }
}
