//! OTP persistence and verification flow against a real Postgres.
//!
//! Delivery is not exercised here (it would dial real providers); these
//! tests drive the store and the verification logic end to end.

mod common;

use common::TestHarness;
use test_context::test_context;

use engagement_core::common::EngagementError;
use engagement_core::domains::otp::actions::{generate_code, verify_otp, OTP_CODE_LENGTH};
use engagement_core::domains::otp::OtpCode;

const TEST_PHONE: &str = "+254711223344";

#[test_context(TestHarness)]
#[tokio::test]
async fn save_then_find_latest_returns_the_saved_record(ctx: &mut TestHarness) {
    let saved = OtpCode::save(TEST_PHONE, "1234", &ctx.db_pool)
        .await
        .expect("save should succeed");

    let found = OtpCode::find_latest(TEST_PHONE, &ctx.db_pool)
        .await
        .expect("find_latest should succeed")
        .expect("record should exist");

    assert_eq!(found, saved);
    assert_eq!(found.code, "1234");
    assert!(found.is_valid);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn a_fresh_code_supersedes_the_previous_one(ctx: &mut TestHarness) {
    OtpCode::save(TEST_PHONE, "1111", &ctx.db_pool).await.unwrap();
    OtpCode::save(TEST_PHONE, "2222", &ctx.db_pool).await.unwrap();

    let found = OtpCode::find_latest(TEST_PHONE, &ctx.db_pool)
        .await
        .unwrap()
        .expect("record should exist");
    assert_eq!(found.code, "2222", "latest code should win");
    assert!(found.is_valid, "superseding record should start valid");

    // The superseded code no longer verifies.
    let verified = verify_otp(TEST_PHONE, "1111", &ctx.deps).await.unwrap();
    assert!(!verified, "stale code must not validate");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn verify_consumes_the_code(ctx: &mut TestHarness) {
    OtpCode::save(TEST_PHONE, "1234", &ctx.db_pool).await.unwrap();

    let first = verify_otp(TEST_PHONE, "1234", &ctx.deps).await.unwrap();
    assert!(first, "correct code should verify");

    let second = verify_otp(TEST_PHONE, "1234", &ctx.deps).await.unwrap();
    assert!(!second, "a consumed code must not verify again");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn verify_accepts_unnormalized_input_forms(ctx: &mut TestHarness) {
    OtpCode::save(TEST_PHONE, "1234", &ctx.db_pool).await.unwrap();

    // National form normalizes to the stored identifier.
    let verified = verify_otp("0711223344", "1234", &ctx.deps).await.unwrap();
    assert!(verified);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_identifier_is_not_found(ctx: &mut TestHarness) {
    let err = verify_otp("+999000111222", "1234", &ctx.deps)
        .await
        .expect_err("unknown identifier should error, never verify");
    assert!(matches!(err, EngagementError::NotFound(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn mismatch_leaves_the_record_valid(ctx: &mut TestHarness) {
    OtpCode::save(TEST_PHONE, "1234", &ctx.db_pool).await.unwrap();

    let wrong = verify_otp(TEST_PHONE, "0000", &ctx.deps).await.unwrap();
    assert!(!wrong);

    // No lockout: the right code still works afterwards.
    let right = verify_otp(TEST_PHONE, "1234", &ctx.deps).await.unwrap();
    assert!(right);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn expired_codes_do_not_verify(ctx: &mut TestHarness) {
    OtpCode::save(TEST_PHONE, "1234", &ctx.db_pool).await.unwrap();

    // Age the record past the 60 minute window.
    sqlx::query("UPDATE otp_codes SET created_at = now() - interval '2 hours' WHERE identifier = $1")
        .bind(TEST_PHONE)
        .execute(&ctx.db_pool)
        .await
        .unwrap();

    let verified = verify_otp(TEST_PHONE, "1234", &ctx.deps).await.unwrap();
    assert!(!verified, "codes older than the validity window must not verify");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn malformed_phone_numbers_fail_fast(ctx: &mut TestHarness) {
    let err = verify_otp("711223344", "1234", &ctx.deps)
        .await
        .expect_err("national form without a zero prefix is invalid");
    assert!(matches!(err, EngagementError::Validation(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn email_identifiers_use_their_own_records(ctx: &mut TestHarness) {
    OtpCode::save("user@example.com", "5678", &ctx.db_pool)
        .await
        .unwrap();

    use engagement_core::domains::otp::actions::verify_email_otp;

    // Lookup is case-insensitive because identifiers are lowercased.
    let verified = verify_email_otp("User@Example.com", "5678", &ctx.deps)
        .await
        .unwrap();
    assert!(verified);
}

#[tokio::test]
async fn generated_codes_are_well_formed() {
    let code = generate_code();
    assert_eq!(code.len(), OTP_CODE_LENGTH);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}
