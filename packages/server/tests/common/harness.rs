//! Test harness with testcontainers for integration testing.
//!
//! Uses a shared Postgres container across all tests for dramatically
//! improved performance. The container and migrations are initialized once
//! on first test, then reused. Provider clients are built with dummy
//! credentials (nothing in these tests dials out) and publishes are
//! captured by `TestNats`.

use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use africastalking::{AfricasTalkingOptions, AfricasTalkingService};
use mailgun::{MailgunOptions, MailgunService};
use twilio::{TwilioOptions, TwilioService};

use engagement_core::common::{ServiceDeps, TestNats};
use engagement_core::domains::messaging::EventPublisher;
use engagement_core::domains::push::FcmClient;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Respect RUST_LOG when debugging tests; try_init avoids panicking
        // if another test got there first.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness that manages test infrastructure.
///
/// Each test gets a fresh connection pool over freshly truncated tables,
/// plus a full `ServiceDeps` whose publisher writes into `TestNats`.
pub struct TestHarness {
    pub db_pool: PgPool,
    pub deps: Arc<ServiceDeps>,
    pub nats: Arc<TestNats>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        // Tests share one database; start each from a clean slate.
        sqlx::query(
            "TRUNCATE otp_codes, sms_logs, email_logs, message_callbacks, uploads",
        )
        .execute(&db_pool)
        .await
        .context("Failed to truncate tables")?;

        let nats = Arc::new(TestNats::new());
        let publisher = Arc::new(EventPublisher::new(nats.clone(), "test"));

        let deps = Arc::new(ServiceDeps {
            pool: db_pool.clone(),
            sms_gateway: Arc::new(AfricasTalkingService::new(AfricasTalkingOptions {
                username: "sandbox".to_string(),
                api_key: "test-ait-key".to_string(),
                sender_id: "TESTSENDER".to_string(),
                environment: "sandbox".to_string(),
            })),
            twilio: Arc::new(TwilioService::new(TwilioOptions {
                account_sid: "ACtest".to_string(),
                auth_token: "test-token".to_string(),
                whatsapp_sender: "+14155238886".to_string(),
                sms_sender: "+15005550006".to_string(),
            })),
            mailgun: Arc::new(MailgunService::new(MailgunOptions {
                api_key: "key-test".to_string(),
                domain: "sandbox.mailgun.org".to_string(),
                from: "Test <test@example.com>".to_string(),
            })),
            fcm: Arc::new(FcmClient::new("test-fcm-key".to_string())),
            publisher,
        });

        Ok(Self {
            db_pool,
            deps,
            nats,
        })
    }
}
