//! Test harness with testcontainers for integration testing.
//!
//! One Postgres container and one migration run are shared by every test in
//! the binary. Tests isolate themselves with unique emails and caring ids
//! rather than truncating tables.

use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use tower::ServiceExt;
use uuid::Uuid;

use adoptlink_core::common::Role;
use adoptlink_core::domains::auth::JwtService;
use adoptlink_core::kernel::{PlaintextCredentialHasher, ServerDeps};
use adoptlink_core::server::build_app;

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

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

/// Per-test context: a fresh pool on the shared database plus test doubles.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let outcome = register_parent(request, &ctx.hasher, &ctx.db_pool).await;
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    pub hasher: PlaintextCredentialHasher,
    pub jwt_service: Arc<JwtService>,
    pub upload_dir: PathBuf,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        let _ = tokio::fs::remove_dir_all(&self.upload_dir).await;
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self {
            db_pool,
            hasher: PlaintextCredentialHasher::new(),
            jwt_service: Arc::new(JwtService::new("test_secret_key", "test_issuer".to_string())),
            upload_dir: std::env::temp_dir().join(format!("adoptlink-test-{}", Uuid::now_v7())),
        })
    }

    pub fn deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.db_pool.clone(),
            Arc::new(self.hasher.clone()),
            self.jwt_service.clone(),
            self.upload_dir.clone(),
        )
    }

    /// Full router, as the server binary builds it
    pub fn app(&self) -> Router {
        build_app(self.deps(), &[]).expect("Failed to build app")
    }

    pub fn token_for(&self, subject: Uuid, role: Role) -> String {
        self.jwt_service
            .create_token(subject, role, format!("{}@test.local", role))
            .expect("Failed to create token")
    }

    /// Send one request through the router and decode the JSON body
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        dispatch(self.app(), request, SocketAddr::from(([127, 0, 0, 1], 40000))).await
    }
}

/// Drive `app` with a request arriving from `peer`, as the server binary's
/// connect-info service would see it
pub async fn dispatch(
    app: Router,
    mut request: Request<Body>,
    peer: SocketAddr,
) -> (StatusCode, Value) {
    request.extensions_mut().insert(ConnectInfo(peer));
    let response = app.oneshot(request).await.expect("Router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
