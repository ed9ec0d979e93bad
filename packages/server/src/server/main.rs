// Main entry point for API server

use std::sync::Arc;

use adoptlink_core::{
    domains::{admin::ensure_bootstrap_admin, auth::JwtService},
    kernel::{Argon2CredentialHasher, ServerDeps},
    server::build_app,
    Config,
};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,adoptlink_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AdoptLink API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let credential_hasher = Arc::new(Argon2CredentialHasher::new());
    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));

    if let Some(bootstrap) = &config.bootstrap_admin {
        let created = ensure_bootstrap_admin(
            &bootstrap.email,
            &bootstrap.password,
            credential_hasher.as_ref(),
            &pool,
        )
        .await
        .context("Failed to create bootstrap admin")?;
        if created {
            tracing::info!(email = %bootstrap.email, "Bootstrap admin created");
        }
    }

    let deps = ServerDeps::new(
        pool,
        credential_hasher,
        jwt_service,
        config.upload_dir.clone(),
    );

    // Build application
    let app = build_app(deps, &config.allowed_origins)?;

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
