//! Operator CLI: schema migrations and admin accounts
//!
//! Prints one JSON object per command so scripts can check `success`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sqlx::PgPool;

use adoptlink_core::common::DomainError;
use adoptlink_core::domains::admin::{create_admin, NewAdmin};
use adoptlink_core::kernel::Argon2CredentialHasher;

#[derive(Parser)]
#[command(name = "adoptlink_cli")]
#[command(about = "AdoptLink operator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Create an administrator account
    CreateAdmin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Serialize)]
struct Response {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

fn output(resp: Response) -> Result<()> {
    println!("{}", serde_json::to_string(&resp)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => cmd_migrate().await,
        Commands::CreateAdmin {
            username,
            email,
            password,
        } => cmd_create_admin(username, email, password).await,
    }
}

/// Only the database URL is needed here; the server's other settings may be absent
async fn get_pool() -> Result<PgPool> {
    let _ = dotenvy::dotenv();
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

async fn cmd_migrate() -> Result<()> {
    let pool = get_pool().await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    output(Response {
        success: true,
        message: "Migrations applied".to_string(),
        id: None,
    })
}

async fn cmd_create_admin(username: String, email: String, password: String) -> Result<()> {
    let pool = get_pool().await?;
    let hasher = Argon2CredentialHasher::new();

    let input = NewAdmin {
        username,
        email,
        password,
    };

    match create_admin(input, &hasher, &pool).await {
        Ok(admin) => output(Response {
            success: true,
            message: format!("Admin {} created", admin.email),
            id: Some(admin.id.to_string()),
        }),
        Err(DomainError::Internal(e)) => Err(e.context("Failed to create admin")),
        Err(e) => output(Response {
            success: false,
            message: e.to_string(),
            id: None,
        }),
    }
}
