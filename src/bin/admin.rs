//! CLI administration tool for shortr.
//!
//! Provides commands for inspecting stored links and checking the database
//! without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # View link statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use shortr::domain::repositories::LinkRepository;
use shortr::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortr.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show link statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connectivity
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Stats => show_stats(pool).await,
        Commands::Db {
            action: DbAction::Check,
        } => check_db(pool).await,
    }
}

async fn show_stats(pool: PgPool) -> Result<()> {
    let repository = PgLinkRepository::new(Arc::new(pool));

    let total = repository.count().await?;
    println!("{} {}", "Total links:".bold(), total);

    let recent = repository.list_recent(5).await?;
    if recent.is_empty() {
        println!("{}", "No links yet".yellow());
        return Ok(());
    }

    println!("\n{}", "Most recent:".bold());
    for link in recent {
        println!(
            "  {}  {}  {}",
            link.code.green(),
            link.created_at.format("%Y-%m-%d %H:%M:%S"),
            link.original_url
        );
    }

    Ok(())
}

async fn check_db(pool: PgPool) -> Result<()> {
    let version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(&pool)
        .await
        .context("Connectivity check failed")?;

    println!("{}", "Database connection OK".green().bold());
    println!("{}", version);

    Ok(())
}
