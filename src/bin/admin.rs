//! CLI administration tool for shortlink-api.
//!
//! # Usage
//!
//! ```bash
//! # Show totals
//! cargo run --bin admin -- stats
//!
//! # List a user's entries
//! cargo run --bin admin -- urls Kathy
//!
//! # Delete an entry (owner-scoped with --user)
//! cargo run --bin admin -- delete 42 --user Kathy
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use shortlink_api::application::services::ShortenerService;
use shortlink_api::config::mask_connection_string;
use shortlink_api::server::build_service;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink-api.
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
    /// Show totals for entries, accesses and users
    Stats,

    /// List the entries owned by a user
    Urls {
        /// Owning username (exact match)
        user: String,
    },

    /// Delete an entry by id
    Delete {
        /// Entry id
        id: i64,

        /// Only delete if this user owns the entry
        #[arg(short, long)]
        user: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
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
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Urls { user } => {
            let service = build_service(Arc::new(pool.clone()));
            list_urls(&service, &user).await?;
        }
        Commands::Delete { id, user, yes } => {
            let service = build_service(Arc::new(pool.clone()));
            delete_url(&service, id, user, yes).await?;
        }
        Commands::Db { action } => match action {
            DbAction::Check => check_db(&pool, &database_url).await?,
        },
    }

    Ok(())
}

/// Displays totals for entries, recorded accesses and distinct users.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let stats_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stats")
        .fetch_one(pool)
        .await?;

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT username) FROM urls")
        .fetch_one(pool)
        .await?;

    println!(
        "  URL entries: {}",
        urls_count.to_string().bright_white().bold()
    );
    println!(
        "  Accesses:    {}",
        stats_count.to_string().bright_white().bold()
    );
    println!(
        "  Users:       {}",
        users_count.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Lists the entries owned by `user`.
///
/// # Output Format
///
/// ```text
///   ID   Short      Long URL
///   1    47fa8b24   https://reddit.com
/// ```
async fn list_urls(service: &ShortenerService, user: &str) -> Result<()> {
    println!(
        "{} {}",
        "URLs owned by".bright_blue().bold(),
        user.cyan().bold()
    );
    println!();

    let entries = service
        .list_for_user(user)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list URLs: {}", e))?;

    if entries.is_empty() {
        println!("{}", "  No URLs found".yellow());
        return Ok(());
    }

    println!(
        "  {:<6} {:<10} {}",
        "ID".bright_white().bold(),
        "Short".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "-".repeat(60).bright_black());

    for entry in &entries {
        println!(
            "  {:<6} {:<10} {}",
            entry.id.to_string().bright_black(),
            entry.short_url.cyan(),
            entry.long_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        entries.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes an entry after confirmation.
///
/// With `--user`, deletion goes through the owner check and silently does
/// nothing for a foreign entry, matching the HTTP API.
async fn delete_url(
    service: &ShortenerService,
    id: i64,
    user: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Delete URL".bright_blue().bold());
    println!();

    let Some(entry) = service
        .get_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    else {
        println!("{}", "  URL not found".yellow());
        return Ok(());
    };

    println!("  ID:       {}", entry.id.to_string().bright_black());
    println!("  Short:    {}", entry.short_url.cyan());
    println!("  Long URL: {}", entry.long_url);
    println!("  Owner:    {}", entry.username.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let result = match &user {
        Some(user) => service.delete_for_user_by_id(user, id).await,
        None => service.delete_by_id(id).await,
    };
    result.map_err(|e| anyhow::anyhow!("Failed to delete URL: {}", e))?;

    let still_present = service
        .get_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .is_some();

    if still_present {
        println!("{}", "URL was not deleted (owner mismatch)".yellow());
    } else {
        println!("{}", "URL deleted".green().bold());
    }
    println!();

    Ok(())
}

/// Checks that the database answers a trivial query.
async fn check_db(pool: &PgPool, database_url: &str) -> Result<()> {
    println!("{}", "Database check".bright_blue().bold());
    println!();
    println!("  URL: {}", mask_connection_string(database_url).bright_black());

    let version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(pool)
        .await
        .context("Database query failed")?;

    println!("  {}", "Connected".green().bold());
    println!("  {}", version.bright_black());
    println!();

    Ok(())
}
