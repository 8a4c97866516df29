//! CLI administration tool for shortlink.
//!
//! Manages short URLs directly through the same service the HTTP server uses,
//! so cache invalidation applies to edits made here.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- url shorten https://example.com/some/long/path
//!
//! # Show a stored record
//! cargo run --bin admin -- url show aZ3kP9q
//!
//! # Point a code at a new URL
//! cargo run --bin admin -- url update aZ3kP9q https://example.com/new
//!
//! # Delete a code (asks for confirmation unless -y)
//! cargo run --bin admin -- url delete aZ3kP9q
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `shortlink::config`.

use shortlink::application::services::UrlService;
use shortlink::config::{self, Config};
use shortlink::domain::entities::UrlRecord;
use shortlink::server::{build_url_service, connect_database};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;

/// CLI tool for managing shortlink.
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
    /// Manage short URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Short URL subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// Shorten a URL (returns the existing code if already shortened)
    Shorten {
        /// Origin URL (http or https)
        url: String,
    },

    /// Show the stored record for a code
    Show { code: String },

    /// Point a code at a new origin URL
    Update { code: String, url: String },

    /// Delete a code
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Url { action } => {
            let service = build_url_service(&config).await?;
            handle_url_action(action, &service).await?
        }
        Commands::Stats => handle_stats(&connect_database(&config).await?).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

/// Dispatches short URL commands.
async fn handle_url_action(action: UrlAction, service: &UrlService) -> Result<()> {
    match action {
        UrlAction::Shorten { url } => {
            let code = service.create(&url).await?;

            println!("{}", "✅ Short URL ready".green().bold());
            println!("  Code:  {}", code.bright_yellow().bold());
            println!(
                "  URL:   {}",
                service.build_short_url(&code).to_string().cyan()
            );
        }
        UrlAction::Show { code } => {
            let record = service.get_record(&code).await?;

            println!("{}", "🔗 Short URL".bright_blue().bold());
            println!("  Code:    {}", record.short_code.bright_yellow());
            println!("  Origin:  {}", record.origin_url.cyan());
            println!(
                "  Short:   {}",
                service.build_short_url(&record.short_code).to_string()
            );
            println!(
                "  Created: {}",
                record
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
        UrlAction::Update { code, url } => {
            service.update(&UrlRecord::new(code.clone(), url.clone())).await?;

            println!("{}", "✅ Short URL updated".green().bold());
            println!("  {} → {}", code.bright_yellow(), url.cyan());
        }
        UrlAction::Delete { code, yes } => {
            let record = service.get_record(&code).await?;

            println!("  Code:   {}", record.short_code.bright_yellow());
            println!("  Origin: {}", record.origin_url.cyan());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete this short URL?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            service.delete(&code).await?;

            println!("{}", "✅ Short URL deleted".green().bold());
        }
    }

    Ok(())
}

/// Displays record counts.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let origins_count: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT origin_url) FROM urls")
        .fetch_one(pool)
        .await?;

    println!(
        "  Short URLs:      {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Distinct origins: {}",
        origins_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    let pool = connect_database(config).await?;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_url_delete_with_yes() {
        let cli = Cli::try_parse_from(["admin", "url", "delete", "aZ3kP9q", "-y"]).unwrap();

        assert!(matches!(
            cli.command,
            Commands::Url {
                action: UrlAction::Delete { ref code, yes: true }
            } if code == "aZ3kP9q"
        ));
    }

    #[test]
    fn test_parses_stats_and_db_commands() {
        let cli = Cli::try_parse_from(["admin", "stats"]).unwrap();
        assert!(matches!(cli.command, Commands::Stats));

        let cli = Cli::try_parse_from(["admin", "db", "check"]).unwrap();
        assert!(matches!(cli.command, Commands::Db { action: DbAction::Check }));

        let cli = Cli::try_parse_from(["admin", "db", "info"]).unwrap();
        assert!(matches!(cli.command, Commands::Db { action: DbAction::Info }));
    }

    #[test]
    fn test_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["admin", "links", "list"]).is_err());
    }
}
