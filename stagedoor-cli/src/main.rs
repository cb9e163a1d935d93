//! stagedoor CLI - venue, artist, and show booking directory
//!
//! Subcommands:
//! - `serve`: run the HTTP server (migrations run at startup)
//! - `migrate`: run schema migrations and exit

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use stagedoor_server::db::{create_pool, migrations};
use stagedoor_server::{run_server, ServerConfig};

mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "stagedoor",
    author,
    version,
    about = "Server-rendered booking directory for venues, artists, and shows"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Run schema migrations and exit
    Migrate(MigrateArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030")]
    bind: SocketAddr,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
struct MigrateArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

fn require_database_url(arg: Option<String>) -> Result<String> {
    arg.or_else(|| std::env::var("DATABASE_URL").ok())
        .context("DATABASE_URL not set. Set via --database-url, the DATABASE_URL env var, or .env")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => {
            let database_url = require_database_url(args.database_url)?;

            tracing::info!("Starting stagedoor server on {}", args.bind);
            let pool = create_pool(&database_url)
                .await
                .context("Failed to create database pool")?;

            let config = ServerConfig { bind_addr: args.bind };
            run_server(pool, config).await.context("Server error")?;
        }
        Commands::Migrate(args) => {
            let database_url = require_database_url(args.database_url)?;

            let pool = create_pool(&database_url)
                .await
                .context("Failed to create database pool")?;
            migrations::run(&pool).await.context("Migrations failed")?;
            tracing::info!("Migrations applied");
        }
    }

    Ok(())
}
