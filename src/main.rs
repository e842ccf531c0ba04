//! CoLab Connect server
//!
//! Runs the REST API for posting collaboration projects, handling join
//! requests and project chat.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use colab_api::{ApiServer, ApiServerConfig};

/// CoLab Connect - collaboration project server
#[derive(Parser, Debug)]
#[command(name = "colab-connect")]
#[command(about = "CoLab Connect - collaboration project server")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the API server
    #[command(long_about = r#"
Run the CoLab Connect API server. Migrations are applied on startup.

EXAMPLES:
  # Development, in-memory SQLite
  colab-connect serve --database-url "sqlite::memory:" \
    --jwt-secret dev-secret

  # Production, PostgreSQL
  colab-connect serve --bind 0.0.0.0:8080 \
    --database-url "postgres://colab:secret@db/colab" \
    --jwt-secret $COLAB_JWT_SECRET

ENVIRONMENT VARIABLES:
  COLAB_BIND          Address to bind the API server
  COLAB_DATABASE_URL  Database connection string
  COLAB_JWT_SECRET    Secret for signing session tokens
    "#)]
    Serve {
        /// Address to bind the API server (e.g. 0.0.0.0:8080)
        #[arg(long, env = "COLAB_BIND", default_value = "127.0.0.1:8080")]
        bind: SocketAddr,

        /// Database connection string (sqlite:// or postgres://)
        #[arg(
            long,
            env = "COLAB_DATABASE_URL",
            default_value = "sqlite://colab.db?mode=rwc"
        )]
        database_url: String,

        /// Secret used to sign session tokens
        #[arg(long, env = "COLAB_JWT_SECRET")]
        jwt_secret: String,

        /// Disable new account registration
        #[arg(long)]
        disable_signup: bool,

        /// Disable the development CORS layer
        #[arg(long)]
        no_cors: bool,
    },
}

/// Setup logging with the specified log level
fn setup_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    info!(
        "colab-connect {} ({} built {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIME")
    );

    match cli.command {
        Commands::Serve {
            bind,
            database_url,
            jwt_secret,
            disable_signup,
            no_cors,
        } => {
            info!("Connecting to database: {}", database_url);
            let db = colab_db::connect(&database_url)
                .await
                .context("Failed to connect to database")?;

            colab_db::migrate(&db)
                .await
                .context("Failed to run database migrations")?;

            // Repair projects created before owner rows were written on create
            let repaired = colab_core::members::backfill_owners(&db)
                .await
                .context("Failed to backfill owner memberships")?;
            if repaired > 0 {
                info!("Backfilled {} owner membership(s)", repaired);
            }

            let config = ApiServerConfig {
                bind_addr: bind,
                enable_cors: !no_cors,
                jwt_secret,
                allow_signup: !disable_signup,
            };

            let server = ApiServer::new(config, db);
            server.start().await
        }
    }
}
