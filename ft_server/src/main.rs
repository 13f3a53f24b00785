//! Football tournament API server.
//!
//! Serves the REST API over PostgreSQL, or over a process-local store with
//! `--in-memory`.

use std::net::SocketAddr;

use anyhow::{Context, Error};
use football_tournament::db::{Database, Repositories};
use ft_server::{api, config::ServerConfig, logging};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Run the football tournament API server

USAGE:
  ft_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 0.0.0.0:$API_PORT (8080)]
  --db-url     URL         Database connection string  [default: env DATABASE_URL or composed from DB_*]

FLAGS:
  --in-memory              Keep all data in process memory instead of PostgreSQL
  --skip-migrations        Do not apply schema migrations at startup
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  API_PORT                 Port used when SERVER_BIND is unset
  DATABASE_URL             PostgreSQL connection string
  DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME
                           Connection parts used when DATABASE_URL is unset
  RUST_LOG                 Log filter (default: info,sqlx=warn,hyper=warn)
  (See .env file for all configuration options)
";

struct Args {
    bind: Option<SocketAddr>,
    database_url: Option<String>,
    in_memory: bool,
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        database_url: pargs.opt_value_from_str("--db-url")?,
        in_memory: pargs.contains("--in-memory"),
        skip_migrations: pargs.contains("--skip-migrations"),
    };

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.database_url)?;
    config.validate()?;

    let (repos, db) = if args.in_memory {
        info!("Using in-memory storage; data is lost on exit");
        (Repositories::in_memory(), None)
    } else {
        info!("Connecting to database: {}", config.database.redacted_url());
        let db = Database::connect(&config.database)
            .await
            .context("Failed to connect to database")?;

        if args.skip_migrations {
            info!("Skipping database migrations");
        } else {
            db.migrate().await.context("Failed to run migrations")?;
        }

        (Repositories::postgres(&db), Some(db))
    };

    let app = api::create_router(api::AppState::new(&repos));

    info!("Starting HTTP server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down server...");
    if let Some(db) = db {
        db.close().await;
        info!("Database pool closed");
    }

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
}
