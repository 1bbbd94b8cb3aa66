//! Portfolio backend entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portfolio_api::api::{create_router, AppState};
use portfolio_api::config::Config;
use portfolio_api::notify;
use portfolio_api::store::{DocumentStore, MongoStore};
use portfolio_api::utils::shutdown_signal;

/// Portfolio website backend.
#[derive(Parser, Debug)]
#[command(name = "portfolio-api")]
#[command(about = "Backend API for status checks and contact-form submissions")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Run {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Check document store connectivity.
    CheckStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("portfolio_api=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::CheckStore) => cmd_check_store().await,
        Some(Command::Run { port }) => cmd_run(port).await,
        None => cmd_run(args.port).await,
    }
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("PORTFOLIO API - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Database: {}", config.db_name);
    println!("  Port: {}", effective_port(&config, None));
    println!("  CORS Origins: {}", config.cors_origins);
    println!(
        "  Mail Relay: {}",
        match config.smtp() {
            Some(smtp) => format!("{}:{} (notifying {})", smtp.host, smtp.port, smtp.recipient),
            None if config.smtp_partially_configured() =>
                "INCOMPLETE - notifications disabled".to_string(),
            None => "not configured - notifications disabled".to_string(),
        }
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Check document store connectivity.
async fn cmd_check_store() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("PORTFOLIO API - STORE CHECK");
    println!("======================================================================");

    let config = Config::load()?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    println!("Database: {}", config.db_name);
    println!("======================================================================");

    // Connect
    print!("\n1. Connecting to store... ");
    let store = MongoStore::connect(&config.mongo_url, &config.db_name).await?;
    println!("OK");

    // Ping
    print!("\n2. Pinging... ");
    match store.ping().await {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("   Error: {}", e);
            store.close().await;
            return Err(anyhow::anyhow!("Store ping failed"));
        }
    }

    // Collection counts
    print!("\n3. Counting documents... ");
    match store.collection_counts().await {
        Ok((status, contacts)) => {
            println!("OK");
            println!("   status_checks: {}", status);
            println!("   contact_messages: {}", contacts);
        }
        Err(e) => {
            println!("FAILED");
            println!("   Error: {}", e);
        }
    }

    store.close().await;

    println!("\n======================================================================");
    println!("STORE CHECK COMPLETED");
    println!("======================================================================");

    Ok(())
}

/// Serve the HTTP API.
async fn cmd_run(port_override: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let port = effective_port(&config, port_override);

    // Connect to the document store; an unreachable store is fatal here and
    // nowhere else.
    info!("Connecting to document store...");
    let store = MongoStore::connect(&config.mongo_url, &config.db_name).await?;
    store.ping().await?;
    info!("Document store connected (database: {})", config.db_name);

    let store: Arc<dyn DocumentStore> = Arc::new(store);

    // Select the notifier once, from configuration
    let notifier = notify::from_config(&config)?;

    let state = AppState::new(store.clone(), notifier);
    let router = create_router(state, &config.allowed_origins());

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    info!("API available under http://localhost:{}/api", port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release the store handle exactly once, after requests have drained
    store.close().await;
    info!("Document store connection closed");

    Ok(())
}

/// CLI port override wins over the environment.
fn effective_port(config: &Config, port_override: Option<u16>) -> u16 {
    port_override.unwrap_or(config.port)
}
