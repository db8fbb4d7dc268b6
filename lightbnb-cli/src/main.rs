//! lightbnb CLI - command-line access to the LightBnB data layer
//!
//! Opens the store once at startup, runs a single operation, prints the
//! result as JSON on stdout, and closes the store before exiting:
//! - User lookup and sign-up (`user` subcommand)
//! - A guest's reservations (`reservations`)
//! - Filtered property search (`properties`)
//! - Property listing creation (`add-property`)

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_store::{PgStore, StoreConfig};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query and update the LightBnB database",
    long_about = "Look up users, list reservations, search properties with optional filters, \
                  and insert users or properties. Results are printed as JSON."
)]
struct Cli {
    /// Database URL (overrides DB_HOST/DB_USER/DB_PASSWORD/DB_NAME)
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, global = true)]
    max_connections: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up or create users
    User(commands::users::UserArgs),
    /// List a guest's reservations
    Reservations(commands::reservations::ReservationsArgs),
    /// Search properties (all filters optional)
    Properties(commands::properties::PropertiesArgs),
    /// Insert a property from a JSON document
    AddProperty(commands::properties::AddPropertyArgs),
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn store_config(cli: &Cli) -> Result<StoreConfig> {
    let config = match &cli.database_url {
        Some(url) => StoreConfig::from_url(url.clone()),
        None => StoreConfig::from_env().context(
            "database not configured. Set via --database-url, DATABASE_URL, or DB_* variables in .env",
        )?,
    };
    Ok(match cli.max_connections {
        Some(max) => config.with_max_connections(max),
        None => config,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing().ok();
    let cli = Cli::parse();

    let config = store_config(&cli)?;
    let store = PgStore::connect_lazy(&config).context("Failed to create database pool")?;

    let result = match cli.command {
        Commands::User(args) => commands::users::run(&store, args).await,
        Commands::Reservations(args) => commands::reservations::run(&store, args).await,
        Commands::Properties(args) => commands::properties::run_list(&store, args).await,
        Commands::AddProperty(args) => commands::properties::run_add(&store, args).await,
    };

    store.close().await;
    result
}
