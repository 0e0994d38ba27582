//! NimbusX CLI - run and maintain the content-management backend

use clap::{Parser, Subcommand};
use nimbusx::config::{self, NimbusConfig};
use nimbusx::storage::{SqliteStore, Store};
use nimbusx::ui;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "nimbusx")]
#[command(version)]
#[command(about = "NimbusX content-management backend")]
#[command(long_about = r#"
NimbusX serves users, spaces, languages and space access over HTTP/JSON,
backed by a SQLite database.

Example usage:
  nimbusx init
  nimbusx serve --port 8080
  nimbusx stats --database nimbusx.db
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./nimbusx.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Create missing tables and exit
    Migrate {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show row counts per table
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn open_store(database: &std::path::Path) -> anyhow::Result<SqliteStore> {
    config::ensure_db_dir(database)?;
    Ok(SqliteStore::open(database)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let file_config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Serve { database, host, port } => {
            let settings = file_config.resolve(database, host, port)?;
            let store = open_store(&settings.database)?;

            ui::banner(
                "NimbusX",
                &format!("Version {}", env!("CARGO_PKG_VERSION")),
            );
            ui::info("Database", &settings.database.display().to_string());
            ui::info("Listening", &format!("http://{}", settings.addr));

            nimbusx::server::start_server(settings.addr, Arc::new(store)).await?;
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &NimbusConfig::with_defaults(), force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }

        Commands::Migrate { database } => {
            let database = file_config.database_path(database);
            let store = open_store(&database)?;
            store.ensure_schema()?;
            ui::success(&format!("Schema is up to date in {}", database.display()));
        }

        Commands::Stats { database } => {
            let database = file_config.database_path(database);
            let store = open_store(&database)?;
            let stats = store.stats()?;

            ui::section(&format!(" {} {} ", ui::Icons::STATS, database.display()));
            println!("{}", ui::stats_table(&stats));
        }
    }

    Ok(())
}
