//! CLI entry point for blogflow-showcase

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogflow_showcase::config::Language;
use blogflow_showcase::Showcase;

#[derive(Parser)]
#[command(name = "blogflow-showcase")]
#[command(version)]
#[command(about = "Showcase site and admin config service for BlogFlow blogs", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Config document path, relative to the base directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Posts file path, relative to the base directory
    #[arg(long, global = true)]
    posts: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config document and sample posts
    Init {
        /// Overwrite an existing config document
        #[arg(short, long)]
        force: bool,
    },

    /// Start the server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Public origin used in share links (defaults to the bind address)
        #[arg(long)]
        public_url: Option<String>,
    },

    /// Print the config document
    Show,

    /// Validate the config document and posts file
    Check,

    /// List posts
    List {
        /// Content language (defaults to the configured language)
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogflow_showcase=debug,info"
    } else {
        "blogflow_showcase=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    let showcase = Showcase::with_paths(&base_dir, cli.config, cli.posts);

    match cli.command {
        Commands::Init { force } => {
            tracing::info!("Initializing showcase in {:?}", showcase.base_dir);
            showcase.init(force)?;
        }

        Commands::Serve {
            port,
            ip,
            public_url,
        } => {
            if !showcase.store.exists() {
                tracing::warn!(
                    "No config at {:?}, pages render with defaults until one is saved",
                    showcase.config_path
                );
            }
            tracing::info!("Starting server at http://{}:{}", ip, port);
            blogflow_showcase::server::start(&showcase, &ip, port, public_url).await?;
        }

        Commands::Show => {
            blogflow_showcase::commands::show::run(&showcase)?;
        }

        Commands::Check => {
            showcase.check()?;
            println!("All checks passed.");
        }

        Commands::List { lang } => {
            blogflow_showcase::commands::list::run(&showcase, lang).await?;
        }

        Commands::Version => {
            println!("blogflow-showcase version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
