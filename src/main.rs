//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands::serve::ServeOptions;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Index markdown articles and serve them as a JSON API", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Config file, relative to the base directory (defaults to folio.yml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the article index artifact
    #[command(alias = "b")]
    Build,

    /// Validate all articles without writing the artifact
    Check,

    /// Start the content service
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to
        #[arg(short, long)]
        ip: Option<String>,

        /// Allowed CORS origins: `*` or a comma separated list
        #[arg(long, env = "FOLIO_ALLOWED_ORIGINS")]
        allowed_origins: Option<String>,

        /// Rebuild the artifact before serving
        #[arg(long)]
        build: bool,
    },

    /// List the indexed articles
    List,

    /// Show one article
    Show {
        /// Article slug
        slug: String,
    },

    /// Remove the generated artifact
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let config = cli.config.as_deref();
    let load = || folio_rs::Folio::with_config(&base_dir, config);

    match cli.command {
        Commands::Build => {
            let folio = load()?;
            let artifact = folio.build()?;
            println!(
                "Indexed {} articles into {}",
                artifact.index.len(),
                folio.output_path.display()
            );
        }

        Commands::Check => {
            let folio = load()?;
            let artifact = folio.check()?;
            println!("All {} articles are valid", artifact.index.len());
        }

        Commands::Serve {
            port,
            ip,
            allowed_origins,
            build,
        } => {
            let folio = load()?;
            let options = ServeOptions {
                ip,
                port,
                allowed_origins,
                build,
            };
            folio_rs::commands::serve::run(&folio, options).await?;
        }

        Commands::List => {
            folio_rs::commands::list::run(&load()?)?;
        }

        Commands::Show { slug } => {
            folio_rs::commands::show::run(&load()?, &slug)?;
        }

        Commands::Clean => {
            load()?.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
