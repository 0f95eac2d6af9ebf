use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use marquee_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about = "An animated terminal portfolio")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use instead of ~/.config/marquee/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal showcase
    Run,
    /// Print every change a section's display publishes, without a UI
    Watch {
        /// Section id (defaults to the first section)
        #[arg(short = 's', long)]
        section: Option<String>,
        /// Stop after this many milliseconds (runs until Ctrl-C if omitted)
        #[arg(short = 'd', long)]
        duration_ms: Option<u64>,
        /// Emit one JSON object per line
        #[arg(long)]
        json: bool,
    },
    /// List configured sections and their cadences
    Sections,
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(short = 'f', long)]
        force: bool,
    },
    /// Validate the configuration file
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);

    // Config commands must work even when the file does not parse
    if let Some(Commands::Config { action }) = &cli.command {
        init_logging(&AppConfig::default(), false)?;
        return match action {
            ConfigAction::Path => commands::config::path(&config_path),
            ConfigAction::Init { force } => commands::config::init(&config_path, *force),
            ConfigAction::Check => commands::config::check(&config_path),
        };
    }

    let config = AppConfig::load_from(&config_path)?;

    let tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, tui)?;

    // Handle commands
    match cli.command {
        Some(Commands::Run) | None => commands::run::run(Arc::new(config), config_path).await,
        Some(Commands::Watch {
            section,
            duration_ms,
            json,
        }) => commands::watch::run(&config, section.as_deref(), duration_ms, json).await,
        Some(Commands::Sections) => commands::sections::run(&config),
        // Handled before the config is loaded
        Some(Commands::Config { .. }) => Ok(()),
    }
}

/// `RUST_LOG` wins over `general.log_level`. The UI owns the terminal, so
/// it logs to a file; every other command logs to stderr.
fn init_logging(config: &AppConfig, tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if tui {
        let path = AppConfig::log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
