use clap::{Parser, Subcommand};
use smokefree_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

/// Environment variable holding a `tracing` filter; wins over the config file.
const LOG_ENV: &str = "SMOKEFREE_LOG";

#[derive(Parser)]
#[command(name = "smokefree", version, about = "Quit-smoking progress tracker")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quit time management
    Quit {
        #[command(subcommand)]
        action: commands::quit::QuitAction,
    },
    /// Today's smoking counter
    Smoke {
        #[command(subcommand)]
        action: commands::smoke::SmokeAction,
    },
    /// Show milestone progress
    Status {
        /// Print the progress result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print quit time, today's count and progress as JSON
    Stats,
    /// List recovery milestones
    Milestones {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Import a legacy QUIT|/DAILY| state file
    Import {
        /// Path to the legacy file
        file: std::path::PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    // Load errors are reported once the subscriber is installed.
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_tracing(&config);
    if let Err(e) = &loaded {
        tracing::warn!(error = %e, "using default configuration");
    }

    let result = match cli.command {
        Commands::Quit { action } => commands::quit::run(action),
        Commands::Smoke { action } => commands::smoke::run(action),
        Commands::Status { json } => commands::status::run(&config, json),
        Commands::Stats => commands::status::run_stats(),
        Commands::Milestones { json } => commands::milestones::run(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Import { file } => commands::import::run(&file),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
