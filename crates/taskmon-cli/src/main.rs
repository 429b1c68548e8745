use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "taskmon", version, about = "TaskMon study timer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trainer profile management
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Species catalog lookup
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Study sessions
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Pending encounter from the last study phase
    Encounter {
        #[command(subcommand)]
        action: commands::encounter::EncounterAction,
    },
    /// Run a rest phase
    Rest(commands::session::RestArgs),
    /// Show registered species
    Pokedex {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show owned creatures
    Inventory {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TASKMON_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Profile { action } => commands::profile::run(action).await,
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Session { action } => commands::session::run(action).await,
        Commands::Encounter { action } => commands::encounter::run(action).await,
        Commands::Rest(args) => commands::session::rest(args).await,
        Commands::Pokedex { json } => commands::collection::pokedex(json).await,
        Commands::Inventory { json } => commands::collection::inventory(json).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
