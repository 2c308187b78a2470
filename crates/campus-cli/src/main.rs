//! Campus CLI - Command-line interface for the campus events catalog.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;

use commands::{dependencies, events, route, session, stats};
use config::Config;

#[derive(Parser)]
#[command(name = "campus")]
#[command(about = "Campus events catalog: sessions, event lifecycle and reports")]
struct Cli {
    /// Directory holding the persisted collections
    #[arg(long, global = true, env = "CAMPUS_DATA_DIR", default_value = ".campus")]
    data_dir: PathBuf,
    /// Fsync after every write
    #[arg(long, global = true, env = "CAMPUS_SYNC")]
    sync: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login {
        /// Account identity (email)
        identity: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in account
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Register a student account
    Register {
        /// Account identity (email)
        identity: String,
        /// Account password
        #[arg(long)]
        password: String,
    },
    /// Register an organizational-unit administrator
    RegisterAdmin {
        /// Account identity (email)
        #[arg(long)]
        identity: String,
        /// Account password
        #[arg(long)]
        password: String,
        /// Given name
        #[arg(long)]
        name: String,
        /// Paternal surname
        #[arg(long)]
        paternal_name: Option<String>,
        /// Maternal surname
        #[arg(long)]
        maternal_name: Option<String>,
        /// Acronym of the represented unit
        #[arg(long)]
        dependency: String,
    },
    /// Show the navigation decision for a path
    Route {
        /// Path to navigate to (e.g. /admin/reports)
        path: String,
    },
    /// Event catalog and lifecycle
    Events {
        #[command(subcommand)]
        command: events::EventsCommand,
    },
    /// Reporting metrics over all events
    Stats {
        /// Length of the registration ranking
        #[arg(long, default_value_t = campus_store::DEFAULT_TOP_N)]
        top: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Organizational units
    Dependencies {
        #[command(subcommand)]
        command: dependencies::DependenciesCommand,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config {
        data_dir: cli.data_dir,
        sync: cli.sync,
    };

    let result = match cli.command {
        Commands::Login { identity, password } => session::login(&config, identity, password),
        Commands::Logout => session::logout(&config),
        Commands::Whoami { json } => session::whoami(&config, json),
        Commands::Register { identity, password } => {
            session::register(&config, identity, password)
        }
        Commands::RegisterAdmin {
            identity,
            password,
            name,
            paternal_name,
            maternal_name,
            dependency,
        } => session::register_admin(
            &config,
            campus_core::AdminRegistration {
                identity: identity.into(),
                password,
                name,
                paternal_name,
                maternal_name,
                dependency,
            },
        ),
        Commands::Route { path } => route::run(&config, path),
        Commands::Events { command } => events::run(&config, command),
        Commands::Stats { top, json } => stats::run(&config, top, json),
        Commands::Dependencies { command } => dependencies::run(&config, command),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
