//! Organizational unit commands.

use super::{authorize, read_json};
use crate::config::Config;
use crate::output;
use campus_access::Route;
use campus_core::{DependencyDraft, DependencyId};
use campus_store::{DependencyStore, StoreError};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum DependenciesCommand {
    /// List organizational units
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one organizational unit
    Show {
        /// Unit id
        id: String,
    },
    /// Register an organizational unit
    Add {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
}

pub fn run(
    config: &Config,
    command: DependenciesCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let (kv, manager) = config.session()?;
    let mut store = DependencyStore::open(kv);

    match command {
        DependenciesCommand::List { json } => {
            if json {
                println!("{}", output::format_json(&store.list()));
                return Ok(());
            }
            output::print_dependencies_header();
            for dependency in store.list() {
                println!("{}", output::format_dependency_row(dependency));
            }
        }
        DependenciesCommand::Show { id } => {
            let id = DependencyId::new(id);
            let dependency = store
                .find(&id)
                .ok_or_else(|| StoreError::DependencyNotFound(id.clone()))?;
            println!("{}", output::format_json(dependency));
        }
        DependenciesCommand::Add { input } => {
            authorize(&manager, Route::AdminEvents)?;
            let draft: DependencyDraft = read_json(input)?;
            let acronym = draft.acronym.clone();
            let id = store.add(draft)?;
            println!("Registered {} as {}", acronym, id);
        }
    }
    Ok(())
}
