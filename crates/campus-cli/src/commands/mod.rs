//! Command implementations.

pub mod dependencies;
pub mod events;
pub mod route;
pub mod session;
pub mod stats;

use crate::error::CliError;
use campus_access::{decide, Route, SessionManager};
use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Runs the navigation guard for the route a command stands for.
pub fn authorize(manager: &SessionManager, route: Route) -> Result<(), CliError> {
    let action = decide(&route.requirement(), manager.session());
    match CliError::refused(route, action) {
        Some(refusal) => {
            tracing::debug!(?action, "guard refused command");
            Err(refusal)
        }
        None => Ok(()),
    }
}

/// Reads a JSON document from a file or stdin.
pub fn read_json<T: DeserializeOwned>(input: Option<String>) -> Result<T, CliError> {
    let json_str = if let Some(path) = input {
        std::fs::read_to_string(&path)
            .map_err(|e| CliError::Input(format!("failed to read file {}: {}", path, e)))?
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| CliError::Input(format!("failed to read stdin: {}", e)))?;
        buffer
    };

    serde_json::from_str(&json_str).map_err(|e| CliError::Input(e.to_string()))
}

/// Parses a label through the type's serde representation, so the same
/// spellings (and legacy aliases) accepted in stored data work on the
/// command line.
pub fn parse_label<T: DeserializeOwned>(label: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(label.to_string()))
        .map_err(|e| format!("unrecognized value {:?}: {}", label, e))
}
