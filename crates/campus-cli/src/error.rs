//! CLI-level errors.

use campus_access::{Action, Route};
use thiserror::Error;

/// Failures that originate in the command layer itself.
#[derive(Error, Debug)]
pub enum CliError {
    /// The navigation guard sent the user elsewhere.
    #[error("navigation to {route} refused, redirected to {redirect}{}", notice_suffix(.notice))]
    Refused {
        route: Route,
        redirect: Route,
        notice: Option<&'static str>,
    },
    /// Input could not be read or parsed.
    #[error("invalid input: {0}")]
    Input(String),
    /// A record named on the command line does not exist.
    #[error("{0} not found")]
    NotFound(String),
}

impl CliError {
    /// Builds a refusal from a guard decision; `None` when the action allows.
    pub fn refused(route: Route, action: Action) -> Option<Self> {
        let redirect = action.destination()?;
        Some(CliError::Refused {
            route,
            redirect,
            notice: action.notice(),
        })
    }
}

fn notice_suffix(notice: &Option<&'static str>) -> String {
    notice.map(|n| format!(" ({n})")).unwrap_or_default()
}
