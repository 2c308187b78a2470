//! Route command implementation.

use crate::config::Config;
use campus_access::{decide_path, Action};

pub fn run(config: &Config, path: String) -> Result<(), Box<dyn std::error::Error>> {
    let (_kv, manager) = config.session()?;

    let action = decide_path(&path, manager.session());
    match action.destination() {
        None => println!("allow {}", path),
        Some(destination) => println!("redirect {}", destination),
    }
    if let Some(notice) = action.notice() {
        println!("{}", notice);
    }
    if action != Action::Allow {
        tracing::debug!(%path, ?action, "navigation redirected");
    }
    Ok(())
}
