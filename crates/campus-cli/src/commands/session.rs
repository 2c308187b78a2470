//! Session commands: login, logout, whoami and registration.

use super::authorize;
use crate::config::Config;
use crate::error::CliError;
use crate::output;
use campus_access::Route;
use campus_core::{AdminRegistration, Identity};
use campus_store::DependencyStore;
use serde_json::json;

pub fn login(
    config: &Config,
    identity: String,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_kv, mut manager) = config.session()?;
    authorize(&manager, Route::Login)?;

    let account = manager.login(&Identity::new(identity), &password)?;
    println!(
        "Signed in as {} ({})",
        account.display_name,
        account.role()
    );
    println!("Continue at {}", Route::role_home(account.role()));
    Ok(())
}

pub fn logout(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let (_kv, mut manager) = config.session()?;
    let destination = manager.logout();
    println!("Signed out");
    println!("Continue at {}", destination);
    Ok(())
}

pub fn whoami(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (_kv, manager) = config.session()?;
    let account = manager.current_account();

    if json {
        let value = match account {
            Some(account) => json!({
                "authenticated": true,
                "identity": account.identity,
                "display_name": account.display_name,
                "role": account.role(),
                "registered_event_ids": account.registered_event_ids,
            }),
            None => json!({ "authenticated": false }),
        };
        println!("{}", output::format_json(&value));
        return Ok(());
    }

    match account {
        Some(account) => {
            println!("{} <{}>", account.display_name, account.identity);
            println!("role: {}", account.role());
            println!("registered events: {}", account.registered_event_ids.len());
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

pub fn register(
    config: &Config,
    identity: String,
    password: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_kv, mut manager) = config.session()?;
    authorize(&manager, Route::Register)?;

    manager.register_student(Identity::new(identity.clone()), &password)?;
    println!("Registered {}", identity);
    Ok(())
}

pub fn register_admin(
    config: &Config,
    mut registration: AdminRegistration,
) -> Result<(), Box<dyn std::error::Error>> {
    let (kv, mut manager) = config.session()?;
    authorize(&manager, Route::AdminEvents)?;

    let dependencies = DependencyStore::open(kv);
    let unit = dependencies
        .find_by_acronym(&registration.dependency)
        .ok_or_else(|| CliError::NotFound(format!("dependency {}", registration.dependency)))?;
    registration.dependency = unit.acronym.clone();

    let identity = registration.identity.clone();
    let dependency = registration.dependency.clone();
    manager.register_admin(registration)?;
    println!("Registered administrator {} for {}", identity, dependency);
    Ok(())
}
