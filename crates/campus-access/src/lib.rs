//! Authentication state and route access decisions.
//!
//! This crate provides:
//! - [`Session`]: the explicit, injectable "who is signed in" value
//! - [`SessionManager`]: login, logout, registration and session
//!   persistence across restarts
//! - [`decide`]: the pure navigation guard
//! - [`Route`]: the catalog's destinations and their requirements
//!
//! The guard never touches storage. Storage is read only when the manager
//! restores or logs in; navigation decisions are a pure function of the
//! target's requirement and the current [`Session`].

#![deny(missing_docs)]

/// Error types for access operations.
pub mod error;
/// Navigation guard.
pub mod guard;
/// Session persistence and credential checks.
pub mod manager;
/// Destinations and their requirements.
pub mod routes;
/// In-process session value.
pub mod session;

pub use error::AccessError;
pub use guard::{decide, decide_path, Action, RouteRequirement, ACCESS_DENIED_NOTICE};
pub use manager::SessionManager;
pub use routes::Route;
pub use session::Session;
