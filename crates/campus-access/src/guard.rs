//! Navigation guard.
//!
//! Runs before every route transition. It is a pure read of the declared
//! requirement and the current [`Session`]; it never suspends and never
//! touches storage.

use campus_core::Role;

use crate::routes::Route;
use crate::session::Session;

/// Notice surfaced when a non-admin tries to enter the admin area.
pub const ACCESS_DENIED_NOTICE: &str = "Access denied: administrator permissions required.";

/// What a destination declares about who may enter it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteRequirement {
    /// Requires a signed-in session.
    pub requires_auth: bool,
    /// Requires the signed-in account to have this role.
    pub required_role: Option<Role>,
    /// Login/registration entry point; signed-in users are sent to their role home.
    pub guest_only: bool,
}

impl RouteRequirement {
    /// Open to everybody.
    pub fn public() -> Self {
        Self::default()
    }

    /// Requires a signed-in session.
    pub fn authenticated() -> Self {
        Self {
            requires_auth: true,
            ..Self::default()
        }
    }

    /// Requires a signed-in session with `role`.
    pub fn role(role: Role) -> Self {
        Self {
            requires_auth: true,
            required_role: Some(role),
            guest_only: false,
        }
    }

    /// Login or registration entry point.
    pub fn guest_entry() -> Self {
        Self {
            guest_only: true,
            ..Self::default()
        }
    }
}

/// Outcome of a guard decision, executed by the navigation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Proceed to the target.
    Allow,
    /// Send the user to the login page.
    RedirectToLogin,
    /// Send the user to the public home and show [`ACCESS_DENIED_NOTICE`].
    RedirectToHome,
    /// Send a signed-in user to the landing page of their role.
    RedirectToRoleHome(Role),
}

impl Action {
    /// Destination to navigate to instead of the target, if any.
    pub fn destination(&self) -> Option<Route> {
        match self {
            Action::Allow => None,
            Action::RedirectToLogin => Some(Route::Login),
            Action::RedirectToHome => Some(Route::Home),
            Action::RedirectToRoleHome(role) => Some(Route::role_home(*role)),
        }
    }

    /// Message to surface to the user alongside the redirect.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Action::RedirectToHome => Some(ACCESS_DENIED_NOTICE),
            _ => None,
        }
    }
}

/// Decides whether a navigation to `target` may proceed. First match wins:
///
/// 1. auth required and nobody signed in: [`Action::RedirectToLogin`]
/// 2. role required and missing or different: [`Action::RedirectToHome`]
/// 3. guest entry point while signed in: [`Action::RedirectToRoleHome`]
/// 4. otherwise [`Action::Allow`]
pub fn decide(target: &RouteRequirement, session: &Session) -> Action {
    if target.requires_auth && !session.is_authenticated() {
        return Action::RedirectToLogin;
    }
    if let Some(required) = target.required_role {
        if session.role() != Some(required) {
            return Action::RedirectToHome;
        }
    }
    if target.guest_only {
        if let Some(role) = session.role() {
            return Action::RedirectToRoleHome(role);
        }
    }
    Action::Allow
}

/// Resolves `path` and decides on its requirement. Paths outside the route
/// table declare nothing and are allowed.
pub fn decide_path(path: &str, session: &Session) -> Action {
    let requirement = Route::resolve(path)
        .map(|route| route.requirement())
        .unwrap_or_default();
    decide(&requirement, session)
}
