//! Destinations of the catalog and what each one requires.

use campus_core::{EventId, Role};

use crate::guard::RouteRequirement;

/// A navigable destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: public catalog.
    Home,
    /// `/login`: guest entry point.
    Login,
    /// `/admin-login`: admin sign-in page.
    AdminLogin,
    /// `/register`: guest entry point.
    Register,
    /// `/event/:id`: public event detail.
    EventDetail(EventId),
    /// `/my-events`: the student's registrations.
    MyEvents,
    /// `/payment/:id`: payment confirmation for an event.
    Payment(EventId),
    /// `/admin`: event administration.
    AdminEvents,
    /// `/admin/reports`: reporting dashboard.
    AdminReports,
}

impl Route {
    /// Maps a concrete path to a route. Query strings, fragments and a
    /// trailing slash are ignored. Unknown paths yield `None`.
    pub fn resolve(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["login"] => Some(Route::Login),
            ["admin-login"] => Some(Route::AdminLogin),
            ["register"] => Some(Route::Register),
            ["event", id] => Some(Route::EventDetail(EventId::new(*id))),
            ["my-events"] => Some(Route::MyEvents),
            ["payment", id] => Some(Route::Payment(EventId::new(*id))),
            ["admin"] => Some(Route::AdminEvents),
            ["admin", "reports"] => Some(Route::AdminReports),
            _ => None,
        }
    }

    /// Concrete path of the route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::AdminLogin => "/admin-login".to_string(),
            Route::Register => "/register".to_string(),
            Route::EventDetail(id) => format!("/event/{id}"),
            Route::MyEvents => "/my-events".to_string(),
            Route::Payment(id) => format!("/payment/{id}"),
            Route::AdminEvents => "/admin".to_string(),
            Route::AdminReports => "/admin/reports".to_string(),
        }
    }

    /// Declared requirement of the route.
    pub fn requirement(&self) -> RouteRequirement {
        match self {
            Route::Home | Route::AdminLogin | Route::EventDetail(_) => RouteRequirement::public(),
            Route::Login | Route::Register => RouteRequirement::guest_entry(),
            Route::MyEvents | Route::Payment(_) => RouteRequirement::authenticated(),
            Route::AdminEvents | Route::AdminReports => RouteRequirement::role(Role::Admin),
        }
    }

    /// Landing page for a signed-in role.
    pub fn role_home(role: Role) -> Route {
        match role {
            Role::Admin => Route::AdminEvents,
            Role::Student => Route::Home,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_paths() {
        assert_eq!(Route::resolve("/"), Some(Route::Home));
        assert_eq!(Route::resolve(""), Some(Route::Home));
        assert_eq!(Route::resolve("/admin/"), Some(Route::AdminEvents));
        assert_eq!(Route::resolve("/admin/reports?from=nav"), Some(Route::AdminReports));
        assert_eq!(
            Route::resolve("/event/42#comments"),
            Some(Route::EventDetail(EventId::new("42")))
        );
        assert_eq!(Route::resolve("/nowhere"), None);
        assert_eq!(Route::resolve("/event"), None);
    }

    #[test]
    fn path_round_trips() {
        for route in [
            Route::Home,
            Route::Login,
            Route::AdminLogin,
            Route::Register,
            Route::EventDetail(EventId::new("7")),
            Route::MyEvents,
            Route::Payment(EventId::new("7")),
            Route::AdminEvents,
            Route::AdminReports,
        ] {
            assert_eq!(Route::resolve(&route.path()), Some(route));
        }
    }

    #[test]
    fn admin_area_requires_admin_role() {
        let requirement = Route::AdminReports.requirement();
        assert!(requirement.requires_auth);
        assert_eq!(requirement.required_role, Some(Role::Admin));
    }
}
