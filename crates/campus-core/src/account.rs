use serde::{Deserialize, Serialize};

use crate::digest::{digest, PasswordDigest};
use crate::identifiers::{EventId, Identity};
use crate::validation::{require_text, ValidationError};

/// Display name given to self-registered students until they edit their profile.
pub const DEFAULT_STUDENT_NAME: &str = "New Student";

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Organizational-unit representative with approval rights.
    Admin,
    /// Enrolled student who registers for events.
    Student,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Student => f.write_str("student"),
        }
    }
}

/// Role-specific part of an account, tagged by `role` in the persisted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum AccountProfile {
    /// Administrator of an organizational unit.
    Admin {
        /// Paternal surname.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        paternal_name: Option<String>,
        /// Maternal surname.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maternal_name: Option<String>,
        /// Acronym of the organizational unit the admin represents.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        assigned_dependency: Option<String>,
    },
    /// Student account; carries no extra fields.
    Student,
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identity (email-shaped).
    pub identity: Identity,
    /// Salted one-way digest of the password.
    pub credential_digest: PasswordDigest,
    /// Human-readable name.
    pub display_name: String,
    /// Events this account registered for, in registration order, without duplicates.
    #[serde(default)]
    pub registered_event_ids: Vec<EventId>,
    /// Role and role-specific fields.
    #[serde(flatten)]
    pub profile: AccountProfile,
}

impl Account {
    /// Builds a student account with no registrations.
    pub fn student(identity: Identity, password: &str, display_name: impl Into<String>) -> Self {
        Self {
            credential_digest: digest(password, &identity),
            identity,
            display_name: display_name.into(),
            registered_event_ids: Vec::new(),
            profile: AccountProfile::Student,
        }
    }

    /// Builds an admin account from a validated registration form.
    pub fn admin(registration: AdminRegistration) -> Result<Self, ValidationError> {
        registration.validate()?;
        let AdminRegistration {
            identity,
            password,
            name,
            paternal_name,
            maternal_name,
            dependency,
        } = registration;
        Ok(Self {
            credential_digest: digest(&password, &identity),
            identity,
            display_name: name,
            registered_event_ids: Vec::new(),
            profile: AccountProfile::Admin {
                paternal_name,
                maternal_name,
                assigned_dependency: Some(dependency),
            },
        })
    }

    /// Role derived from the profile variant.
    pub fn role(&self) -> Role {
        match self.profile {
            AccountProfile::Admin { .. } => Role::Admin,
            AccountProfile::Student => Role::Student,
        }
    }

    /// Returns true if the account is registered for `event_id`.
    pub fn is_registered_for(&self, event_id: &EventId) -> bool {
        self.registered_event_ids.contains(event_id)
    }

    /// Adds an event registration; returns false if it was already present.
    pub fn link_event(&mut self, event_id: EventId) -> bool {
        if self.is_registered_for(&event_id) {
            return false;
        }
        self.registered_event_ids.push(event_id);
        true
    }
}

/// Registration form for an organizational-unit administrator.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminRegistration {
    /// Identity of the new account.
    pub identity: Identity,
    /// Initial password (only its digest is kept).
    pub password: String,
    /// Full display name.
    pub name: String,
    /// Paternal surname.
    #[serde(default)]
    pub paternal_name: Option<String>,
    /// Maternal surname.
    #[serde(default)]
    pub maternal_name: Option<String>,
    /// Acronym of the organizational unit the admin represents.
    pub dependency: String,
}

impl AdminRegistration {
    /// Checks identity shape and required fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Identity::parse(self.identity.as_str())?;
        require_text("password", &self.password)?;
        require_text("name", &self.name)?;
        require_text("dependency", &self.dependency)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registration() -> AdminRegistration {
        AdminRegistration {
            identity: Identity::new("resp@fime.uanl.mx"),
            password: "s3cret".into(),
            name: "Laura Garza Treviño".into(),
            paternal_name: Some("Garza".into()),
            maternal_name: Some("Treviño".into()),
            dependency: "FIME".into(),
        }
    }

    #[test]
    fn student_profile_serializes_with_role_tag() {
        let account = Account::student(Identity::new("a@uanl.edu.mx"), "pw", "Ana");
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["role"], "student");
        assert_eq!(value["registered_event_ids"], json!([]));
        assert!(value.get("paternal_name").is_none());
    }

    #[test]
    fn admin_profile_round_trips() {
        let account = Account::admin(registration()).unwrap();
        let text = serde_json::to_string(&account).unwrap();
        let back: Account = serde_json::from_str(&text).unwrap();
        assert_eq!(back, account);
        assert_eq!(back.role(), Role::Admin);
    }

    #[test]
    fn missing_registrations_default_to_empty() {
        let account: Account = serde_json::from_value(json!({
            "identity": "admin@uanl.edu.mx",
            "credential_digest": "4e18b812e1a878b963925a5431d9c853bf2534331952e259f65369cdbb74a8e6",
            "display_name": "Admin",
            "role": "admin"
        }))
        .unwrap();
        assert!(account.registered_event_ids.is_empty());
        assert_eq!(
            account.profile,
            AccountProfile::Admin {
                paternal_name: None,
                maternal_name: None,
                assigned_dependency: None
            }
        );
    }

    #[test]
    fn link_event_is_idempotent() {
        let mut account = Account::student(Identity::new("a@uanl.edu.mx"), "pw", "Ana");
        assert!(account.link_event(EventId::new("1")));
        assert!(!account.link_event(EventId::new("1")));
        assert!(account.link_event(EventId::new("2")));
        assert_eq!(
            account.registered_event_ids,
            vec![EventId::new("1"), EventId::new("2")]
        );
    }

    #[test]
    fn admin_registration_rejects_unknown_fields() {
        let result: Result<AdminRegistration, _> = serde_json::from_value(json!({
            "identity": "x@y.mx",
            "password": "pw",
            "name": "X",
            "dependency": "FIME",
            "role": "admin"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn admin_registration_requires_dependency() {
        let mut form = registration();
        form.dependency = "  ".into();
        assert_eq!(
            Account::admin(form).unwrap_err(),
            ValidationError::Empty {
                field: "dependency"
            }
        );
    }
}
