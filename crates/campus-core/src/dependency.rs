use serde::{Deserialize, Serialize};

use crate::identifiers::{DependencyId, Identity};
use crate::validation::{require_text, ValidationError};

/// Kind of organizational unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// A faculty (school) of the university.
    #[serde(alias = "Facultad")]
    Faculty,
    /// A preparatory high school.
    #[serde(alias = "Preparatoria")]
    HighSchool,
    /// An administrative office.
    #[serde(alias = "Dependencia administrativa")]
    AdministrativeUnit,
    /// A research center or institute.
    #[serde(alias = "Centro o Instituto")]
    CenterOrInstitute,
}

/// An organizational unit that hosts events and employs admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Unique identifier.
    pub id: DependencyId,
    /// Full name.
    pub name: String,
    /// Short name (e.g. "FIME"); admins reference units by acronym.
    pub acronym: String,
    /// Contact address.
    pub email: Identity,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Purpose or typical kind of events.
    #[serde(default)]
    pub purpose: String,
    /// Kind of unit.
    pub kind: DependencyKind,
}

/// Fields supplied when registering a new organizational unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyDraft {
    /// Full name.
    pub name: String,
    /// Short name.
    pub acronym: String,
    /// Contact address.
    pub email: Identity,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Purpose or typical kind of events.
    #[serde(default)]
    pub purpose: String,
    /// Kind of unit.
    pub kind: DependencyKind,
}

impl DependencyDraft {
    /// Checks required fields and the contact address shape.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("acronym", &self.acronym)?;
        Identity::parse(self.email.as_str())?;
        Ok(())
    }

    /// Turns the draft into a unit with the given id.
    pub fn into_dependency(self, id: DependencyId) -> Result<Dependency, ValidationError> {
        self.validate()?;
        Ok(Dependency {
            id,
            name: self.name,
            acronym: self.acronym,
            email: self.email,
            description: self.description,
            purpose: self.purpose,
            kind: self.kind,
        })
    }
}
