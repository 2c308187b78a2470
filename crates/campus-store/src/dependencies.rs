use campus_core::{seed, Dependency, DependencyDraft, DependencyId};

use crate::collection;
use crate::error::StoreError;
use crate::keys;
use crate::traits::SharedStore;

/// Collection of organizational units.
pub struct DependencyStore {
    kv: SharedStore,
    dependencies: Vec<Dependency>,
}

impl DependencyStore {
    /// Creates a store and loads it immediately.
    pub fn open(kv: SharedStore) -> Self {
        let mut store = Self {
            kv,
            dependencies: Vec::new(),
        };
        store.load();
        store
    }

    /// Reloads units from storage, reseeding the built-in units if storage
    /// is empty or unreadable.
    pub fn load(&mut self) -> &[Dependency] {
        self.dependencies =
            collection::load_or_seed(self.kv.as_ref(), keys::DEPENDENCIES, seed::dependencies);
        &self.dependencies
    }

    /// Units in insertion order.
    pub fn list(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Looks up a unit by id.
    pub fn find(&self, id: &DependencyId) -> Option<&Dependency> {
        self.dependencies.iter().find(|d| &d.id == id)
    }

    /// Looks up a unit by acronym, ignoring case.
    pub fn find_by_acronym(&self, acronym: &str) -> Option<&Dependency> {
        self.dependencies
            .iter()
            .find(|d| d.acronym.eq_ignore_ascii_case(acronym))
    }

    /// Registers a new unit and returns its id.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateDependency`] if the acronym is taken,
    ///   ignoring case; the collection is left unchanged
    /// - [`StoreError::Validation`] if the draft is incomplete
    pub fn add(&mut self, draft: DependencyDraft) -> Result<DependencyId, StoreError> {
        if self.find_by_acronym(&draft.acronym).is_some() {
            return Err(StoreError::DuplicateDependency(draft.acronym));
        }
        let id = DependencyId::generate();
        let dependency = draft.into_dependency(id.clone())?;
        self.dependencies.push(dependency);
        if let Err(e) = collection::write(self.kv.as_ref(), keys::DEPENDENCIES, &self.dependencies)
        {
            self.dependencies.pop();
            return Err(e);
        }
        tracing::info!(dependency_id = %id, "dependency registered");
        Ok(id)
    }
}
