//! Session persistence and credential checks.

use campus_core::account::DEFAULT_STUDENT_NAME;
use campus_core::{digest, require_text, Account, AdminRegistration, EventId, Identity};
use campus_store::{keys, CredentialStore, SharedStore, StoreError};
use serde::Deserialize;

use crate::error::AccessError;
use crate::routes::Route;
use crate::session::Session;

/// The part of a persisted snapshot needed to find the fresh account.
#[derive(Deserialize)]
struct SnapshotRef {
    identity: Identity,
}

/// Owns the process's [`Session`] and keeps it in sync with storage.
///
/// The session holds a snapshot of the account; the credential store stays
/// the source of truth and is reloaded before every credential decision.
pub struct SessionManager {
    kv: SharedStore,
    credentials: CredentialStore,
    session: Session,
}

impl SessionManager {
    /// Creates a manager with an anonymous session. Call
    /// [`restore`](Self::restore) to pick up a persisted session.
    pub fn new(kv: SharedStore) -> Self {
        Self {
            credentials: CredentialStore::new(kv.clone()),
            kv,
            session: Session::anonymous(),
        }
    }

    /// Creates a manager and restores any persisted session.
    pub fn restored(kv: SharedStore) -> Self {
        let mut manager = Self::new(kv);
        manager.restore();
        manager
    }

    /// Current session, for the navigation guard.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Snapshot of the signed-in account.
    pub fn current_account(&self) -> Option<&Account> {
        self.session.account()
    }

    /// The credential store as last loaded.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Loads accounts, then rehydrates a persisted session.
    ///
    /// A marker whose account no longer exists, or that cannot be read, is
    /// cleared with [`logout`](Self::logout) instead of being trusted.
    pub fn restore(&mut self) {
        self.credentials.load();

        let marker = self.kv.get(keys::SESSION_MARKER);
        let snapshot = self.kv.get(keys::SESSION_SNAPSHOT);
        let (marker, snapshot) = match (marker, snapshot) {
            (Ok(marker), Ok(snapshot)) => (marker, snapshot),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "could not read persisted session, signing out");
                self.logout();
                return;
            }
        };

        if marker.as_deref() != Some(keys::SESSION_VALID) {
            return;
        }
        let Some(snapshot) = snapshot else {
            return;
        };

        let fresh = serde_json::from_str::<SnapshotRef>(&snapshot)
            .ok()
            .and_then(|s| self.credentials.find_by_identity(&s.identity).cloned());
        match fresh {
            Some(account) => {
                tracing::debug!(identity = %account.identity, "session restored");
                self.session = Session::authenticated_as(account);
            }
            None => {
                tracing::warn!("persisted session references an unknown account, signing out");
                self.logout();
            }
        }
    }

    /// Signs in when `password` matches the stored digest for `identity`.
    ///
    /// On success the session marker and an account snapshot are persisted.
    ///
    /// # Errors
    ///
    /// - [`AccessError::CredentialMismatch`] for an unknown identity or a
    ///   wrong password; the session is left unchanged
    /// - [`AccessError::Store`] if the session cannot be persisted; the
    ///   session is left unchanged
    pub fn login(&mut self, identity: &Identity, password: &str) -> Result<&Account, AccessError> {
        self.credentials.load();

        let Some(account) = self.credentials.find_by_identity(identity) else {
            tracing::info!(%identity, "login rejected");
            return Err(AccessError::CredentialMismatch);
        };
        if !digest(password, identity).matches(&account.credential_digest) {
            tracing::info!(%identity, "login rejected");
            return Err(AccessError::CredentialMismatch);
        }

        let account = account.clone();
        self.persist_session(&account)?;
        tracing::info!(%identity, role = %account.role(), "login succeeded");
        self.session = Session::authenticated_as(account);
        self.session.account().ok_or(AccessError::CredentialMismatch)
    }

    /// Clears the session and its persisted markers.
    ///
    /// Returns the public entry point the navigation layer must move to.
    pub fn logout(&mut self) -> Route {
        if let Some(identity) = self.session.identity() {
            tracing::info!(%identity, "logout");
        }
        self.session = Session::anonymous();
        for key in [keys::SESSION_MARKER, keys::SESSION_SNAPSHOT] {
            if let Err(e) = self.kv.remove(key) {
                tracing::warn!(key, error = %e, "failed to clear session key");
            }
        }
        Route::Login
    }

    /// Returns true if an account with `identity` exists.
    pub fn identity_exists(&mut self, identity: &Identity) -> bool {
        self.credentials.load();
        self.credentials.exists(identity)
    }

    /// Registers a student account with no event registrations.
    ///
    /// # Errors
    ///
    /// - [`AccessError::Validation`] for a malformed identity or blank password
    /// - [`AccessError::Store`] wrapping [`StoreError::DuplicateIdentity`]
    ///   if the identity is taken
    pub fn register_student(
        &mut self,
        identity: Identity,
        password: &str,
    ) -> Result<(), AccessError> {
        let identity = Identity::parse(identity.as_str())?;
        require_text("password", password)?;
        self.credentials.load();
        self.credentials
            .insert(Account::student(identity.clone(), password, DEFAULT_STUDENT_NAME))?;
        tracing::info!(%identity, "student registered");
        Ok(())
    }

    /// Registers an organizational-unit administrator.
    ///
    /// # Errors
    ///
    /// Same as [`register_student`](Self::register_student).
    pub fn register_admin(&mut self, registration: AdminRegistration) -> Result<(), AccessError> {
        let account = Account::admin(registration)?;
        let identity = account.identity.clone();
        self.credentials.load();
        self.credentials.insert(account)?;
        tracing::info!(%identity, "admin registered");
        Ok(())
    }

    /// Links `event_id` to the signed-in account.
    ///
    /// No-op without a session. Already-linked ids are not added twice. The
    /// account, the session snapshot and its persisted copy are refreshed.
    ///
    /// # Errors
    ///
    /// - [`AccessError::Store`] wrapping [`StoreError::AccountNotFound`] if
    ///   the signed-in account was removed from the credential store
    /// - [`AccessError::Store`] if persisting fails
    pub fn link_event_registration(&mut self, event_id: EventId) -> Result<(), AccessError> {
        let Some(identity) = self.session.identity().cloned() else {
            return Ok(());
        };
        self.credentials.load();
        let mut account = self
            .credentials
            .find_by_identity(&identity)
            .cloned()
            .ok_or_else(|| StoreError::AccountNotFound(identity.clone()))?;

        if account.link_event(event_id.clone()) {
            self.credentials.update(account.clone())?;
            self.persist_session(&account)?;
            tracing::info!(%identity, %event_id, "event registration linked");
        }
        self.session = Session::authenticated_as(account);
        Ok(())
    }

    fn persist_session(&self, account: &Account) -> Result<(), StoreError> {
        let snapshot = serde_json::to_string(account)?;
        self.kv.set(keys::SESSION_SNAPSHOT, &snapshot)?;
        self.kv.set(keys::SESSION_MARKER, keys::SESSION_VALID)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::Role;
    use campus_store::{KeyValueStore, MemoryStore};
    use std::rc::Rc;

    fn manager() -> (Rc<MemoryStore>, SessionManager) {
        let kv = Rc::new(MemoryStore::new());
        let manager = SessionManager::restored(kv.clone());
        (kv, manager)
    }

    #[test]
    fn fresh_process_starts_anonymous() {
        let (_kv, manager) = manager();
        assert!(!manager.session().is_authenticated());
        assert_eq!(manager.credentials().accounts().len(), 2);
    }

    #[test]
    fn login_persists_marker_and_snapshot() {
        let (kv, mut manager) = manager();
        let account = manager
            .login(&Identity::new("admin@uanl.edu.mx"), "admin123")
            .unwrap();
        assert_eq!(account.role(), Role::Admin);
        assert_eq!(
            kv.get(keys::SESSION_MARKER).unwrap().as_deref(),
            Some(keys::SESSION_VALID)
        );
        assert!(kv.get(keys::SESSION_SNAPSHOT).unwrap().is_some());
    }

    #[test]
    fn wrong_password_and_unknown_identity_are_indistinguishable() {
        let (kv, mut manager) = manager();
        let wrong = manager.login(&Identity::new("admin@uanl.edu.mx"), "admin124").map(|_| ());
        let unknown = manager.login(&Identity::new("nobody@uanl.edu.mx"), "admin123").map(|_| ());
        assert!(matches!(wrong, Err(AccessError::CredentialMismatch)));
        assert!(matches!(unknown, Err(AccessError::CredentialMismatch)));
        assert_eq!(manager.session(), &Session::anonymous());
        assert!(kv.get(keys::SESSION_MARKER).unwrap().is_none());
    }

    #[test]
    fn failed_login_keeps_existing_session() {
        let (_kv, mut manager) = manager();
        manager
            .login(&Identity::new("alumno@uanl.edu.mx"), "alumno123")
            .unwrap();
        let before = manager.session().clone();
        assert!(manager
            .login(&Identity::new("admin@uanl.edu.mx"), "nope")
            .is_err());
        assert_eq!(manager.session(), &before);
    }

    #[test]
    fn logout_clears_state_and_points_to_login() {
        let (kv, mut manager) = manager();
        manager
            .login(&Identity::new("alumno@uanl.edu.mx"), "alumno123")
            .unwrap();
        assert_eq!(manager.logout(), Route::Login);
        assert!(!manager.session().is_authenticated());
        assert!(kv.get(keys::SESSION_MARKER).unwrap().is_none());
        assert!(kv.get(keys::SESSION_SNAPSHOT).unwrap().is_none());
    }

    #[test]
    fn restore_rehydrates_from_fresh_account() {
        let (kv, mut manager) = manager();
        manager
            .login(&Identity::new("alumno@uanl.edu.mx"), "alumno123")
            .unwrap();

        // Another writer edits the account after the snapshot was taken.
        let mut credentials = CredentialStore::open(kv.clone());
        let mut account = credentials
            .find_by_identity(&Identity::new("alumno@uanl.edu.mx"))
            .cloned()
            .unwrap();
        account.display_name = "Juan P.".into();
        credentials.update(account).unwrap();

        let restarted = SessionManager::restored(kv);
        assert_eq!(
            restarted.current_account().map(|a| a.display_name.as_str()),
            Some("Juan P.")
        );
    }

    #[test]
    fn restore_with_stale_identity_logs_out() {
        let (kv, mut manager) = manager();
        manager.register_student(Identity::new("temp@uanl.edu.mx"), "pw").unwrap();
        manager.login(&Identity::new("temp@uanl.edu.mx"), "pw").unwrap();

        // Account removed out of band: reseed the collection.
        kv.remove(keys::ACCOUNTS).unwrap();

        let restarted = SessionManager::restored(kv.clone());
        assert!(!restarted.session().is_authenticated());
        assert!(kv.get(keys::SESSION_MARKER).unwrap().is_none());
    }

    #[test]
    fn restore_with_garbage_snapshot_logs_out() {
        let (kv, _manager) = manager();
        kv.set(keys::SESSION_MARKER, keys::SESSION_VALID).unwrap();
        kv.set(keys::SESSION_SNAPSHOT, "{oops").unwrap();
        let restarted = SessionManager::restored(kv.clone());
        assert!(!restarted.session().is_authenticated());
        assert!(kv.get(keys::SESSION_SNAPSHOT).unwrap().is_none());
    }

    #[test]
    fn register_student_then_login() {
        let (_kv, mut manager) = manager();
        manager
            .register_student(Identity::new("nuevo@uanl.edu.mx"), "clave")
            .unwrap();
        assert!(manager.identity_exists(&Identity::new("nuevo@uanl.edu.mx")));
        let account = manager
            .login(&Identity::new("nuevo@uanl.edu.mx"), "clave")
            .unwrap();
        assert_eq!(account.role(), Role::Student);
        assert_eq!(account.display_name, DEFAULT_STUDENT_NAME);
        assert!(account.registered_event_ids.is_empty());
    }

    #[test]
    fn register_student_rejects_duplicates_and_bad_input() {
        let (_kv, mut manager) = manager();
        let dup = manager
            .register_student(Identity::new("alumno@uanl.edu.mx"), "x")
            .unwrap_err();
        assert!(dup.is_duplicate_identity());
        assert!(matches!(
            manager.register_student(Identity::new("not-an-email"), "x"),
            Err(AccessError::Validation(_))
        ));
        assert!(matches!(
            manager.register_student(Identity::new("ok@uanl.edu.mx"), ""),
            Err(AccessError::Validation(_))
        ));
        assert!(matches!(
            manager.register_student(Identity::new("ok@uanl.edu.mx"), "   "),
            Err(AccessError::Validation(_))
        ));
        assert!(!manager.identity_exists(&Identity::new("ok@uanl.edu.mx")));
    }

    #[test]
    fn link_without_session_is_noop() {
        let (kv, mut manager) = manager();
        let before = kv.get(keys::ACCOUNTS).unwrap();
        manager.link_event_registration(EventId::new("1")).unwrap();
        assert_eq!(kv.get(keys::ACCOUNTS).unwrap(), before);
    }

    #[test]
    fn link_is_idempotent_and_refreshes_snapshot() {
        let (kv, mut manager) = manager();
        manager
            .login(&Identity::new("alumno@uanl.edu.mx"), "alumno123")
            .unwrap();
        manager.link_event_registration(EventId::new("2")).unwrap();
        manager.link_event_registration(EventId::new("2")).unwrap();

        let ids = &manager.current_account().unwrap().registered_event_ids;
        assert_eq!(ids, &vec![EventId::new("2")]);

        let snapshot: Account =
            serde_json::from_str(&kv.get(keys::SESSION_SNAPSHOT).unwrap().unwrap()).unwrap();
        assert_eq!(snapshot.registered_event_ids, vec![EventId::new("2")]);

        let credentials = CredentialStore::open(kv);
        let stored = credentials
            .find_by_identity(&Identity::new("alumno@uanl.edu.mx"))
            .unwrap();
        assert_eq!(stored.registered_event_ids, vec![EventId::new("2")]);
    }
}
