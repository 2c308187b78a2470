//! Session lifecycle against file-backed storage.

use campus_access::{decide_path, AccessError, Action, Route, SessionManager};
use campus_core::{AdminRegistration, EventId, Identity, Role};
use campus_store::{
    keys, EventLifecycleStore, FileStore, FileStoreOptions, KeyValueStore, SharedStore,
};
use std::rc::Rc;
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> SharedStore {
    Rc::new(FileStore::open(dir.path(), FileStoreOptions::default()).unwrap())
}

#[test]
fn test_session_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let mut manager = SessionManager::restored(open_store(&temp_dir));
        manager
            .login(&Identity::new("alumno@uanl.edu.mx"), "alumno123")
            .unwrap();
    }

    let manager = SessionManager::restored(open_store(&temp_dir));
    assert!(manager.session().is_authenticated());
    assert_eq!(manager.session().role(), Some(Role::Student));
    assert_eq!(
        decide_path("/my-events", manager.session()),
        Action::Allow
    );
}

#[test]
fn test_logout_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let mut manager = SessionManager::restored(open_store(&temp_dir));
        manager
            .login(&Identity::new("admin@uanl.edu.mx"), "admin123")
            .unwrap();
        assert_eq!(manager.logout(), Route::Login);
    }

    let manager = SessionManager::restored(open_store(&temp_dir));
    assert!(!manager.session().is_authenticated());
    assert_eq!(
        decide_path("/admin", manager.session()),
        Action::RedirectToLogin
    );
}

#[test]
fn test_failed_login_leaves_storage_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let kv = open_store(&temp_dir);
    let mut manager = SessionManager::restored(kv.clone());

    let result = manager.login(&Identity::new("admin@uanl.edu.mx"), "wrong");
    assert!(matches!(result, Err(AccessError::CredentialMismatch)));
    assert!(kv.get(keys::SESSION_MARKER).unwrap().is_none());
    assert!(kv.get(keys::SESSION_SNAPSHOT).unwrap().is_none());
}

#[test]
fn test_marker_without_account_is_cleared() {
    let temp_dir = TempDir::new().unwrap();
    let kv = open_store(&temp_dir);
    kv.set(keys::SESSION_MARKER, keys::SESSION_VALID).unwrap();
    kv.set(
        keys::SESSION_SNAPSHOT,
        r#"{"identity":"ghost@uanl.edu.mx","display_name":"Ghost"}"#,
    )
    .unwrap();

    let manager = SessionManager::restored(kv.clone());
    assert!(!manager.session().is_authenticated());
    assert!(kv.get(keys::SESSION_MARKER).unwrap().is_none());
    assert!(!temp_dir.path().join("uni_session.json").exists());
}

#[test]
fn test_admin_registration_and_area_access() {
    let temp_dir = TempDir::new().unwrap();
    let mut manager = SessionManager::restored(open_store(&temp_dir));

    manager
        .register_admin(AdminRegistration {
            identity: Identity::new("resp@fcfm.uanl.mx"),
            password: "s3cret".to_string(),
            name: "Laura".to_string(),
            paternal_name: Some("Garza".to_string()),
            maternal_name: Some("Treviño".to_string()),
            dependency: "FCFM".to_string(),
        })
        .unwrap();

    let duplicate = manager
        .register_student(Identity::new("resp@fcfm.uanl.mx"), "x")
        .unwrap_err();
    assert!(duplicate.is_duplicate_identity());

    manager
        .login(&Identity::new("resp@fcfm.uanl.mx"), "s3cret")
        .unwrap();
    assert_eq!(decide_path("/admin/reports", manager.session()), Action::Allow);
    assert_eq!(
        decide_path("/login", manager.session()).destination(),
        Some(Route::AdminEvents)
    );
}

#[test]
fn test_registration_links_persist_across_restart() {
    let temp_dir = TempDir::new().unwrap();

    {
        let mut manager = SessionManager::restored(open_store(&temp_dir));
        manager
            .register_student(Identity::new("nuevo@uanl.edu.mx"), "pw")
            .unwrap();
        manager
            .login(&Identity::new("nuevo@uanl.edu.mx"), "pw")
            .unwrap();
        manager.link_event_registration(EventId::new("3")).unwrap();
        manager.link_event_registration(EventId::new("1")).unwrap();
        manager.link_event_registration(EventId::new("3")).unwrap();
    }

    let manager = SessionManager::restored(open_store(&temp_dir));
    let account = manager.current_account().unwrap();
    assert_eq!(
        account.registered_event_ids,
        vec![EventId::new("3"), EventId::new("1")]
    );
}

#[test]
fn test_deleted_event_leaves_dangling_registration() {
    let temp_dir = TempDir::new().unwrap();
    let kv = open_store(&temp_dir);
    let mut manager = SessionManager::restored(kv.clone());
    manager
        .login(&Identity::new("alumno@uanl.edu.mx"), "alumno123")
        .unwrap();
    manager.link_event_registration(EventId::new("4")).unwrap();

    let mut events = EventLifecycleStore::open(kv.clone());
    events.delete(&EventId::new("4")).unwrap();

    // Account registrations are not cleaned up when an event is removed.
    let manager = SessionManager::restored(kv);
    let account = manager.current_account().unwrap();
    assert!(account.is_registered_for(&EventId::new("4")));
    assert!(events.get(&EventId::new("4")).is_none());
}
