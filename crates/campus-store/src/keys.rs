/// Account collection.
pub const ACCOUNTS: &str = "uni_users_db";
/// Session marker; holds [`SESSION_VALID`] while a session is persisted.
pub const SESSION_MARKER: &str = "uni_session";
/// Snapshot of the account that owns the persisted session.
pub const SESSION_SNAPSHOT: &str = "uni_user";
/// Event collection.
pub const EVENTS: &str = "uni_events";
/// Organizational unit collection.
pub const DEPENDENCIES: &str = "uni_dependencies";

/// Marker value meaning "a session was valid as of the last write".
pub const SESSION_VALID: &str = "valid";
