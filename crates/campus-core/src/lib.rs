//! Data model primitives for the campus events catalog.
//!
//! This crate provides:
//! - Identifier newtypes (`Identity`, `EventId`, `DependencyId`)
//! - Salted one-way password digests
//! - Account records with a role-tagged profile
//! - Event records and the approval state machine
//! - Organizational units ("dependencies") that organize events
//! - Built-in seed data used when persisted collections are missing
//!
//! Core invariants:
//! - A credential digest is never reversible and never stored next to the password
//! - Events are only created `Pending`; `Published` and `Rejected` are terminal
//! - Typed drafts and patches reject unknown fields at the boundary
//!
#![deny(missing_docs)]

/// Account records and role-specific profiles.
pub mod account;
/// Organizational units that host events.
pub mod dependency;
/// Password digests.
pub mod digest;
/// Event records, drafts, patches and lifecycle transitions.
pub mod event;
/// Identifier newtypes.
pub mod identifiers;
/// Built-in records used to seed empty or unreadable storage.
pub mod seed;
/// Validation errors shared by all primitives.
pub mod validation;

pub use account::{Account, AccountProfile, AdminRegistration, Role};
pub use dependency::{Dependency, DependencyDraft, DependencyKind};
pub use digest::{digest, PasswordDigest};
pub use event::{
    Comment, EventDraft, EventPatch, EventRecord, EventStatus, Modality, Transition,
    TransitionOutcome, DEFAULT_CAPACITY,
};
pub use identifiers::{DependencyId, EventId, Identity};
pub use validation::{require_text, ValidationError};
