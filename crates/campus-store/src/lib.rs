//! Persistence and derived views for the campus events catalog.
//!
//! This crate provides:
//! - `KeyValueStore` trait for the durable string key-value substrate
//! - File-backed and in-memory substrate implementations
//! - `CredentialStore`, `EventLifecycleStore` and `DependencyStore`
//!   collections, each re-serialized in full after every mutation
//! - Event filtering API for catalog queries
//! - `StatsAggregator` reporting over an event snapshot
//!
//! Collections that are missing or unreadable are reseeded from the
//! built-in defaults in `campus_core::seed` and written back; a read never
//! fails upward.

#![deny(missing_docs)]

/// Shared load/save helpers for JSON collections.
pub mod collection;
/// Account collection.
pub mod credentials;
/// Organizational unit collection.
pub mod dependencies;
/// Error types for store operations.
pub mod error;
/// Event collection and lifecycle transitions.
pub mod events;
/// File-backed substrate.
pub mod file;
/// Event filtering API.
pub mod filter;
/// Storage keys.
pub mod keys;
/// In-memory substrate.
pub mod memory;
/// Reporting metrics derived from events.
pub mod stats;
/// Storage substrate trait.
pub mod traits;

pub use credentials::CredentialStore;
pub use dependencies::DependencyStore;
pub use error::StoreError;
pub use events::EventLifecycleStore;
pub use file::{FileStore, FileStoreOptions};
pub use filter::{
    AndFilter, CategoryFilter, DateRangeFilter, EventFilter, ModalityFilter, OrFilter,
    OrganizingUnitFilter, StatusFilter,
};
pub use memory::MemoryStore;
pub use stats::{StatsAggregator, StatsReport, DEFAULT_TOP_N};
pub use traits::{KeyValueStore, SharedStore};
