//! Event filtering API for catalog queries.

use campus_core::{EventRecord, EventStatus, Modality};
use chrono::NaiveDate;

/// Trait for selecting events from a snapshot.
pub trait EventFilter {
    /// Returns true if the event matches the filter criteria.
    fn matches(&self, event: &EventRecord) -> bool;
}

/// Filter by approval state.
#[derive(Debug, Clone)]
pub struct StatusFilter {
    /// Status to match.
    pub status: EventStatus,
}

impl EventFilter for StatusFilter {
    fn matches(&self, event: &EventRecord) -> bool {
        event.status == self.status
    }
}

/// Filter by category (case-insensitive).
#[derive(Debug, Clone)]
pub struct CategoryFilter {
    /// Category to match (e.g., "Cultural", "Deportivo").
    pub category: String,
}

impl EventFilter for CategoryFilter {
    fn matches(&self, event: &EventRecord) -> bool {
        event.category.to_lowercase() == self.category.to_lowercase()
    }
}

/// Filter by attendance modality.
#[derive(Debug, Clone)]
pub struct ModalityFilter {
    /// Modality to match.
    pub modality: Modality,
}

impl EventFilter for ModalityFilter {
    fn matches(&self, event: &EventRecord) -> bool {
        event.modality == self.modality
    }
}

/// Filter by organizing unit (case-insensitive).
#[derive(Debug, Clone)]
pub struct OrganizingUnitFilter {
    /// Organizing unit to match.
    pub organizing_unit: String,
}

impl EventFilter for OrganizingUnitFilter {
    fn matches(&self, event: &EventRecord) -> bool {
        event.organizing_unit.to_lowercase() == self.organizing_unit.to_lowercase()
    }
}

/// Filter by date range.
#[derive(Debug, Clone)]
pub struct DateRangeFilter {
    /// Include events on or after this date.
    pub after: Option<NaiveDate>,
    /// Include events on or before this date.
    pub before: Option<NaiveDate>,
}

impl EventFilter for DateRangeFilter {
    fn matches(&self, event: &EventRecord) -> bool {
        if let Some(after) = self.after {
            if event.date < after {
                return false;
            }
        }
        if let Some(before) = self.before {
            if event.date > before {
                return false;
            }
        }
        true
    }
}

/// Composite filter: all filters must match (AND). Empty matches everything.
#[derive(Default)]
pub struct AndFilter {
    /// Filters to combine with AND logic.
    pub filters: Vec<Box<dyn EventFilter>>,
}

impl EventFilter for AndFilter {
    fn matches(&self, event: &EventRecord) -> bool {
        self.filters.iter().all(|f| f.matches(event))
    }
}

/// Composite filter: any filter must match (OR).
#[derive(Default)]
pub struct OrFilter {
    /// Filters to combine with OR logic.
    pub filters: Vec<Box<dyn EventFilter>>,
}

impl EventFilter for OrFilter {
    fn matches(&self, event: &EventRecord) -> bool {
        self.filters.iter().any(|f| f.matches(event))
    }
}
