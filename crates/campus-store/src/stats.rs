//! Reporting metrics derived from an event snapshot.
//!
//! Everything here is a pure projection: nothing is cached and no record is
//! mutated. Recompute on every call.

use std::collections::BTreeMap;

use campus_core::{EventId, EventRecord, EventStatus, Modality};
use serde::Serialize;

/// Number of entries in the default "top events" ranking.
pub const DEFAULT_TOP_N: usize = 3;

/// Read-only projection over a snapshot of events.
#[derive(Debug, Clone, Copy)]
pub struct StatsAggregator<'a> {
    events: &'a [EventRecord],
}

impl<'a> StatsAggregator<'a> {
    /// Wraps a snapshot.
    pub fn new(events: &'a [EventRecord]) -> Self {
        Self { events }
    }

    /// Count of all records regardless of status.
    pub fn total(&self) -> usize {
        self.events.len()
    }

    /// Count of published records.
    pub fn active_count(&self) -> usize {
        self.count_by_status(EventStatus::Published)
    }

    /// Count of records in `status`.
    pub fn count_by_status(&self, status: EventStatus) -> usize {
        self.events.iter().filter(|e| e.status == status).count()
    }

    /// Sum of registrations over all records.
    pub fn total_registrations(&self) -> u64 {
        self.events
            .iter()
            .map(|e| u64::from(e.registration_count))
            .sum()
    }

    /// Sum of attendance over all records.
    pub fn total_attendance(&self) -> u64 {
        self.events.iter().map(|e| u64::from(e.attendance_count)).sum()
    }

    /// Up to `n` records with the most registrations, descending. Ties keep
    /// collection order.
    pub fn top_by_registrations(&self, n: usize) -> Vec<&'a EventRecord> {
        let mut ranked: Vec<&'a EventRecord> = self.events.iter().collect();
        ranked.sort_by(|a, b| b.registration_count.cmp(&a.registration_count));
        ranked.truncate(n);
        ranked
    }

    /// Number of records per category.
    pub fn distribution_by_category(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for event in self.events {
            *counts.entry(event.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of records per modality.
    pub fn distribution_by_modality(&self) -> BTreeMap<Modality, usize> {
        let mut counts = BTreeMap::new();
        for event in self.events {
            *counts.entry(event.modality).or_insert(0) += 1;
        }
        counts
    }

    /// Bundles every metric, ranking the top `n` events.
    pub fn report(&self, n: usize) -> StatsReport {
        StatsReport {
            total: self.total(),
            active: self.active_count(),
            pending: self.count_by_status(EventStatus::Pending),
            rejected: self.count_by_status(EventStatus::Rejected),
            total_registrations: self.total_registrations(),
            total_attendance: self.total_attendance(),
            top: self
                .top_by_registrations(n)
                .into_iter()
                .map(|e| RankedEvent {
                    id: e.id.clone(),
                    title: e.title.clone(),
                    registration_count: e.registration_count,
                })
                .collect(),
            by_category: self.distribution_by_category(),
            by_modality: self.distribution_by_modality(),
        }
    }
}

/// Entry of the registration ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEvent {
    /// Event id.
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Registrations at report time.
    pub registration_count: u32,
}

/// All reporting metrics for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    /// Count of all records.
    pub total: usize,
    /// Count of published records.
    pub active: usize,
    /// Count of pending records.
    pub pending: usize,
    /// Count of rejected records.
    pub rejected: usize,
    /// Sum of registrations.
    pub total_registrations: u64,
    /// Sum of attendance.
    pub total_attendance: u64,
    /// Registration ranking.
    pub top: Vec<RankedEvent>,
    /// Records per category.
    pub by_category: BTreeMap<String, usize>,
    /// Records per modality.
    pub by_modality: BTreeMap<Modality, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::seed;

    fn with_registrations(counts: &[u32]) -> Vec<EventRecord> {
        let template = seed::events().remove(0);
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let mut e = template.clone();
                e.id = EventId::new(format!("e{i}"));
                e.registration_count = count;
                e
            })
            .collect()
    }

    #[test]
    fn top_three_keeps_tie_order() {
        let events = with_registrations(&[10, 50, 50, 0, 30]);
        let top: Vec<_> = StatsAggregator::new(&events)
            .top_by_registrations(DEFAULT_TOP_N)
            .into_iter()
            .map(|e| e.id.as_str().to_string())
            .collect();
        assert_eq!(top, vec!["e1", "e2", "e4"]);
    }

    #[test]
    fn top_truncates_to_available_records() {
        let events = with_registrations(&[5]);
        assert_eq!(StatsAggregator::new(&events).top_by_registrations(3).len(), 1);
        assert!(StatsAggregator::new(&[]).top_by_registrations(3).is_empty());
    }

    #[test]
    fn totals_and_distributions() {
        let mut events = seed::events();
        events[0].registration_count = 12;
        events[1].registration_count = 30;
        events[1].status = EventStatus::Pending;
        events[2].status = EventStatus::Rejected;

        let stats = StatsAggregator::new(&events);
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.active_count(), 2);
        assert_eq!(stats.total_registrations(), 42);
        assert_eq!(stats.distribution_by_category().get("Cultural"), Some(&2));
        assert_eq!(stats.distribution_by_category().get("Deportivo"), Some(&1));
        assert_eq!(
            stats.distribution_by_modality().get(&Modality::InPerson),
            Some(&3)
        );

        let report = stats.report(2);
        assert_eq!(report.pending, 1);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.top.len(), 2);
        assert_eq!(report.top[0].registration_count, 30);
    }

    #[test]
    fn report_serializes_modality_keys() {
        let events = seed::events();
        let value = serde_json::to_value(StatsAggregator::new(&events).report(1)).unwrap();
        assert_eq!(value["by_modality"]["in_person"], 3);
        assert_eq!(value["by_modality"]["hybrid"], 1);
    }
}
