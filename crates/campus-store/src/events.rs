use campus_core::{
    seed, Comment, EventDraft, EventId, EventPatch, EventRecord, EventStatus, Transition,
    TransitionOutcome,
};

use crate::collection;
use crate::error::StoreError;
use crate::filter::EventFilter;
use crate::keys;
use crate::traits::SharedStore;

/// Event collection with the approval state machine.
///
/// Records are created only through [`submit`](Self::submit) and always
/// start `Pending`. Every mutation re-serializes the whole collection; a
/// failed write rolls the in-memory record back.
pub struct EventLifecycleStore {
    kv: SharedStore,
    events: Vec<EventRecord>,
}

impl EventLifecycleStore {
    /// Creates an empty, unloaded store over `kv`.
    pub fn new(kv: SharedStore) -> Self {
        Self {
            kv,
            events: Vec::new(),
        }
    }

    /// Creates a store and loads it immediately.
    pub fn open(kv: SharedStore) -> Self {
        let mut store = Self::new(kv);
        store.load();
        store
    }

    /// Reloads events from storage, reseeding the built-in catalog if
    /// storage is empty or unreadable.
    pub fn load(&mut self) -> &[EventRecord] {
        self.events = collection::load_or_seed(self.kv.as_ref(), keys::EVENTS, seed::events);
        &self.events
    }

    /// Snapshot of all records in collection order.
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &EventId) -> Option<&EventRecord> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Records matching `filter`, in collection order.
    pub fn filtered(&self, filter: &dyn EventFilter) -> Vec<&EventRecord> {
        self.events.iter().filter(|e| filter.matches(e)).collect()
    }

    /// The public catalog: published records only.
    pub fn published(&self) -> Vec<&EventRecord> {
        self.events
            .iter()
            .filter(|e| e.status == EventStatus::Published)
            .collect()
    }

    /// Creates a `Pending` record from `draft` and returns its new id.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] if the draft is incomplete
    /// - [`StoreError::Io`] / [`StoreError::Serialize`] if persisting fails
    pub fn submit(&mut self, draft: EventDraft) -> Result<EventId, StoreError> {
        let mut id = EventId::generate();
        while self.get(&id).is_some() {
            id = EventId::generate();
        }
        let record = EventRecord::from_draft(id.clone(), draft)?;
        self.events.push(record);
        if let Err(e) = self.persist() {
            self.events.pop();
            return Err(e);
        }
        tracing::info!(event_id = %id, "event submitted");
        Ok(id)
    }

    /// `Pending -> Published`. Terminal records keep their state.
    ///
    /// Returns the status after the call.
    pub fn approve(&mut self, id: &EventId) -> Result<EventStatus, StoreError> {
        self.transition(id, Transition::Approve).map(TransitionOutcome::status)
    }

    /// `Pending -> Rejected`. Terminal records keep their state.
    ///
    /// Returns the status after the call.
    pub fn reject(&mut self, id: &EventId) -> Result<EventStatus, StoreError> {
        self.transition(id, Transition::Reject).map(TransitionOutcome::status)
    }

    /// Applies a reviewer decision to the record `id`.
    pub fn transition(
        &mut self,
        id: &EventId,
        transition: Transition,
    ) -> Result<TransitionOutcome, StoreError> {
        let outcome = self.mutate(id, |record| Ok(record.transition(transition)))?;
        match outcome {
            TransitionOutcome::Applied { from, to } => {
                tracing::info!(event_id = %id, %from, %to, "event transitioned")
            }
            TransitionOutcome::Unchanged(status) => {
                tracing::debug!(event_id = %id, %status, ?transition, "terminal event left unchanged")
            }
        }
        Ok(outcome)
    }

    /// Merges `patch` into the record `id`.
    ///
    /// `status` changes only when the patch names one (administrative
    /// override; the transition rules are bypassed).
    pub fn update(&mut self, id: &EventId, patch: EventPatch) -> Result<(), StoreError> {
        let overrides_status = patch.status;
        self.mutate(id, |record| Ok(record.apply_patch(patch)?))?;
        if let Some(status) = overrides_status {
            tracing::info!(event_id = %id, %status, "event status overridden");
        }
        Ok(())
    }

    /// Removes the record `id` and returns it.
    ///
    /// Account registrations pointing at it are left dangling.
    pub fn delete(&mut self, id: &EventId) -> Result<EventRecord, StoreError> {
        let index = self.index_of(id)?;
        let removed = self.events.remove(index);
        if let Err(e) = self.persist() {
            self.events.insert(index, removed);
            return Err(e);
        }
        tracing::info!(event_id = %id, "event deleted");
        Ok(removed)
    }

    /// Counts one more registration; capacity is not enforced.
    ///
    /// Returns the new registration count.
    pub fn record_registration(&mut self, id: &EventId) -> Result<u32, StoreError> {
        self.mutate(id, |record| {
            record.registration_count = record.registration_count.saturating_add(1);
            Ok(record.registration_count)
        })
    }

    /// Takes back one registration, stopping at zero.
    ///
    /// Returns the new registration count.
    pub fn release_registration(&mut self, id: &EventId) -> Result<u32, StoreError> {
        self.mutate(id, |record| {
            record.registration_count = record.registration_count.saturating_sub(1);
            Ok(record.registration_count)
        })
    }

    /// Counts one more attendee; may exceed the registration count.
    ///
    /// Returns the new attendance count.
    pub fn record_attendance(&mut self, id: &EventId) -> Result<u32, StoreError> {
        self.mutate(id, |record| {
            record.attendance_count = record.attendance_count.saturating_add(1);
            Ok(record.attendance_count)
        })
    }

    /// Appends a comment to the record `id` and refreshes its rating.
    pub fn add_comment(&mut self, id: &EventId, comment: Comment) -> Result<(), StoreError> {
        self.mutate(id, |record| {
            record.add_comment(comment);
            Ok(())
        })
    }

    fn index_of(&self, id: &EventId) -> Result<usize, StoreError> {
        self.events
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| StoreError::EventNotFound(id.clone()))
    }

    fn mutate<R, F>(&mut self, id: &EventId, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut EventRecord) -> Result<R, StoreError>,
    {
        let index = self.index_of(id)?;
        let previous = self.events[index].clone();
        let result = f(&mut self.events[index]).and_then(|r| self.persist().map(|()| r));
        if result.is_err() {
            self.events[index] = previous;
        }
        result
    }

    fn persist(&self) -> Result<(), StoreError> {
        collection::write(self.kv.as_ref(), keys::EVENTS, &self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use campus_core::Modality;
    use chrono::NaiveDate;
    use std::rc::Rc;

    fn draft(title: &str) -> EventDraft {
        EventDraft {
            title: title.into(),
            category: "Académico".into(),
            organizing_unit: "FIME".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            display_date: None,
            location: "Auditorio FIME".into(),
            modality: Modality::InPerson,
            price: "Gratis".into(),
            image_url: None,
            capacity: Some(250),
            description: "Pi day".into(),
        }
    }

    fn store() -> (Rc<MemoryStore>, EventLifecycleStore) {
        let kv = Rc::new(MemoryStore::new());
        let events = EventLifecycleStore::open(kv.clone());
        (kv, events)
    }

    #[test]
    fn empty_storage_seeds_catalog() {
        let (_kv, events) = store();
        assert_eq!(events.events().len(), 4);
        assert_eq!(events.published().len(), 4);
    }

    #[test]
    fn submit_starts_pending() {
        let (_kv, mut events) = store();
        let id = events.submit(draft("Pi day")).unwrap();
        let record = events.get(&id).unwrap();
        assert_eq!(record.status, EventStatus::Pending);
        assert_eq!(record.capacity, 250);
        assert!(!events.published().iter().any(|e| e.id == id));
    }

    #[test]
    fn approve_then_reject_leaves_published() {
        let (_kv, mut events) = store();
        let id = events.submit(draft("Pi day")).unwrap();
        assert_eq!(events.approve(&id).unwrap(), EventStatus::Published);
        assert_eq!(events.reject(&id).unwrap(), EventStatus::Published);
        assert_eq!(events.approve(&id).unwrap(), EventStatus::Published);
    }

    #[test]
    fn reject_then_approve_leaves_rejected() {
        let (_kv, mut events) = store();
        let id = events.submit(draft("Pi day")).unwrap();
        assert_eq!(events.reject(&id).unwrap(), EventStatus::Rejected);
        assert_eq!(events.approve(&id).unwrap(), EventStatus::Rejected);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let (_kv, mut events) = store();
        let missing = EventId::new("missing");
        assert!(matches!(events.approve(&missing), Err(StoreError::EventNotFound(_))));
        assert!(matches!(events.reject(&missing), Err(StoreError::EventNotFound(_))));
        assert!(matches!(
            events.update(&missing, EventPatch::default()),
            Err(StoreError::EventNotFound(_))
        ));
        assert!(matches!(events.delete(&missing), Err(StoreError::EventNotFound(_))));
    }

    #[test]
    fn invalid_patch_is_rejected_and_not_persisted() {
        let (kv, mut events) = store();
        let id = EventId::new("1");
        let err = events
            .update(
                &id,
                EventPatch {
                    title: Some(" ".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        let reloaded = EventLifecycleStore::open(kv);
        assert_eq!(reloaded.get(&id), events.get(&id));
    }

    #[test]
    fn delete_removes_and_persists() {
        let (kv, mut events) = store();
        let removed = events.delete(&EventId::new("2")).unwrap();
        assert_eq!(removed.id, EventId::new("2"));
        let reloaded = EventLifecycleStore::open(kv);
        assert_eq!(reloaded.events().len(), 3);
        assert!(reloaded.get(&EventId::new("2")).is_none());
    }

    #[test]
    fn attendance_may_exceed_registrations() {
        let (_kv, mut events) = store();
        let id = EventId::new("4");
        events.record_registration(&id).unwrap();
        events.record_attendance(&id).unwrap();
        let attended = events.record_attendance(&id).unwrap();
        let record = events.get(&id).unwrap();
        assert_eq!(record.registration_count, 1);
        assert_eq!(attended, 2);
    }

    #[test]
    fn release_registration_stops_at_zero() {
        let (kv, mut events) = store();
        let id = EventId::new("3");
        events.record_registration(&id).unwrap();
        assert_eq!(events.release_registration(&id).unwrap(), 0);
        assert_eq!(events.release_registration(&id).unwrap(), 0);
        let reloaded = EventLifecycleStore::open(kv);
        assert_eq!(reloaded.get(&id).unwrap().registration_count, 0);
    }

    #[test]
    fn averaged_ratings_reload_unchanged() {
        let (kv, mut events) = store();
        let id = EventId::new("1");
        let ratings = [0.3, 0.6, 4.0, 4.0, 5.0, 0.1, 2.7, 3.3, 1.9, 4.4];

        for round in 0..60 {
            let rating = ratings[round % ratings.len()];
            events
                .add_comment(&id, Comment::new("Ana", "ok", rating).unwrap())
                .unwrap();
            let reloaded = EventLifecycleStore::open(kv.clone());
            assert_eq!(reloaded.events(), events.events(), "round {round}");
        }
    }

    #[test]
    fn thirteen_thirds_survives_reload() {
        let (kv, mut events) = store();
        let id = EventId::new("2");
        for rating in [4.0, 4.0, 5.0] {
            events
                .add_comment(&id, Comment::new("Luis", "bien", rating).unwrap())
                .unwrap();
        }
        assert_eq!(events.get(&id).unwrap().rating, 13.0 / 3.0);
        let reloaded = EventLifecycleStore::open(kv);
        assert_eq!(reloaded.get(&id).unwrap().rating, 13.0 / 3.0);
    }
}
