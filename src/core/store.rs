//! The CRM store - in-memory source of truth for the seven collections.
//!
//! Mutations are synchronous, total and infallible: adding always
//! succeeds, updating or removing an unknown id is a silent no-op that
//! reports `false`. The one enforced invariant is id uniqueness within a
//! collection, checked when pre-existing records are ingested.
//!
//! Every mutation emits a [`ChangeEvent`] to registered subscribers after
//! the collection has been replaced. No ordering or batching guarantees
//! beyond that.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::entity::Record;
use crate::core::identity::{EntityKind, RecordId};
use crate::entities::{Deal, FollowUp, Lead, Pledge, Property, Task, Viewing};

/// What happened to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Created,
    Updated,
    Removed,
}

/// Notification payload delivered to subscribers on every mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: EntityKind,
    pub change: Change,
    pub id: RecordId,
}

/// Handle returned by [`CrmStore::subscribe`], used to unsubscribe
pub type SubscriptionId = u64;

type Listener = Box<dyn Fn(&ChangeEvent)>;

/// Errors raised when ingesting pre-existing records (seed or snapshot)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate record id '{0}' in {1} collection")]
    DuplicateId(RecordId, EntityKind),
}

/// An ordered collection of one record type.
///
/// New records are prepended, matching the newest-first ordering the
/// dashboard views rely on. Ids come from a monotonic counter that is
/// seeded past the highest sequence ever ingested and never reused, so
/// delete-then-add cannot mint a duplicate id.
#[derive(Debug, Clone)]
pub struct Collection<T: Record> {
    records: Vec<T>,
    next_seq: u32,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_seq: 1,
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest pre-existing records, enforcing id uniqueness. The counter
    /// resumes from `counter` when one was persisted, and is always kept
    /// past the highest sequence present so a stale or missing counter
    /// (e.g. seed data) cannot mint a duplicate.
    pub fn from_records(records: Vec<T>, counter: u32) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        let mut max_seq = 0;

        for record in &records {
            let id = record.id();
            if !seen.insert(id.clone()) {
                return Err(StoreError::DuplicateId(id.clone(), T::KIND));
            }
            max_seq = max_seq.max(id.seq());
        }

        Ok(Self {
            records,
            next_seq: counter.max(max_seq + 1),
        })
    }

    /// Current counter value, persisted alongside the records so deleted
    /// ids stay retired across reloads
    pub fn next_seq(&self) -> u32 {
        self.next_seq
    }

    /// Mint the next id, build the record and prepend it.
    pub fn add(&mut self, draft: T::Draft) -> RecordId {
        let id = RecordId::new(T::KIND, self.next_seq);
        self.next_seq += 1;
        self.records.insert(0, T::create(id.clone(), draft));
        id
    }

    /// Shallow-merge a patch into the matching record. Unknown ids are a
    /// silent no-op; returns whether a record was touched.
    pub fn update(&mut self, id: &RecordId, patch: T::Patch) -> bool {
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                record.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Drop the matching record. Unknown ids are a silent no-op; returns
    /// whether a record was removed.
    pub fn remove(&mut self, id: &RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        self.records.len() != before
    }

    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A plain serializable image of all seven collections, used by
/// repositories and the seed loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub leads: Vec<Lead>,
    pub properties: Vec<Property>,
    pub deals: Vec<Deal>,
    pub pledges: Vec<Pledge>,
    pub tasks: Vec<Task>,
    pub viewings: Vec<Viewing>,
    pub follow_ups: Vec<FollowUp>,
    pub counters: Counters,
}

/// Per-collection id counters. Persisted with the snapshot: deriving
/// them from the surviving records would re-mint an id after the
/// highest-numbered record is deleted and the store reloaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Counters {
    pub leads: u32,
    pub properties: u32,
    pub deals: u32,
    pub pledges: u32,
    pub tasks: u32,
    pub viewings: u32,
    pub follow_ups: u32,
}

/// Ties a record type to its slot in the store, so the CRUD surface is
/// written once instead of seven times.
pub trait Slot: Record {
    fn slot(store: &CrmStore) -> &Collection<Self>;
    fn slot_mut(store: &mut CrmStore) -> &mut Collection<Self>;
}

/// The store. Owns the seven collections exclusively; consumers receive
/// it by reference and observe mutations through subscriptions.
#[derive(Default)]
pub struct CrmStore {
    leads: Collection<Lead>,
    properties: Collection<Property>,
    deals: Collection<Deal>,
    pledges: Collection<Pledge>,
    tasks: Collection<Task>,
    viewings: Collection<Viewing>,
    follow_ups: Collection<FollowUp>,

    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl CrmStore {
    /// An empty store with all counters at 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot, enforcing per-collection id uniqueness
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, StoreError> {
        let counters = snapshot.counters;
        Ok(Self {
            leads: Collection::from_records(snapshot.leads, counters.leads)?,
            properties: Collection::from_records(snapshot.properties, counters.properties)?,
            deals: Collection::from_records(snapshot.deals, counters.deals)?,
            pledges: Collection::from_records(snapshot.pledges, counters.pledges)?,
            tasks: Collection::from_records(snapshot.tasks, counters.tasks)?,
            viewings: Collection::from_records(snapshot.viewings, counters.viewings)?,
            follow_ups: Collection::from_records(snapshot.follow_ups, counters.follow_ups)?,
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Clone out a serializable image of all collections and counters
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            leads: self.leads.records().to_vec(),
            properties: self.properties.records().to_vec(),
            deals: self.deals.records().to_vec(),
            pledges: self.pledges.records().to_vec(),
            tasks: self.tasks.records().to_vec(),
            viewings: self.viewings.records().to_vec(),
            follow_ups: self.follow_ups.records().to_vec(),
            counters: Counters {
                leads: self.leads.next_seq(),
                properties: self.properties.next_seq(),
                deals: self.deals.next_seq(),
                pledges: self.pledges.next_seq(),
                tasks: self.tasks.next_seq(),
                viewings: self.viewings.next_seq(),
                follow_ups: self.follow_ups.next_seq(),
            },
        }
    }

    /// Create a record from a draft; returns the minted id
    pub fn add<T: Slot>(&mut self, draft: T::Draft) -> RecordId {
        let id = T::slot_mut(self).add(draft);
        self.emit(ChangeEvent {
            kind: T::KIND,
            change: Change::Created,
            id: id.clone(),
        });
        id
    }

    /// Shallow-merge a patch into the record with the given id.
    /// Silent no-op for unknown ids; returns whether anything changed.
    pub fn update<T: Slot>(&mut self, id: &RecordId, patch: T::Patch) -> bool {
        let changed = T::slot_mut(self).update(id, patch);
        if changed {
            self.emit(ChangeEvent {
                kind: T::KIND,
                change: Change::Updated,
                id: id.clone(),
            });
        }
        changed
    }

    /// Remove the record with the given id.
    /// Silent no-op for unknown ids; returns whether anything was removed.
    pub fn remove<T: Slot>(&mut self, id: &RecordId) -> bool {
        let removed = T::slot_mut(self).remove(id);
        if removed {
            self.emit(ChangeEvent {
                kind: T::KIND,
                change: Change::Removed,
                id: id.clone(),
            });
        }
        removed
    }

    pub fn get<T: Slot>(&self, id: &RecordId) -> Option<&T> {
        T::slot(self).get(id)
    }

    /// All records of one collection, newest first
    pub fn all<T: Slot>(&self) -> &[T] {
        T::slot(self).records()
    }

    pub fn len<T: Slot>(&self) -> usize {
        T::slot(self).len()
    }

    /// Register a change listener. The callback fires after every
    /// mutation, on the mutating call stack.
    pub fn subscribe(&mut self, listener: impl Fn(&ChangeEvent) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener; returns whether it existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn emit(&self, event: ChangeEvent) {
        for (_, listener) in &self.listeners {
            listener(&event);
        }
    }
}

impl Slot for Lead {
    fn slot(store: &CrmStore) -> &Collection<Self> {
        &store.leads
    }
    fn slot_mut(store: &mut CrmStore) -> &mut Collection<Self> {
        &mut store.leads
    }
}

impl Slot for Property {
    fn slot(store: &CrmStore) -> &Collection<Self> {
        &store.properties
    }
    fn slot_mut(store: &mut CrmStore) -> &mut Collection<Self> {
        &mut store.properties
    }
}

impl Slot for Deal {
    fn slot(store: &CrmStore) -> &Collection<Self> {
        &store.deals
    }
    fn slot_mut(store: &mut CrmStore) -> &mut Collection<Self> {
        &mut store.deals
    }
}

impl Slot for Pledge {
    fn slot(store: &CrmStore) -> &Collection<Self> {
        &store.pledges
    }
    fn slot_mut(store: &mut CrmStore) -> &mut Collection<Self> {
        &mut store.pledges
    }
}

impl Slot for Task {
    fn slot(store: &CrmStore) -> &Collection<Self> {
        &store.tasks
    }
    fn slot_mut(store: &mut CrmStore) -> &mut Collection<Self> {
        &mut store.tasks
    }
}

impl Slot for Viewing {
    fn slot(store: &CrmStore) -> &Collection<Self> {
        &store.viewings
    }
    fn slot_mut(store: &mut CrmStore) -> &mut Collection<Self> {
        &mut store.viewings
    }
}

impl Slot for FollowUp {
    fn slot(store: &CrmStore) -> &Collection<Self> {
        &store.follow_ups
    }
    fn slot_mut(store: &mut CrmStore) -> &mut Collection<Self> {
        &mut store.follow_ups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::brand::Brand;
    use crate::core::entity::Priority;
    use crate::core::money::Money;
    use crate::entities::lead::{LeadDraft, LeadPatch, LeadStatus};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn lead_draft(name: &str) -> LeadDraft {
        LeadDraft {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "+971 50 000 0000".to_string(),
            brand: Brand::RealEstate,
            status: LeadStatus::New,
            priority: Priority::Medium,
            value: Money::aed(1_000_000),
            assigned_to: "Omar".to_string(),
            interest: None,
            company: None,
            source: None,
        }
    }

    #[test]
    fn test_add_prepends_and_mints_sequential_ids() {
        let mut store = CrmStore::new();
        let first = store.add::<Lead>(lead_draft("Amal"));
        let second = store.add::<Lead>(lead_draft("Bilal"));

        assert_eq!(first.to_string(), "L001");
        assert_eq!(second.to_string(), "L002");

        let leads = store.all::<Lead>();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].name, "Bilal");
        assert_eq!(leads[1].name, "Amal");
    }

    #[test]
    fn test_counter_not_reused_after_remove() {
        let mut store = CrmStore::new();
        store.add::<Lead>(lead_draft("Amal"));
        store.add::<Lead>(lead_draft("Bilal"));
        let third = store.add::<Lead>(lead_draft("Chandra"));

        assert!(store.remove::<Lead>(&third));
        let fourth = store.add::<Lead>(lead_draft("Dana"));

        assert_eq!(fourth.to_string(), "L004");
        assert!(store.all::<Lead>().iter().all(|l| l.id != third));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = CrmStore::new();
        store.add::<Lead>(lead_draft("Amal"));
        let before = store.snapshot();

        let missing = RecordId::new(EntityKind::Lead, 999);
        let changed = store.update::<Lead>(
            &missing,
            LeadPatch {
                status: Some(LeadStatus::Won),
                ..Default::default()
            },
        );

        assert!(!changed);
        assert_eq!(store.snapshot().leads, before.leads);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = CrmStore::new();
        store.add::<Lead>(lead_draft("Amal"));
        let missing = RecordId::new(EntityKind::Lead, 999);

        assert!(!store.remove::<Lead>(&missing));
        assert_eq!(store.len::<Lead>(), 1);
    }

    #[test]
    fn test_from_records_rejects_duplicate_ids() {
        let id = RecordId::new(EntityKind::Lead, 1);
        let a = Lead::create(id.clone(), lead_draft("Amal"));
        let b = Lead::create(id, lead_draft("Bilal"));

        let err = Collection::from_records(vec![a, b], 0).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(_, EntityKind::Lead)));
    }

    #[test]
    fn test_from_records_seeds_counter_past_max() {
        let a = Lead::create(RecordId::new(EntityKind::Lead, 4), lead_draft("Amal"));
        let b = Lead::create(RecordId::new(EntityKind::Lead, 9), lead_draft("Bilal"));
        let mut collection = Collection::from_records(vec![a, b], 0).unwrap();

        let id = collection.add(lead_draft("Chandra"));
        assert_eq!(id.to_string(), "L010");
    }

    #[test]
    fn test_from_records_honors_persisted_counter() {
        let a = Lead::create(RecordId::new(EntityKind::Lead, 1), lead_draft("Amal"));
        let mut collection = Collection::from_records(vec![a], 5).unwrap();

        let id = collection.add(lead_draft("Bilal"));
        assert_eq!(id.to_string(), "L005");
    }

    #[test]
    fn test_snapshot_carries_counters_across_reload() {
        let mut store = CrmStore::new();
        store.add::<Lead>(lead_draft("Amal"));
        let second = store.add::<Lead>(lead_draft("Bilal"));
        store.remove::<Lead>(&second);

        let mut reloaded = CrmStore::from_snapshot(store.snapshot()).unwrap();
        let third = reloaded.add::<Lead>(lead_draft("Chandra"));
        assert_eq!(third.to_string(), "L003");
    }

    #[test]
    fn test_subscribers_see_each_mutation() {
        let mut store = CrmStore::new();
        let seen: Rc<RefCell<Vec<ChangeEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let id = store.add::<Lead>(lead_draft("Amal"));
        store.update::<Lead>(
            &id,
            LeadPatch {
                status: Some(LeadStatus::Contacted),
                ..Default::default()
            },
        );
        store.remove::<Lead>(&id);

        let events = seen.borrow();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].change, Change::Created);
        assert_eq!(events[1].change, Change::Updated);
        assert_eq!(events[2].change, Change::Removed);
        assert!(events.iter().all(|e| e.kind == EntityKind::Lead && e.id == id));
    }

    #[test]
    fn test_noop_mutations_do_not_notify() {
        let mut store = CrmStore::new();
        let count = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&count);
        store.subscribe(move |_| *sink.borrow_mut() += 1);

        let missing = RecordId::new(EntityKind::Lead, 7);
        store.update::<Lead>(&missing, LeadPatch::default());
        store.remove::<Lead>(&missing);

        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut store = CrmStore::new();
        let count = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&count);
        let sub = store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.add::<Lead>(lead_draft("Amal"));
        assert!(store.unsubscribe(sub));
        store.add::<Lead>(lead_draft("Bilal"));

        assert_eq!(*count.borrow(), 1);
        assert!(!store.unsubscribe(sub));
    }
}
