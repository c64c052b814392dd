//! Entity store
//!
//! A generic record store backing the four collections (users, products,
//! bins, transactions). The store assigns identity and creation/update
//! stamps, returns defensive copies on every read, filters with ordinary
//! predicates ordered newest-first, treats updates of a missing id as a
//! silent no-op, and reports deletes with a boolean.
//!
//! # Contract vs. engine
//!
//! The [`EntityStore`] trait is the storage contract; [`MemoryStore`] is
//! the in-memory engine behind it, built on `DashMap` so operations on
//! different records proceed in parallel while operations on the same
//! record are serialized. A persistent engine can be swapped in behind the
//! same trait without touching orchestration logic.
//!
//! # Atomicity
//!
//! A single `update` call is atomic: the closure runs while the record's
//! entry is locked, so no other thread can observe a partially-updated
//! record. The store provides no atomicity *across* calls; composing
//! multiple store operations into one logical effect is the caller's
//! responsibility (see the wallet ledger's settlement path, which performs
//! its companion insert inside the user's update closure).

use crate::types::{Record, RecordId, RewardsError};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Storage contract for one record collection
///
/// Implementations must be safe for concurrent use; all methods take
/// `&self`.
pub trait EntityStore<R: Record>: Send + Sync {
    /// Persist a new record: assigns a fresh identity, stamps creation and
    /// update times, and returns the stored copy
    fn insert(&self, record: R) -> R;

    /// Persist a record that already carries its identity and stamps
    ///
    /// Used for seed data with stable identities; takes the same position
    /// in the newest-first ordering as a regular insert.
    fn insert_seeded(&self, record: R) -> R;

    /// Fetch a record by identity, as a defensive copy
    fn get(&self, id: &RecordId) -> Option<R>;

    /// First record matching the predicate, if any
    ///
    /// Intended for unique lookups (email, external bin identifier); no
    /// ordering is guaranteed when the predicate matches several records.
    fn find<P>(&self, pred: P) -> Option<R>
    where
        P: Fn(&R) -> bool;

    /// All records matching the predicate, newest-first
    fn filter<P>(&self, pred: P) -> Vec<R>
    where
        P: Fn(&R) -> bool;

    /// Apply a partial update under the record's entry lock
    ///
    /// Returns `Ok(None)` without error when the id is absent (silent
    /// no-op). On success the record's update stamp is refreshed and the
    /// updated copy returned. An error from the closure leaves the update
    /// stamp untouched and is propagated.
    fn update<F>(&self, id: &RecordId, f: F) -> Result<Option<R>, RewardsError>
    where
        F: FnOnce(&mut R) -> Result<(), RewardsError>;

    /// Remove a record, reporting whether it was present
    fn remove(&self, id: &RecordId) -> bool;

    /// Number of stored records
    fn len(&self) -> usize;

    /// Whether the store holds no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Insertion-ordered entry wrapper
///
/// The sequence number reproduces "newest-first" listings without relying
/// on timestamp resolution when records are created in quick succession.
#[derive(Debug, Clone)]
struct Entry<R> {
    seq: u64,
    record: R,
}

/// In-memory store engine backed by a concurrent map
///
/// Operations on different records proceed in parallel; operations on the
/// same record are serialized by the map's per-entry locking.
#[derive(Debug)]
pub struct MemoryStore<R: Record> {
    next_seq: AtomicU64,
    records: DashMap<RecordId, Entry<R>>,
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> MemoryStore<R> {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore {
            next_seq: AtomicU64::new(0),
            records: DashMap::new(),
        }
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }
}

impl<R: Record> EntityStore<R> for MemoryStore<R> {
    fn insert(&self, mut record: R) -> R {
        record.assign(RecordId::new_v4(), Utc::now());
        let seq = self.next_seq();
        self.records.insert(record.id(), Entry {
            seq,
            record: record.clone(),
        });
        record
    }

    fn insert_seeded(&self, record: R) -> R {
        let seq = self.next_seq();
        self.records.insert(record.id(), Entry {
            seq,
            record: record.clone(),
        });
        record
    }

    fn get(&self, id: &RecordId) -> Option<R> {
        self.records.get(id).map(|entry| entry.record.clone())
    }

    fn find<P>(&self, pred: P) -> Option<R>
    where
        P: Fn(&R) -> bool,
    {
        self.records
            .iter()
            .find(|entry| pred(&entry.record))
            .map(|entry| entry.record.clone())
    }

    fn filter<P>(&self, pred: P) -> Vec<R>
    where
        P: Fn(&R) -> bool,
    {
        let mut matches: Vec<(u64, R)> = self
            .records
            .iter()
            .filter(|entry| pred(&entry.record))
            .map(|entry| (entry.seq, entry.record.clone()))
            .collect();
        matches.sort_by(|a, b| b.0.cmp(&a.0));
        matches.into_iter().map(|(_, record)| record).collect()
    }

    fn update<F>(&self, id: &RecordId, f: F) -> Result<Option<R>, RewardsError>
    where
        F: FnOnce(&mut R) -> Result<(), RewardsError>,
    {
        match self.records.get_mut(id) {
            Some(mut entry) => {
                f(&mut entry.record)?;
                entry.record.touch(Utc::now());
                Ok(Some(entry.record.clone()))
            }
            None => Ok(None),
        }
    }

    fn remove(&self, id: &RecordId) -> bool {
        self.records.remove(id).is_some()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
