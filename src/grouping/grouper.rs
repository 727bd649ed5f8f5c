//! Order-preserving record grouping.
//!
//! Sequenced grouping runs in two passes. The first buckets records by
//! `(entity, date)` and numbers each record within its bucket starting at 1.
//! The second concatenates the buckets of each entity in first-seen order.
//! Numbering must finish before buckets of different dates are merged, or
//! the numbers would no longer reflect same-day co-occurrence.

use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;

use super::collection::{CompositeKey, GroupKey, GroupedCollection};

/// How a record type is bucketed and numbered by [`group_sequenced`].
pub trait SequencedMapping {
    type Record;
    type Entry;

    fn entity_id(record: &Self::Record) -> GroupKey;

    fn date(record: &Self::Record) -> NaiveDate;

    /// Build the delivered entry; the entity id is not part of it.
    fn to_entry(record: Self::Record, sequence_number: u32) -> Self::Entry;
}

/// First pass: bucket by `entity#date` and stamp 1-based sequence numbers.
pub fn group_by_entity_and_date<M, I>(records: I) -> IndexMap<CompositeKey, Vec<M::Entry>>
where
    M: SequencedMapping,
    I: IntoIterator<Item = M::Record>,
{
    let mut buckets: IndexMap<CompositeKey, Vec<M::Entry>> = IndexMap::new();

    for record in records {
        let key = CompositeKey::new(M::entity_id(&record), M::date(&record));
        let bucket = buckets.entry(key).or_default();
        let sequence_number = bucket.len() as u32 + 1;
        bucket.push(M::to_entry(record, sequence_number));
    }

    buckets
}

/// Second pass: merge `entity#date` buckets under their entity.
pub fn regroup_by_entity<E>(buckets: IndexMap<CompositeKey, Vec<E>>) -> GroupedCollection<E> {
    let mut collection = GroupedCollection::new();

    for (key, entries) in buckets {
        let (entity, _date) = key.into_parts();
        collection.extend_group(entity, entries);
    }

    collection
}

/// Group by entity with per-entity-per-day sequence numbers.
pub fn group_sequenced<M, I>(records: I) -> GroupedCollection<M::Entry>
where
    M: SequencedMapping,
    I: IntoIterator<Item = M::Record>,
{
    regroup_by_entity(group_by_entity_and_date::<M, I>(records))
}

/// Single-pass grouping for relations without same-day multiplicity.
pub fn group_by_key<R, E, I, K, T>(records: I, key_of: K, to_entry: T) -> GroupedCollection<E>
where
    I: IntoIterator<Item = R>,
    K: Fn(&R) -> GroupKey,
    T: Fn(R) -> E,
{
    let mut collection = GroupedCollection::new();
    for record in records {
        let key = key_of(&record);
        collection.push(key, to_entry(record));
    }
    collection
}

/// Distinct values in first-seen order.
pub fn distinct_by<R, V, I, F>(records: I, value_of: F) -> Vec<V>
where
    I: IntoIterator<Item = R>,
    V: Hash + Eq,
    F: Fn(&R) -> V,
{
    records
        .into_iter()
        .map(|record| value_of(&record))
        .collect::<IndexSet<V>>()
        .into_iter()
        .collect()
}
