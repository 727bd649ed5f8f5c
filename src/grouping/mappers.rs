//! Stream mappers turning raw extract rows into delivery collections.
//!
//! Mappers are stateless: every call builds a fresh collection. Rows are
//! coerced to typed records before any grouping starts, so a single
//! malformed row fails the whole call and no partial collection escapes.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Debug;

use super::collection::{GroupKey, GroupedCollection};
use super::grouper::{distinct_by, group_by_key, group_sequenced, SequencedMapping};
use crate::error::SyncResult;
use crate::models::{
    InteractionEntry, MembershipEntry, OrganizationEntry, RawRow, Record, Schema,
    TherapistInteraction, TherapistMembership,
};

/// Turns the rows of one window into the collection delivered for it.
pub trait CollectionMapper: Send + Sync {
    type Entry: Serialize + Debug + Clone + Send + Sync;

    fn schema(&self) -> &'static Schema;

    fn map(&self, rows: &[RawRow]) -> SyncResult<GroupedCollection<Self::Entry>>;
}

/// Interactions grouped by therapist, numbered per therapist per day.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionMapper;

impl SequencedMapping for InteractionMapper {
    type Record = TherapistInteraction;
    type Entry = InteractionEntry;

    fn entity_id(record: &TherapistInteraction) -> GroupKey {
        GroupKey::from(record.therapist_id.as_str())
    }

    fn date(record: &TherapistInteraction) -> NaiveDate {
        record.interaction_date
    }

    fn to_entry(record: TherapistInteraction, sequence_number: u32) -> InteractionEntry {
        InteractionEntry {
            interaction_date: record.interaction_date,
            chat_count: record.chat_count,
            call_count: record.call_count,
            sequence_number,
        }
    }
}

impl CollectionMapper for InteractionMapper {
    type Entry = InteractionEntry;

    fn schema(&self) -> &'static Schema {
        &TherapistInteraction::SCHEMA
    }

    fn map(&self, rows: &[RawRow]) -> SyncResult<GroupedCollection<InteractionEntry>> {
        let records = TherapistInteraction::from_rows(rows)?;
        Ok(group_sequenced::<Self, _>(records))
    }
}

/// Therapists grouped by the organization they joined.
#[derive(Debug, Clone, Copy, Default)]
pub struct MembershipMapper;

impl MembershipMapper {
    /// Distinct organizations referenced by `rows`, in first-seen order.
    pub fn organizations(&self, rows: &[RawRow]) -> SyncResult<Vec<OrganizationEntry>> {
        let records = TherapistMembership::from_rows(rows)?;
        Ok(distinct_by(records, |record| OrganizationEntry {
            organization_id: record.organization_id,
        }))
    }
}

impl CollectionMapper for MembershipMapper {
    type Entry = MembershipEntry;

    fn schema(&self) -> &'static Schema {
        &TherapistMembership::SCHEMA
    }

    fn map(&self, rows: &[RawRow]) -> SyncResult<GroupedCollection<MembershipEntry>> {
        let records = TherapistMembership::from_rows(rows)?;
        Ok(group_by_key(
            records,
            |record| GroupKey::from(record.organization_id),
            |record| MembershipEntry {
                date_joined: record.date_joined,
                therapist_id: record.therapist_id,
            },
        ))
    }
}
