//! Typed records for each extract stream and the entries delivered to the target.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::extract::RawRow;
use super::schema::{Column, ColumnType, Schema};
use crate::constants::{columns, streams};
use crate::error::SyncResult;

/// A statically declared extract record.
pub trait Record: Sized {
    const SCHEMA: Schema;

    /// Coerce a validated raw row into the typed record.
    fn from_row(row: &RawRow) -> SyncResult<Self>;

    /// Coerce every row, failing on the first malformed one.
    fn from_rows(rows: &[RawRow]) -> SyncResult<Vec<Self>> {
        rows.iter().map(Self::from_row).collect()
    }
}

const INTERACTION_COLUMNS: &[Column] = &[
    Column::new(columns::THERAPIST_ID, ColumnType::Text),
    Column::new(columns::INTERACTION_DATE, ColumnType::Date),
    Column::new(columns::THERAPIST_CHAT_COUNT, ColumnType::Integer),
    Column::new(columns::CALL_COUNT, ColumnType::Integer),
];

const MEMBERSHIP_COLUMNS: &[Column] = &[
    Column::new(columns::DATE_JOINED, ColumnType::Date),
    Column::new(columns::THERAPIST_ID, ColumnType::Text),
    Column::new(columns::ORGANIZATION_ID, ColumnType::Integer),
];

/// Daily chat and call counts of one therapist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TherapistInteraction {
    pub therapist_id: String,
    pub interaction_date: NaiveDate,
    pub chat_count: i64,
    pub call_count: i64,
}

impl Record for TherapistInteraction {
    const SCHEMA: Schema = Schema::new(streams::THERAPIST_INTERACTIONS, INTERACTION_COLUMNS);

    fn from_row(row: &RawRow) -> SyncResult<Self> {
        Ok(Self {
            therapist_id: row.text(columns::THERAPIST_ID)?,
            interaction_date: row.date(columns::INTERACTION_DATE)?,
            chat_count: row.integer(columns::THERAPIST_CHAT_COUNT)?,
            call_count: row.integer(columns::CALL_COUNT)?,
        })
    }
}

/// A therapist joining an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TherapistMembership {
    pub therapist_id: String,
    pub organization_id: i64,
    pub date_joined: NaiveDate,
}

impl Record for TherapistMembership {
    const SCHEMA: Schema = Schema::new(streams::THERAPIST_ORGANIZATIONS, MEMBERSHIP_COLUMNS);

    fn from_row(row: &RawRow) -> SyncResult<Self> {
        Ok(Self {
            date_joined: row.date(columns::DATE_JOINED)?,
            therapist_id: row.text(columns::THERAPIST_ID)?,
            organization_id: row.integer(columns::ORGANIZATION_ID)?,
        })
    }
}

/// Interaction entry delivered under its therapist.
///
/// `sequence_number` distinguishes several interactions of one therapist on
/// one date; it is published as `interaction_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEntry {
    pub interaction_date: NaiveDate,
    pub chat_count: i64,
    pub call_count: i64,
    #[serde(rename = "interaction_id")]
    pub sequence_number: u32,
}

/// Membership entry delivered under its organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipEntry {
    pub date_joined: NaiveDate,
    pub therapist_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationEntry {
    pub organization_id: i64,
}
