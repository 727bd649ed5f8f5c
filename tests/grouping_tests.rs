//! Grouping of whole extracts through the stream mappers.

mod common;

use common::{date, INTERACTIONS_CSV, MEMBERSHIPS_CSV};
use metasync::grouping::{CollectionMapper, GroupKey, InteractionMapper, MembershipMapper};
use metasync::models::{RawExtract, RawRow, Record, TherapistInteraction, TherapistMembership};
use metasync::SyncError;
use serde_json::json;

fn interaction_rows(csv: &str) -> Vec<RawRow> {
    RawExtract::from_csv_reader("therapist_interactions", csv.as_bytes())
        .unwrap()
        .into_rows(&TherapistInteraction::SCHEMA)
        .unwrap()
}

fn membership_rows(csv: &str) -> Vec<RawRow> {
    RawExtract::from_csv_reader("therapist_organizations", csv.as_bytes())
        .unwrap()
        .into_rows(&TherapistMembership::SCHEMA)
        .unwrap()
}

#[test]
fn test_same_day_interactions_are_numbered() {
    let grouped = InteractionMapper.map(&interaction_rows(INTERACTIONS_CSV)).unwrap();

    let keys: Vec<&str> = grouped.keys().map(GroupKey::as_str).collect();
    assert_eq!(keys, vec!["t1", "t2", "t3"]);

    let numbers = |key: &str| -> Vec<u32> {
        grouped
            .get(&GroupKey::from(key))
            .unwrap()
            .iter()
            .map(|entry| entry.sequence_number)
            .collect()
    };
    assert_eq!(numbers("t1"), vec![1, 1]);
    assert_eq!(numbers("t2"), vec![1]);
    assert_eq!(numbers("t3"), vec![1, 2]);

    let t3 = grouped.get(&GroupKey::from("t3")).unwrap();
    assert_eq!(t3[0].chat_count, 1);
    assert_eq!(t3[1].chat_count, 2);
    assert!(t3.iter().all(|e| e.interaction_date == date(2021, 4, 5)));
}

#[test]
fn test_interaction_collection_wire_shape() {
    let grouped = InteractionMapper.map(&interaction_rows(INTERACTIONS_CSV)).unwrap();
    let value = serde_json::to_value(&grouped).unwrap();

    assert_eq!(
        value["t3"],
        json!([
            {"interaction_date": "2021-04-05", "chat_count": 1, "call_count": 1, "interaction_id": 1},
            {"interaction_date": "2021-04-05", "chat_count": 2, "call_count": 1, "interaction_id": 2},
        ])
    );
    assert!(value["t1"][0].get("therapist_id").is_none());
}

#[test]
fn test_grouping_is_deterministic() {
    let rows = interaction_rows(INTERACTIONS_CSV);
    let first = InteractionMapper.map(&rows).unwrap();
    let second = InteractionMapper.map(&rows).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_numbering_restarts_for_each_day() {
    let csv = "therapist_id,interaction_date,therapist_chat_count,call_count\n\
               t1,2021-01-28,1,0\n\
               t1,2021-01-29,1,0\n\
               t1,2021-01-28,2,0\n\
               t1,2021-01-29,2,0\n\
               t1,2021-01-28,3,0\n";
    let grouped = InteractionMapper.map(&interaction_rows(csv)).unwrap();

    let entries: Vec<(u32, i64)> = grouped
        .get(&GroupKey::from("t1"))
        .unwrap()
        .iter()
        .map(|e| (e.sequence_number, e.chat_count))
        .collect();
    // 28th bucket first (first seen), then the 29th
    assert_eq!(entries, vec![(1, 1), (2, 2), (3, 3), (1, 1), (2, 2)]);
}

#[test]
fn test_memberships_group_by_organization() {
    let rows = membership_rows(MEMBERSHIPS_CSV);
    let grouped = MembershipMapper.map(&rows).unwrap();

    let keys: Vec<&str> = grouped.keys().map(GroupKey::as_str).collect();
    assert_eq!(keys, vec!["10", "20", "30"]);
    assert_eq!(grouped.total_entries(), 5);

    let value = serde_json::to_value(&grouped).unwrap();
    assert_eq!(
        value["20"],
        json!([
            {"date_joined": "2022-11-09", "therapist_id": "t2"},
            {"date_joined": "2022-11-24", "therapist_id": "t5"},
        ])
    );

    let organizations = MembershipMapper.organizations(&rows).unwrap();
    assert_eq!(
        serde_json::to_value(&organizations).unwrap(),
        json!([{"organization_id": 10}, {"organization_id": 20}, {"organization_id": 30}])
    );
}

#[test]
fn test_one_bad_row_fails_the_whole_group_call() {
    let csv = "date_joined,therapist_id,organization_id\n\
               2022-11-07,t1,10\n\
               2022-11-09,t2,org-20\n";
    let err = MembershipMapper.map(&membership_rows(csv)).unwrap_err();
    match err {
        SyncError::TypeCoercion { field, value, line, .. } => {
            assert_eq!(field, "organization_id");
            assert_eq!(value, "org-20");
            assert_eq!(line, 2);
        }
        other => panic!("expected a coercion error, got {other:?}"),
    }
}
