use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use metasync::PeriodKind;

/// Dates between 1999 and 2040, covering several leap years.
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..15_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1999, 1, 1).expect("valid epoch") + Duration::days(offset)
    })
}

/// An ordered `(start, end)` pair at most roughly three years apart.
pub fn date_range_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 0i64..1_100).prop_map(|(start, span)| (start, start + Duration::days(span)))
}

pub fn period_kind_strategy() -> impl Strategy<Value = PeriodKind> {
    prop_oneof![Just(PeriodKind::Weekly), Just(PeriodKind::Monthly)]
}

/// Interaction rows `(therapist, day offset, chats, calls)` over a small id
/// and date space so same-day collisions are common.
pub fn interaction_rows_strategy() -> impl Strategy<Value = Vec<(String, i64, i64, i64)>> {
    prop::collection::vec(
        ("t[1-4]", 0i64..10, 0i64..20, 0i64..20),
        0..60,
    )
}

pub fn interactions_csv(rows: &[(String, i64, i64, i64)]) -> String {
    let base = NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid base date");
    let mut csv = String::from("therapist_id,interaction_date,therapist_chat_count,call_count\n");
    for (therapist, offset, chats, calls) in rows {
        let day = base + Duration::days(*offset);
        csv.push_str(&format!("{therapist},{day},{chats},{calls}\n"));
    }
    csv
}
