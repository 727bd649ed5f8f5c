use async_trait::async_trait;
use chrono::NaiveDate;
use std::num::NonZeroUsize;

use metasync::config::{ExecutionConfig, LoggingConfig};
use metasync::models::{RawExtract, Record, TherapistInteraction, TherapistMembership};
use metasync::sources::{ExtractFetcher, ExtractSource, StaticExtract};
use metasync::{FailureStrategy, PeriodKind, SyncError, SyncResult, WindowPlan};

/// Interactions from the grouping walkthrough: t3 has two same-day rows.
pub const INTERACTIONS_CSV: &str = "\
therapist_id,interaction_date,therapist_chat_count,call_count
t1,2021-01-28,1,1
t1,2021-02-03,1,2
t2,2021-03-14,0,1
t3,2021-04-05,1,1
t3,2021-04-05,2,1
";

/// Memberships spread over three consecutive weeks of November 2022.
pub const MEMBERSHIPS_CSV: &str = "\
date_joined,therapist_id,organization_id
2022-11-07,t1,10
2022-11-09,t2,20
2022-11-15,t3,10
2022-11-16,t4,30
2022-11-24,t5,20
";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn interactions_source(csv: &str) -> ExtractSource<StaticExtract> {
    let fetcher = StaticExtract::from_csv(TherapistInteraction::SCHEMA.stream, csv.as_bytes())
        .expect("fixture csv parses");
    ExtractSource::new(&TherapistInteraction::SCHEMA, fetcher)
}

pub fn memberships_source(csv: &str) -> ExtractSource<StaticExtract> {
    let fetcher = StaticExtract::from_csv(TherapistMembership::SCHEMA.stream, csv.as_bytes())
        .expect("fixture csv parses");
    ExtractSource::new(&TherapistMembership::SCHEMA, fetcher)
}

pub fn execution(failure_strategy: FailureStrategy, max_concurrent_windows: usize) -> ExecutionConfig {
    ExecutionConfig {
        failure_strategy,
        max_concurrent_windows: NonZeroUsize::new(max_concurrent_windows)
            .expect("positive concurrency"),
    }
}

pub fn sequential() -> ExecutionConfig {
    execution(FailureStrategy::ContinueOnFailure, 1)
}

pub fn weekly(field: &str) -> WindowPlan {
    WindowPlan::ByPeriod {
        field: field.to_string(),
        kind: PeriodKind::Weekly,
    }
}

pub fn monthly(field: &str) -> WindowPlan {
    WindowPlan::ByPeriod {
        field: field.to_string(),
        kind: PeriodKind::Monthly,
    }
}

pub fn batches_of(size: usize) -> WindowPlan {
    WindowPlan::ByBatch {
        batch_size: NonZeroUsize::new(size).expect("positive batch size"),
    }
}

pub fn test_logging() -> LoggingConfig {
    LoggingConfig {
        level: "debug".to_string(),
        json: false,
    }
}

/// Fetcher standing in for an unreachable reporting service.
pub struct UnreachableFetcher;

#[async_trait]
impl ExtractFetcher for UnreachableFetcher {
    async fn fetch(&self, stream: &'static str) -> SyncResult<RawExtract> {
        Err(SyncError::source(stream, "connection refused"))
    }
}
