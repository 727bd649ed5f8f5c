//! # Sync Orchestrator
//!
//! Drives one pass over one stream:
//!
//! 1. `collect` the extract (any failure is fatal and nothing is delivered)
//! 2. plan windows, either calendar periods from the date bounds or index
//!    windows from the extract size
//! 3. for every window: slice, group, then upsert each group in order
//!
//! Windows are independent, so up to `max_concurrent_windows` of them are in
//! flight at once. Outcomes are still reported in ascending window order.
//! Grouping of a window completes before any of its groups is delivered.

use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::traits::{Source, Target};
use super::types::{FailureStrategy, SyncReport, Window, WindowOutcome, WindowPlan};
use crate::batching::chunks;
use crate::config::ExecutionConfig;
use crate::error::{SyncError, SyncResult};
use crate::grouping::CollectionMapper;
use crate::logging::{log_error, log_window_operation};
use crate::partition::partition;
use crate::state_machine::{
    SyncEvent, SyncStateMachine, WindowEvent, WindowState, WindowStateMachine,
};
use crate::utils::format_duration;

pub struct SyncOrchestrator<S, T, M> {
    source: S,
    target: T,
    mapper: M,
    plan: WindowPlan,
    execution: ExecutionConfig,
}

impl<S, T, M> SyncOrchestrator<S, T, M>
where
    S: Source,
    M: CollectionMapper,
    T: Target<M::Entry>,
{
    pub fn new(source: S, target: T, mapper: M, plan: WindowPlan, execution: ExecutionConfig) -> Self {
        Self {
            source,
            target,
            mapper,
            plan,
            execution,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Run one complete pass.
    ///
    /// Collection and planning failures are returned as errors. Window
    /// failures are recorded in the report; under `FailFast` they also leave
    /// the pass in [`SyncState::Failed`](crate::state_machine::SyncState::Failed).
    pub async fn run(&mut self) -> SyncResult<SyncReport> {
        let run_id = Uuid::new_v4();
        let stream = self.source.stream();
        let started_at = Utc::now();
        let timer = Instant::now();
        let mut machine = SyncStateMachine::new();

        info!(run_id = %run_id, stream = stream, plan = ?self.plan, "🚀 Starting sync pass");

        machine.transition(SyncEvent::Collect)?;
        if let Err(error) = self.source.collect().await {
            return Err(Self::abort(&mut machine, run_id, stream, "collect", error));
        }

        let windows = match self.plan_windows(&mut machine).await {
            Ok(windows) => windows,
            Err(error) => return Err(Self::abort(&mut machine, run_id, stream, "plan", error)),
        };

        info!(
            run_id = %run_id,
            stream = stream,
            window_count = windows.len(),
            "Planned delivery windows"
        );

        machine.transition(SyncEvent::Process)?;
        let outcomes = self.process_windows(windows).await;

        let failed = outcomes
            .iter()
            .filter(|o| o.state == WindowState::Failed)
            .count();
        let state = if failed > 0 && self.execution.failure_strategy == FailureStrategy::FailFast {
            machine.transition(SyncEvent::fail_with_error(format!(
                "{failed} window(s) failed"
            )))?
        } else {
            machine.transition(SyncEvent::Complete)?
        };

        let report = SyncReport {
            run_id,
            stream: stream.to_string(),
            state,
            windows: outcomes,
            started_at,
            finished_at: Utc::now(),
        };

        info!(
            run_id = %run_id,
            stream = stream,
            state = %report.state,
            delivered = report.succeeded().count(),
            failed = failed,
            skipped = report.skipped().count(),
            records = report.records_delivered(),
            elapsed = %format_duration(timer.elapsed()),
            "✅ Sync pass finished"
        );

        Ok(report)
    }

    async fn plan_windows(&self, machine: &mut SyncStateMachine) -> SyncResult<Vec<Window>> {
        match &self.plan {
            WindowPlan::ByPeriod { field, kind } => {
                machine.transition(SyncEvent::Partition)?;
                let Some((start, end)) = self.source.bounds(field).await? else {
                    debug!(stream = self.source.stream(), field = %field, "No rows to partition");
                    return Ok(Vec::new());
                };
                let periods = partition(start, end, *kind)?;
                debug!(
                    stream = self.source.stream(),
                    field = %field,
                    kind = %kind,
                    start = %start,
                    end = %end,
                    periods = periods.len(),
                    "Partitioned date range"
                );
                Ok(periods
                    .into_iter()
                    .map(|period| Window::Period {
                        field: field.clone(),
                        period,
                    })
                    .collect())
            }
            WindowPlan::ByBatch { batch_size } => {
                machine.transition(SyncEvent::Chunk)?;
                let total = self.source.size().await?;
                Ok(chunks(total, *batch_size)
                    .into_iter()
                    .map(Window::Batch)
                    .collect())
            }
        }
    }

    async fn process_windows(&self, windows: Vec<Window>) -> Vec<WindowOutcome> {
        let halted = AtomicBool::new(false);
        let halted = &halted;

        stream::iter(windows.into_iter().enumerate())
            .map(|(index, window)| self.run_window(index, window, halted))
            .buffered(self.execution.max_concurrent_windows.get())
            .collect()
            .await
    }

    async fn run_window(&self, index: usize, window: Window, halted: &AtomicBool) -> WindowOutcome {
        let stream = self.source.stream();
        let mut machine = WindowStateMachine::new(index);
        let mut outcome = WindowOutcome::new(index, window);

        if halted.load(Ordering::Acquire) {
            if let Err(error) = machine.transition(WindowEvent::Skip) {
                warn!(window = index, error = %error, "Could not mark window skipped");
            }
            outcome.state = machine.current_state();
            log_window_operation("skip", stream, index, &outcome.window, "skipped", None);
            return outcome;
        }

        if let Err(error) = self.deliver_window(&mut machine, &mut outcome).await {
            if let Err(transition_error) = machine.transition(WindowEvent::fail_with_error(&error)) {
                warn!(window = index, error = %transition_error, "Could not mark window failed");
            }
            if self.execution.failure_strategy == FailureStrategy::FailFast {
                halted.store(true, Ordering::Release);
            }
            log_error(
                "sync_orchestrator",
                "deliver_window",
                &error.to_string(),
                Some(&format!("stream={stream} window={}", outcome.window)),
            );
            outcome.error = Some(error.to_string());
        }

        outcome.state = machine.current_state();
        outcome
    }

    async fn deliver_window(
        &self,
        machine: &mut WindowStateMachine,
        outcome: &mut WindowOutcome,
    ) -> SyncResult<()> {
        let stream = self.source.stream();

        machine.transition(WindowEvent::Slice)?;
        let rows = self.source.slice(&outcome.window).await?;
        outcome.rows = rows.len();

        machine.transition(WindowEvent::Group)?;
        let collection = self.mapper.map(&rows)?;

        machine.transition(WindowEvent::Deliver)?;
        for (key, entries) in collection.iter() {
            let delivered = match self.target.upsert(key, entries).await {
                Ok(ack) if ack.accepted => Ok(()),
                Ok(ack) => Err(SyncError::delivery(
                    key,
                    ack.response
                        .map(|response| format!("target rejected upsert: {response}"))
                        .unwrap_or_else(|| "target rejected upsert".to_string()),
                )),
                Err(error) => Err(error),
            };

            if let Err(error) = delivered {
                outcome.failed_key = Some(key.clone());
                return Err(error);
            }

            outcome.groups_delivered += 1;
            outcome.records_delivered += entries.len();
        }

        machine.transition(WindowEvent::Complete)?;
        log_window_operation(
            "deliver",
            stream,
            outcome.index,
            &outcome.window,
            "delivered",
            Some(&format!(
                "rows={} groups={} records={}",
                outcome.rows, outcome.groups_delivered, outcome.records_delivered
            )),
        );
        Ok(())
    }

    fn abort(
        machine: &mut SyncStateMachine,
        run_id: Uuid,
        stream: &str,
        operation: &str,
        error: SyncError,
    ) -> SyncError {
        if let Err(transition_error) = machine.transition(SyncEvent::fail_with_error(&error)) {
            warn!(run_id = %run_id, error = %transition_error, "Could not mark pass failed");
        }
        log_error(
            "sync_orchestrator",
            operation,
            &error.to_string(),
            Some(&format!("run_id={run_id} stream={stream}")),
        );
        error
    }
}
