use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use metasync::{Ack, GroupKey, SyncError, SyncResult, Target};

/// One upsert as the target saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery<E> {
    pub key: GroupKey,
    pub entries: Vec<E>,
}

/// Target that records every upsert in arrival order.
#[derive(Debug)]
pub struct RecordingTarget<E> {
    deliveries: Arc<Mutex<Vec<Delivery<E>>>>,
}

impl<E> Clone for RecordingTarget<E> {
    fn clone(&self) -> Self {
        Self {
            deliveries: Arc::clone(&self.deliveries),
        }
    }
}

impl<E> Default for RecordingTarget<E> {
    fn default() -> Self {
        Self {
            deliveries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<E: Clone> RecordingTarget<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deliveries(&self) -> Vec<Delivery<E>> {
        self.deliveries.lock().clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.deliveries
            .lock()
            .iter()
            .map(|d| d.key.as_str().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.deliveries.lock().len()
    }

    fn record(&self, key: &GroupKey, entries: &[E]) {
        self.deliveries.lock().push(Delivery {
            key: key.clone(),
            entries: entries.to_vec(),
        });
    }
}

#[async_trait]
impl<E> Target<E> for RecordingTarget<E>
where
    E: Serialize + Clone + Send + Sync,
{
    async fn upsert(&self, key: &GroupKey, entries: &[E]) -> SyncResult<Ack> {
        self.record(key, entries);
        Ok(Ack::with_response(serde_json::json!({ "upserted": entries.len() })))
    }
}

/// How a [`FailingTarget`] refuses a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// Return a delivery error
    Error,
    /// Return an acknowledgement with `accepted: false`
    Reject,
}

/// Target that refuses chosen keys and records everything else.
#[derive(Debug)]
pub struct FailingTarget<E> {
    pub inner: RecordingTarget<E>,
    refused: HashSet<String>,
    refusal: Refusal,
}

impl<E: Clone> FailingTarget<E> {
    pub fn refusing(keys: &[&str], refusal: Refusal) -> Self {
        Self {
            inner: RecordingTarget::new(),
            refused: keys.iter().map(|k| k.to_string()).collect(),
            refusal,
        }
    }
}

#[async_trait]
impl<E> Target<E> for FailingTarget<E>
where
    E: Serialize + Clone + Send + Sync,
{
    async fn upsert(&self, key: &GroupKey, entries: &[E]) -> SyncResult<Ack> {
        if self.refused.contains(key.as_str()) {
            return match self.refusal {
                Refusal::Error => Err(SyncError::delivery(key, "503 Service Unavailable")),
                Refusal::Reject => Ok(Ack::rejected(Some(
                    serde_json::json!({ "error": "duplicate external id" }),
                ))),
            };
        }
        self.inner.record(key, entries);
        Ok(Ack::accepted())
    }
}
