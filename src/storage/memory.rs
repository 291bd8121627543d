use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{RecordStore, StoredRecord};
use crate::{
    domain::{Page, PageRequest, Seeded},
    errors::{CommunityError, Result},
};

/// Process-local store with an optional fixed delay on every call.
pub struct InMemoryStore<R> {
    records: RwLock<Vec<R>>,
    next_id: AtomicU64,
    latency: Duration,
}

impl<R: StoredRecord> InMemoryStore<R> {
    pub fn new(records: Vec<R>, latency: Duration) -> Self {
        let highest = records
            .iter()
            .filter_map(|record| record.id().and_then(|id| id.parse::<u64>().ok()))
            .max()
            .unwrap_or(0);
        Self {
            records: RwLock::new(records),
            next_id: AtomicU64::new(highest + 1),
            latency,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Duration::ZERO)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl<R: StoredRecord + Seeded> InMemoryStore<R> {
    pub fn seeded(latency: Duration) -> Self {
        Self::new(R::seed(), latency)
    }
}

fn position<R: StoredRecord>(records: &[R], id: &str) -> Option<usize> {
    records.iter().position(|record| record.id() == Some(id))
}

#[async_trait]
impl<R: StoredRecord> RecordStore<R> for InMemoryStore<R> {
    async fn list(&self, request: PageRequest) -> Result<Page<R>> {
        self.simulate_latency().await;
        let records = self.records.read().await;
        Ok(Page::slice(&records, request))
    }

    async fn get(&self, id: &str) -> Result<R> {
        self.simulate_latency().await;
        let records = self.records.read().await;
        position(&records, id)
            .map(|idx| records[idx].clone())
            .ok_or_else(|| CommunityError::NotFound(format!("{} {id}", R::NAMES.label)))
    }

    async fn create(&self, record: &R) -> Result<R> {
        self.simulate_latency().await;
        let mut stored = record.clone();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        stored.assign_id(id.clone());
        self.records.write().await.push(stored.clone());
        debug!(resource = R::NAMES.label, %id, "record created in memory");
        Ok(stored)
    }

    async fn update(&self, id: &str, record: &R) -> Result<R> {
        self.simulate_latency().await;
        let mut records = self.records.write().await;
        let idx = position(&records, id)
            .ok_or_else(|| CommunityError::NotFound(format!("{} {id}", R::NAMES.label)))?;
        let mut stored = record.clone();
        stored.assign_id(id.to_string());
        records[idx] = stored.clone();
        debug!(resource = R::NAMES.label, %id, "record updated in memory");
        Ok(stored)
    }

    fn describe(&self) -> String {
        "in-memory sample data".to_string()
    }
}
