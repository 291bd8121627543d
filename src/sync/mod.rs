//! Bridges a submitted form to a [`RecordStore`].

use std::{marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{
    domain::{common::Resource, Identifiable},
    errors::{CommunityError, Result},
    forms::{FormRecord, Notice, RecordMapping, SubmitHandler},
    storage::RecordStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncMode {
    Create,
    Update { id: String },
}

/// Serializes forms through `M` and writes them to a store.
pub struct RecordSync<M: RecordMapping> {
    store: Arc<dyn RecordStore<M::Remote>>,
    mode: SyncMode,
    _mapping: PhantomData<fn() -> M>,
}

/// Form prefilled from a stored record, ready for an edit wizard.
#[derive(Debug, Clone)]
pub struct EditSession {
    /// Identifier all later writes address.
    pub id: String,
    pub record: FormRecord,
}

impl<M: RecordMapping> RecordSync<M> {
    pub fn new(store: Arc<dyn RecordStore<M::Remote>>, mode: SyncMode) -> Self {
        Self {
            store,
            mode,
            _mapping: PhantomData,
        }
    }

    pub fn for_create(store: Arc<dyn RecordStore<M::Remote>>) -> Self {
        Self::new(store, SyncMode::Create)
    }

    pub fn for_update(store: Arc<dyn RecordStore<M::Remote>>, id: impl Into<String>) -> Self {
        Self::new(store, SyncMode::Update { id: id.into() })
    }

    pub fn mode(&self) -> &SyncMode {
        &self.mode
    }

    pub async fn create(&self, record: &FormRecord) -> Result<M::Remote> {
        let remote = M::to_remote(record, None)?;
        let saved = self.store.create(&remote).await?;
        match saved.id() {
            Some(id) => info!(resource = M::Remote::NAMES.label, %id, "record created"),
            None => warn!(resource = M::Remote::NAMES.label, "created record came back without an id"),
        }
        Ok(saved)
    }

    /// Writes `record` over `id`. The returned record always carries a
    /// working id: its own `id`, else its `recordId`, else `id`.
    pub async fn update(&self, id: &str, record: &FormRecord) -> Result<M::Remote> {
        let remote = M::to_remote(record, Some(id))?;
        let mut saved = self.store.update(id, &remote).await?;
        let resolved = saved.resolve_id(id);
        saved.assign_id(resolved);
        info!(resource = M::Remote::NAMES.label, %id, "record updated");
        Ok(saved)
    }

    /// Fetches `id` and maps it into a form. The working id follows the same
    /// fallback as [`RecordSync::update`].
    pub async fn load(&self, id: &str) -> Result<EditSession> {
        let remote = self.store.get(id).await?;
        let record = M::from_remote(&remote)?;
        Ok(EditSession {
            id: remote.resolve_id(id),
            record,
        })
    }
}

/// Notice for a failed edit-mode load.
pub fn load_failure_notice(error: &CommunityError) -> Notice {
    warn!(error = %error, "could not load record for editing");
    Notice::error("Error", "Failed to load member details. Please try again.")
}

#[async_trait]
impl<M: RecordMapping> SubmitHandler for RecordSync<M> {
    type Output = M::Remote;

    async fn submit(&self, record: &FormRecord) -> Result<M::Remote> {
        match &self.mode {
            SyncMode::Create => self.create(record).await,
            SyncMode::Update { id } => self.update(id, record).await,
        }
    }

    fn success_notice(&self, record: &FormRecord) -> Notice {
        match self.mode {
            SyncMode::Create => M::created_notice(record),
            SyncMode::Update { .. } => M::updated_notice(record),
        }
    }

    fn failure_notice(&self, error: &CommunityError) -> Notice {
        Notice::from_error(error, M::failure_fallback())
    }

    fn destination(&self) -> &'static str {
        M::LISTING_ROUTE
    }
}
