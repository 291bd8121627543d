pub mod http;
pub mod memory;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::{Config, StorageKind},
    domain::{Identifiable, Page, PageRequest, Resource, Seeded},
    errors::Result,
};

pub use http::{extract_error_detail, HttpStore, NO_ERROR_DETAILS};
pub use memory::InMemoryStore;

/// Records a [`RecordStore`] can hold.
pub trait StoredRecord:
    Identifiable + Resource + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
}

impl<T> StoredRecord for T where
    T: Identifiable + Resource + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
}

/// Abstraction over the places records can be listed, read and written.
#[async_trait]
pub trait RecordStore<R: StoredRecord>: Send + Sync {
    async fn list(&self, request: PageRequest) -> Result<Page<R>>;

    async fn get(&self, id: &str) -> Result<R>;

    /// Persists a new record and returns it as stored.
    async fn create(&self, record: &R) -> Result<R>;

    /// Replaces the record addressed by `id` and returns it as stored.
    async fn update(&self, id: &str, record: &R) -> Result<R>;

    /// Short description for status output.
    fn describe(&self) -> String;
}

/// Store selected by `config.storage`.
pub fn open_store<R>(config: &Config) -> Result<Arc<dyn RecordStore<R>>>
where
    R: StoredRecord + Seeded,
{
    Ok(match config.storage {
        StorageKind::Memory => Arc::new(InMemoryStore::seeded(Duration::from_millis(
            config.mock_latency_ms,
        ))),
        StorageKind::Http => Arc::new(HttpStore::new(&config.api)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Event;

    #[test]
    fn opens_the_configured_store() {
        let mut config = Config::default();
        let store = open_store::<Event>(&config).unwrap();
        assert_eq!(store.describe(), "in-memory sample data");

        config.storage = StorageKind::Http;
        config.api.base_url = "http://localhost:9999".into();
        let store = open_store::<Event>(&config).unwrap();
        assert_eq!(store.describe(), "http://localhost:9999/api/v1/rehic/events");
    }

    #[test]
    fn http_store_rejects_invalid_base() {
        let mut config = Config::default();
        config.storage = StorageKind::Http;
        config.api.base_url = "mailto:someone@example.org".into();
        assert!(open_store::<Event>(&config).is_err());
    }
}
