//! Shared bundle cache
//!
//! Thin retry wrapper around the hash-field store that every namespace
//! exposes under a fixed hostname. Bundles live under the `apps`
//! collection keyed by name; the store is both a read-through cache and
//! a resolution source in its own right when a spec declares no source.

pub mod redis;
pub mod store;

pub use store::{CacheConnection, CacheStore, FieldWrite};

use crate::config::CacheConfig;
use crate::error::{BundleError, BundleResult};
use crate::retry;
use std::sync::Arc;
use tracing::info;

/// Collection holding bundle payloads
const APPS_COLLECTION: &str = "apps";

/// Retry-wrapped client for the shared bundle cache
pub struct CacheClient {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
}

impl CacheClient {
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Read the bytes cached for `name`, if any.
    ///
    /// The field must exist before it is read; a live connection that
    /// reports the field absent ends the operation without a value,
    /// since the condition is not transient.
    pub async fn get(&self, name: &str, namespace: &str) -> Option<Vec<u8>> {
        let host = self.config.host(namespace);
        let host = host.as_str();
        retry::bounded(self.config.attempts, self.config.pause(), move || async move {
            let mut connection = self.store.connect(host).await?;
            let outcome = read_present(connection.as_mut(), name).await;
            connection.close().await;
            outcome
        })
        .await
    }

    /// Whether the cache holds an entry for `name`
    pub async fn exists(&self, name: &str, namespace: &str) -> bool {
        let host = self.config.host(namespace);
        let host = host.as_str();
        retry::bounded(self.config.attempts, self.config.pause(), move || async move {
            let mut connection = self.store.connect(host).await?;
            let outcome = connection.exists(APPS_COLLECTION, name).await;
            connection.close().await;
            outcome
        })
        .await
        .unwrap_or(false)
    }

    /// Write the bytes for `name`, best-effort.
    ///
    /// Failures are logged by the retry loop and otherwise swallowed;
    /// the insert-vs-update distinction is observational only.
    pub async fn put(&self, name: &str, content: &[u8], namespace: &str) {
        let host = self.config.host(namespace);
        let host = host.as_str();
        let written = retry::bounded(self.config.attempts, self.config.pause(), move || async move {
            let mut connection = self.store.connect(host).await?;
            let outcome = connection.write(APPS_COLLECTION, name, content).await;
            connection.close().await;
            outcome
        })
        .await;
        match written {
            Some(FieldWrite::Created) => info!("bundle {name} has been stored in the cache"),
            Some(FieldWrite::Updated) => info!("bundle {name} has been updated in the cache"),
            None => {}
        }
    }
}

async fn read_present(connection: &mut dyn CacheConnection, name: &str) -> BundleResult<Vec<u8>> {
    if !connection.exists(APPS_COLLECTION, name).await? {
        return Err(BundleError::CacheMiss {
            name: name.to_string(),
        });
    }
    // A field that vanishes between the existence check and the read is
    // treated the same as one that never existed. A zero-length value,
    // on the other hand, is a valid (if unusual) bundle.
    match connection.read(APPS_COLLECTION, name).await? {
        Some(content) => Ok(content),
        None => Err(BundleError::CacheMiss {
            name: name.to_string(),
        }),
    }
}
