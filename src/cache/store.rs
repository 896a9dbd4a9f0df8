//! Cache store boundary
//!
//! The shared cache is a hash-field store addressed by a
//! namespace-derived hostname. These traits are the seam between the
//! retry-wrapped client and whichever store backend is wired in; the
//! production backend lives in [`crate::cache::redis`].

use crate::error::BundleResult;
use async_trait::async_trait;

/// Whether a write created the field or replaced an existing value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWrite {
    Created,
    Updated,
}

/// Factory for short-lived store connections
///
/// A connection is opened and closed around each discrete cache
/// operation; connect failures are the transient error class the
/// retry loop acts on.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Open a connection to the store at `host`
    async fn connect(&self, host: &str) -> BundleResult<Box<dyn CacheConnection>>;
}

/// One open connection to the hash-field store
#[async_trait]
pub trait CacheConnection: Send {
    /// Whether `field` exists under `collection`
    async fn exists(&mut self, collection: &str, field: &str) -> BundleResult<bool>;

    /// Read the binary value of `field`, or `None` when absent
    async fn read(&mut self, collection: &str, field: &str) -> BundleResult<Option<Vec<u8>>>;

    /// Write the binary value of `field`, reporting insert vs. update
    async fn write(&mut self, collection: &str, field: &str, value: &[u8])
        -> BundleResult<FieldWrite>;

    /// Close the connection
    async fn close(self: Box<Self>);
}
