//! Cluster configuration API boundary
//!
//! Read-only, by-name, namespace-scoped lookups of secrets and config
//! maps. The production implementation in [`kubernetes`] talks to the
//! API server; tests substitute an in-memory reader.

pub mod kubernetes;

pub use kubernetes::KubeClusterReader;

use crate::error::BundleResult;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Decoded data of a secret.
///
/// Secret values are base64-encoded at rest; they cross this boundary
/// already decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretData {
    pub data: BTreeMap<String, Vec<u8>>,
}

/// Plain-text data of a config map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMapData {
    pub data: BTreeMap<String, String>,
}

/// Read-only access to cluster-held configuration objects
#[async_trait]
pub trait ClusterReader: Send + Sync {
    /// Look up a secret by name, `None` when it does not exist
    async fn secret(&self, name: &str, namespace: &str) -> BundleResult<Option<SecretData>>;

    /// Look up a config map by name, `None` when it does not exist
    async fn config_map(&self, name: &str, namespace: &str) -> BundleResult<Option<ConfigMapData>>;
}
