//! Bundle resolution
//!
//! The resolver validates source exclusivity, applies the pull policy,
//! delegates to the matching fetcher, and writes fresh content back to
//! the cache. Failures never cross this boundary: callers observe only
//! resolved or not resolved, with diagnostic detail in the logs.

use crate::bundle::Bundle;
use crate::cache::redis::RedisStore;
use crate::cache::{CacheClient, CacheStore};
use crate::cluster::{ClusterReader, KubeClusterReader};
use crate::config::CacheConfig;
use crate::fetch;
use crate::spec::{BundleSpec, PullPolicy};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

/// Resolves a bundle specification to its bytes
#[async_trait]
pub trait BundleLoader: Send + Sync {
    /// Resolve `spec` within `namespace`, or nothing on any failure
    async fn load(&self, spec: &BundleSpec, namespace: &str) -> Option<Bundle>;
}

/// The production [`BundleLoader`]
pub struct BundleResolver {
    cluster: Arc<dyn ClusterReader>,
    cache: CacheClient,
}

impl BundleResolver {
    pub fn new(
        cluster: Arc<dyn ClusterReader>,
        store: Arc<dyn CacheStore>,
        config: CacheConfig,
    ) -> Self {
        Self {
            cluster,
            cache: CacheClient::new(store, config),
        }
    }

    /// Resolver wired for in-cluster use: Kubernetes-backed lookups and
    /// the Redis-backed cache store
    pub fn kubernetes(client: kube::Client, config: CacheConfig) -> Self {
        let store = RedisStore::new(config.port);
        Self::new(
            Arc::new(KubeClusterReader::new(client)),
            Arc::new(store),
            config,
        )
    }

    async fn cached(&self, spec: &BundleSpec, namespace: &str) -> Option<Bundle> {
        self.cache
            .get(&spec.name, namespace)
            .await
            .map(|content| Bundle::new(spec.name.clone(), content))
    }
}

#[async_trait]
impl BundleLoader for BundleResolver {
    async fn load(&self, spec: &BundleSpec, namespace: &str) -> Option<Bundle> {
        let source = match spec.source() {
            Ok(source) => source,
            Err(err) => {
                error!("{err}");
                return None;
            }
        };
        // No declared source: the cache is the source.
        let Some(source) = source else {
            return self.cached(spec, namespace).await;
        };
        if spec.pull_policy == PullPolicy::IfNotPresent
            && self.cache.exists(&spec.name, namespace).await
        {
            info!("bundle {} already present in the cache", spec.name);
            return self.cached(spec, namespace).await;
        }
        let content = fetch::source(&source, self.cluster.as_ref(), namespace)
            .await
            .ok()?;
        info!("bundle {} successfully loaded from {source}", spec.name);
        self.cache.put(&spec.name, &content, namespace).await;
        Some(Bundle::new(spec.name.clone(), content))
    }
}
