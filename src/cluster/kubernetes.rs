//! Kubernetes-backed cluster reader

use crate::cluster::{ClusterReader, ConfigMapData, SecretData};
use crate::error::{BundleError, BundleResult};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use kube::Api;
use tracing::error;

/// Cluster reader backed by the Kubernetes API server
#[derive(Clone)]
pub struct KubeClusterReader {
    client: kube::Client,
}

impl KubeClusterReader {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterReader for KubeClusterReader {
    async fn secret(&self, name: &str, namespace: &str) -> BundleResult<Option<SecretData>> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let secret = api.get_opt(name).await.map_err(|err| {
            error!("failed to read secret {name} in namespace {namespace}: {err}");
            BundleError::Cluster {
                reason: err.to_string(),
            }
        })?;
        Ok(secret.map(|secret| SecretData {
            data: secret
                .data
                .unwrap_or_default()
                .into_iter()
                .map(|(key, value)| (key, value.0))
                .collect(),
        }))
    }

    async fn config_map(
        &self,
        name: &str,
        namespace: &str,
    ) -> BundleResult<Option<ConfigMapData>> {
        let api: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        let config_map = api.get_opt(name).await.map_err(|err| {
            error!("failed to read config map {name} in namespace {namespace}: {err}");
            BundleError::Cluster {
                reason: err.to_string(),
            }
        })?;
        Ok(config_map.map(|config_map| ConfigMapData {
            data: config_map.data.unwrap_or_default(),
        }))
    }
}
