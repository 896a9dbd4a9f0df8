//! Redis-backed cache store
//!
//! Builds a [`fred`] client per operation: connect, run one command,
//! quit. No reconnect policy is configured; the retry discipline lives
//! in [`crate::cache::CacheClient`], not in the store client.

use crate::cache::store::{CacheConnection, CacheStore, FieldWrite};
use crate::error::{BundleError, BundleResult};
use async_trait::async_trait;
use bytes::Bytes;
use fred::clients::Client;
use fred::error::{Error, ErrorKind};
use fred::interfaces::{ClientLike, HashesInterface};
use fred::types::config::{Config, ServerConfig};
use fred::types::{Builder, Value};
use std::collections::HashMap;

/// Store backend speaking RESP to the namespace-local cache service
#[derive(Debug, Clone)]
pub struct RedisStore {
    port: u16,
}

impl RedisStore {
    pub fn new(port: u16) -> Self {
        Self { port }
    }
}

impl Default for RedisStore {
    fn default() -> Self {
        Self { port: 6379 }
    }
}

/// Map a fred error to the crate taxonomy.
///
/// IO, timeout, and cancellation failures are connection-class and
/// therefore transient; everything else is a store command failure.
fn classify(host: &str, err: Error) -> BundleError {
    match err.kind() {
        ErrorKind::IO | ErrorKind::Timeout | ErrorKind::Canceled => BundleError::CacheConnection {
            host: host.to_string(),
            reason: err.to_string(),
        },
        _ => BundleError::CacheStore {
            reason: err.to_string(),
        },
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn connect(&self, host: &str) -> BundleResult<Box<dyn CacheConnection>> {
        let config = Config {
            server: ServerConfig::new_centralized(host, self.port),
            ..Config::default()
        };
        let client = Builder::from_config(config)
            .build()
            .map_err(|err| classify(host, err))?;
        // Failure to establish the connection is the transient error
        // class; the caller's retry loop owns the pacing.
        let _ = client
            .init()
            .await
            .map_err(|err| BundleError::CacheConnection {
                host: host.to_string(),
                reason: err.to_string(),
            })?;
        Ok(Box::new(RedisConnection {
            host: host.to_string(),
            client,
        }))
    }
}

struct RedisConnection {
    host: String,
    client: Client,
}

#[async_trait]
impl CacheConnection for RedisConnection {
    async fn exists(&mut self, collection: &str, field: &str) -> BundleResult<bool> {
        self.client
            .hexists(collection, field)
            .await
            .map_err(|err| classify(&self.host, err))
    }

    async fn read(&mut self, collection: &str, field: &str) -> BundleResult<Option<Vec<u8>>> {
        let value: Value = self
            .client
            .hget(collection, field)
            .await
            .map_err(|err| classify(&self.host, err))?;
        match value {
            Value::Null => Ok(None),
            Value::Bytes(bytes) => Ok(Some(bytes.to_vec())),
            Value::String(text) => Ok(Some(text.into_inner().to_vec())),
            other => Err(BundleError::CacheStore {
                reason: format!("unexpected value type for {collection}/{field}: {other:?}"),
            }),
        }
    }

    async fn write(
        &mut self,
        collection: &str,
        field: &str,
        value: &[u8],
    ) -> BundleResult<FieldWrite> {
        let mut fields: HashMap<String, Value> = HashMap::new();
        fields.insert(field.to_string(), Value::Bytes(Bytes::copy_from_slice(value)));
        let created: i64 = self
            .client
            .hset(collection, fields)
            .await
            .map_err(|err| classify(&self.host, err))?;
        Ok(if created == 0 {
            FieldWrite::Updated
        } else {
            FieldWrite::Created
        })
    }

    async fn close(self: Box<Self>) {
        let _ = self.client.quit().await;
    }
}
