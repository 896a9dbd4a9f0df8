//! Cache client configuration
//!
//! The host controller owns configuration loading; this crate only
//! exposes the section it consumes, with defaults matching the
//! production deployment.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Service name prefixed to the namespace to form the cache hostname
    pub service: String,

    /// Cache store port
    pub port: u16,

    /// Connection attempts per cache operation
    pub attempts: u32,

    /// Pause between connection attempts, in milliseconds
    pub pause_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            service: "bundle-api".to_string(),
            port: 6379,
            attempts: 30,
            pause_ms: 1_000,
        }
    }
}

impl CacheConfig {
    /// Pause between connection attempts
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    /// Cache hostname for a namespace
    pub fn host(&self, namespace: &str) -> String {
        format!("{}.{}", self.service, namespace)
    }
}
