//! Error types for the bundle loader
//!
//! All modules use `BundleResult<T>` as their return type. Failures are
//! logged where they occur and collapse to an absent value at the
//! `BundleLoader` boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bundle loader operations
pub type BundleResult<T> = Result<T, BundleError>;

/// All errors that can occur while resolving a bundle
#[derive(Error, Debug)]
pub enum BundleError {
    // Configuration errors
    #[error("bundle {name}: source options are mutually exclusive")]
    SourceConflict { name: String },

    // Cache store errors
    #[error("cache store {host} unreachable: {reason}")]
    CacheConnection { host: String, reason: String },

    #[error("cache store command failed: {reason}")]
    CacheStore { reason: String },

    #[error("bundle {name} not present in the cache store")]
    CacheMiss { name: String },

    // Cluster API errors
    #[error("cluster API request failed: {reason}")]
    Cluster { reason: String },

    #[error("cannot find secret {name} in namespace {namespace}")]
    SecretNotFound { name: String, namespace: String },

    #[error("secret {name} has no `{key}` entry")]
    SecretKeyMissing { name: String, key: &'static str },

    #[error("secret {name} `{key}` entry is not valid UTF-8")]
    SecretKeyInvalid { name: String, key: &'static str },

    #[error("certification authority reference has no {field}")]
    AuthorityIncomplete { field: &'static str },

    #[error("cannot find config map {name} in namespace {namespace}")]
    ConfigMapNotFound { name: String, namespace: String },

    #[error("config map {name} has no `{key}` entry")]
    ConfigMapKeyMissing { name: String, key: String },

    // Source fetch errors
    #[error("invalid bundle path: {0}")]
    PathNotFound(PathBuf),

    #[error("bundle path is not a regular file: {0}")]
    PathNotFile(PathBuf),

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid custom certificate authority `{alias}`: {reason}")]
    InvalidCertificate { alias: String, reason: String },

    #[error("failed to build the HTTPS client: {reason}")]
    HttpClient { reason: String },

    #[error("GET {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("GET {url} failed ({status})")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

impl BundleError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether the error is a connection-class failure worth retrying
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::CacheConnection { .. })
    }
}
