//! Bundle resolution and caching for a Kubernetes job controller
//!
//! Resolves a named deployable artifact from exactly one of several
//! mutually exclusive sources (the shared cache, a local file, GitHub
//! raw content, or a generic HTTPS endpoint) and caches the result
//! according to the spec's pull policy.

pub mod bundle;
pub mod cache;
pub mod cluster;
pub mod config;
pub mod error;
pub mod fetch;
pub mod resolver;
mod retry;
pub mod spec;
pub mod trust;

pub use bundle::Bundle;
pub use config::CacheConfig;
pub use error::{BundleError, BundleResult};
pub use resolver::{BundleLoader, BundleResolver};
pub use spec::{BundleSpec, PullPolicy};
