//! Bundle specification objects
//!
//! Deserializable fragments of the job resource declaring where a
//! bundle's bytes come from. A spec carries at most one populated
//! source descriptor; `source()` classifies it once so the resolver
//! dispatches on a tagged union instead of a chain of null checks.

use crate::error::{BundleError, BundleResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Whether a cached copy satisfies resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PullPolicy {
    /// Re-fetch from the declared source every time
    Always,
    /// Prefer cached content when present
    #[default]
    IfNotPresent,
}

/// Local filesystem source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSourceSpec {
    pub path: PathBuf,
}

/// GitHub raw-content source, optionally authenticated through a secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubSourceSpec {
    pub url: String,
    pub secret: Option<String>,
}

/// Generic HTTPS source, optionally validated against a custom CA
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpSourceSpec {
    pub url: String,
    pub certification_authority: Option<CertificationAuthoritySpec>,
}

/// Where a PEM blob is stored in the cluster's config-map store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationAuthoritySpec {
    pub config_map_name: Option<String>,
    pub sub_path: Option<String>,
}

/// Declarative description of a bundle and its origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleSpec {
    pub name: String,
    pub file: Option<FileSourceSpec>,
    pub github: Option<GithubSourceSpec>,
    pub http: Option<HttpSourceSpec>,
    #[serde(default)]
    pub pull_policy: PullPolicy,
}

/// The configured source kind, classified once per resolution
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    File(&'a FileSourceSpec),
    Github(&'a GithubSourceSpec),
    Http(&'a HttpSourceSpec),
}

impl fmt::Display for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(file) => write!(f, "{}", file.path.display()),
            Source::Github(github) => write!(f, "{}", github.url),
            Source::Http(http) => write!(f, "{}", http.url),
        }
    }
}

impl BundleSpec {
    /// Classify the configured source kind.
    ///
    /// All three descriptors populated is a configuration error; with
    /// two populated, `file` takes precedence over `github` over
    /// `http`. No descriptor at all means the bundle is resolved from
    /// the cache alone.
    pub fn source(&self) -> BundleResult<Option<Source<'_>>> {
        match (&self.file, &self.github, &self.http) {
            (Some(_), Some(_), Some(_)) => Err(BundleError::SourceConflict {
                name: self.name.clone(),
            }),
            (Some(file), _, _) => Ok(Some(Source::File(file))),
            (None, Some(github), _) => Ok(Some(Source::Github(github))),
            (None, None, Some(http)) => Ok(Some(Source::Http(http))),
            (None, None, None) => Ok(None),
        }
    }
}
