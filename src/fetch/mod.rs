//! Source fetchers
//!
//! One strategy per source kind, each producing raw bytes or a typed
//! failure. Fetchers never retry; retry, where it exists at all, is the
//! cache client's concern.

pub mod file;
pub mod github;
pub mod https;

use crate::cluster::ClusterReader;
use crate::error::{BundleError, BundleResult};
use crate::spec::Source;
use tracing::error;

/// Fetch the bytes for the classified source kind
pub async fn source(
    source: &Source<'_>,
    cluster: &dyn ClusterReader,
    namespace: &str,
) -> BundleResult<Vec<u8>> {
    match source {
        Source::File(spec) => file::fetch(&spec.path).await,
        Source::Github(spec) => github::fetch(spec, cluster, namespace).await,
        Source::Http(spec) => https::fetch(spec, cluster, namespace).await,
    }
}

/// HTTPS client with the platform's default trust roots
pub(crate) fn default_client() -> BundleResult<reqwest::Client> {
    reqwest::Client::builder().build().map_err(|err| {
        error!("failed to build the HTTPS client: {err}");
        BundleError::HttpClient {
            reason: err.to_string(),
        }
    })
}

/// Execute a prepared GET and collect the response body.
///
/// A non-2xx status or a transport failure is a fetch failure, logged
/// with the URL and the status where one is available.
pub(crate) async fn execute(
    request: reqwest::RequestBuilder,
    url: &str,
) -> BundleResult<Vec<u8>> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(err) => {
            error!("GET {url} failed: {err}");
            return Err(BundleError::Request {
                url: url.to_string(),
                reason: err.to_string(),
            });
        }
    };
    if !response.status().is_success() {
        let status = response.status();
        error!("GET {url} failed ({status})");
        return Err(BundleError::Status {
            url: url.to_string(),
            status,
        });
    }
    response.bytes().await.map(|body| body.to_vec()).map_err(|err| {
        error!("GET {url} failed while reading the body: {err}");
        BundleError::Request {
            url: url.to_string(),
            reason: err.to_string(),
        }
    })
}
