//! GitHub raw-content fetcher

use crate::cluster::ClusterReader;
use crate::error::{BundleError, BundleResult};
use crate::fetch;
use crate::spec::GithubSourceSpec;
use reqwest::header;
use tracing::error;

/// Media type requesting raw file content from the GitHub API
const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";

/// Secret entry holding the access token
const TOKEN_KEY: &str = "token";

/// Fetch the bundle bytes from a GitHub raw-content endpoint.
///
/// When the spec names a secret, its `token` entry authenticates the
/// request; a missing secret or missing entry fails the fetch before
/// any request is made.
pub async fn fetch(
    spec: &GithubSourceSpec,
    cluster: &dyn ClusterReader,
    namespace: &str,
) -> BundleResult<Vec<u8>> {
    let token = match &spec.secret {
        Some(secret) => Some(resolve_token(secret, cluster, namespace).await?),
        None => None,
    };
    let client = fetch::default_client()?;
    let mut request = client
        .get(&spec.url)
        .header(header::ACCEPT, RAW_MEDIA_TYPE);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("token {token}"));
    }
    fetch::execute(request, &spec.url).await
}

async fn resolve_token(
    secret_name: &str,
    cluster: &dyn ClusterReader,
    namespace: &str,
) -> BundleResult<String> {
    let Some(secret) = cluster.secret(secret_name, namespace).await? else {
        error!("cannot find secret {secret_name} in namespace {namespace}");
        return Err(BundleError::SecretNotFound {
            name: secret_name.to_string(),
            namespace: namespace.to_string(),
        });
    };
    let Some(raw) = secret.data.get(TOKEN_KEY) else {
        error!("secret {secret_name} has no `{TOKEN_KEY}` entry");
        return Err(BundleError::SecretKeyMissing {
            name: secret_name.to_string(),
            key: TOKEN_KEY,
        });
    };
    String::from_utf8(raw.clone()).map_err(|_| {
        error!("secret {secret_name} `{TOKEN_KEY}` entry is not valid UTF-8");
        BundleError::SecretKeyInvalid {
            name: secret_name.to_string(),
            key: TOKEN_KEY,
        }
    })
}
