//! Single-CA trust contexts for custom-authority HTTPS fetches
//!
//! A trust context pins exactly one explicitly supplied certificate
//! authority. The client built from it does not merge in the platform's
//! default roots, so a server is trusted if and only if its chain leads
//! to the pinned certificate.

use crate::error::{BundleError, BundleResult};
use tracing::error;

/// TLS trust configuration scoped to one pinned certificate authority
#[derive(Debug, Clone)]
pub struct TrustContext {
    certificate: reqwest::Certificate,
    alias: String,
}

/// Parse a PEM-encoded certificate authority into a trust context.
///
/// Malformed or empty input is terminal; no partial context is ever
/// returned. The alias only labels log lines.
pub fn build(pem: &str, alias: &str) -> BundleResult<TrustContext> {
    let certificate = reqwest::Certificate::from_pem(pem.as_bytes()).map_err(|err| {
        error!("invalid custom certificate authority `{alias}`: {err}");
        BundleError::InvalidCertificate {
            alias: alias.to_string(),
            reason: err.to_string(),
        }
    })?;
    Ok(TrustContext {
        certificate,
        alias: alias.to_string(),
    })
}

impl TrustContext {
    /// The alias this context was built under
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Build an HTTPS client trusting exactly the pinned certificate
    pub fn client(&self) -> BundleResult<reqwest::Client> {
        reqwest::Client::builder()
            .tls_built_in_root_certs(false)
            .add_root_certificate(self.certificate.clone())
            .build()
            .map_err(|err| {
                error!(
                    "failed to build the HTTPS client for `{}`: {err}",
                    self.alias
                );
                BundleError::HttpClient {
                    reason: err.to_string(),
                }
            })
    }
}
