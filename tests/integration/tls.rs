//! Custom-CA trust properties, verified over real TLS handshakes

use crate::doubles::{resolver, MemoryCluster, MemoryStore};
use crate::servers::tls_server;
use bundle_loader::spec::{CertificationAuthoritySpec, HttpSourceSpec};
use bundle_loader::{BundleLoader, BundleSpec, PullPolicy};

const NS: &str = "jobs";

fn https_spec(port: u16) -> BundleSpec {
    BundleSpec {
        name: "reports".to_string(),
        file: None,
        github: None,
        http: Some(HttpSourceSpec {
            url: format!("https://localhost:{port}/bundle"),
            certification_authority: Some(CertificationAuthoritySpec {
                config_map_name: Some("internal-ca".to_string()),
                sub_path: Some("ca.crt".to_string()),
            }),
        }),
        pull_policy: PullPolicy::Always,
    }
}

#[tokio::test]
async fn pinned_authority_completes_the_handshake() {
    crate::init_logs();
    let (addr, pem) = tls_server(b"payload");
    let store = MemoryStore::default();
    let cluster = MemoryCluster::default();
    cluster.add_config_map(NS, "internal-ca", &[("ca.crt", &pem)]);

    let resolved = resolver(&cluster, &store)
        .load(&https_spec(addr.port()), NS)
        .await;
    let bundle = resolved.expect("handshake against the pinned certificate succeeds");
    assert_eq!(bundle.content(), b"payload");
    assert_eq!(store.entry("reports"), Some(b"payload".to_vec()));
}

#[tokio::test]
async fn unrelated_authority_fails_the_handshake() {
    let (addr, _server_pem) = tls_server(b"payload");
    // Pin a different, freshly generated authority: the server's
    // certificate must not be trusted.
    let (_other_addr, other_pem) = tls_server(b"other");
    let store = MemoryStore::default();
    let cluster = MemoryCluster::default();
    cluster.add_config_map(NS, "internal-ca", &[("ca.crt", &other_pem)]);

    let resolved = resolver(&cluster, &store)
        .load(&https_spec(addr.port()), NS)
        .await;
    assert!(resolved.is_none());
    assert_eq!(store.entry("reports"), None);
}

#[tokio::test]
async fn garbage_authority_material_blocks_the_request() {
    let (addr, _pem) = tls_server(b"payload");
    let store = MemoryStore::default();
    let cluster = MemoryCluster::default();
    cluster.add_config_map(NS, "internal-ca", &[("ca.crt", "not a certificate")]);

    let resolved = resolver(&cluster, &store)
        .load(&https_spec(addr.port()), NS)
        .await;
    assert!(resolved.is_none());
}
