//! Loopback servers backing the fetcher tests
//!
//! Plain-HTTP servers run on axum and record every request's headers;
//! the TLS server speaks rustls directly with an ephemeral self-signed
//! certificate so handshake behavior can be observed end to end.

use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use rcgen::generate_simple_self_signed;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::{ServerConfig, ServerConnection, StreamOwned};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Records the requests a test server received
#[derive(Default, Clone)]
pub struct Recorder {
    hits: Arc<AtomicU32>,
    headers: Arc<Mutex<Vec<HeaderMap>>>,
}

impl Recorder {
    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn header(&self, index: usize, name: &str) -> Option<String> {
        self.headers.lock().unwrap().get(index).and_then(|headers| {
            headers
                .get(name)
                .map(|value| value.to_str().unwrap().to_string())
        })
    }
}

/// Serve `body` with `status` at `/bundle` on a loopback port,
/// returning the URL and the request recorder.
pub async fn http_server(status: StatusCode, body: &'static [u8]) -> (String, Recorder) {
    let recorder = Recorder::default();
    let recorded = recorder.clone();
    let app = Router::new().route(
        "/bundle",
        get(move |headers: HeaderMap| {
            let recorded = recorded.clone();
            async move {
                recorded.hits.fetch_add(1, Ordering::SeqCst);
                recorded.headers.lock().unwrap().push(headers);
                (status, body.to_vec())
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/bundle"), recorder)
}

/// Serve `body` over TLS with an ephemeral self-signed certificate for
/// `localhost`, returning the bound address and the certificate PEM.
pub fn tls_server(body: &'static [u8]) -> (SocketAddr, String) {
    let _ = rustls::crypto::ring::default_provider().install_default();
    let rcgen::CertifiedKey { cert, signing_key } =
        generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let pem = cert.pem();
    let cert_der = CertificateDer::from(cert);
    let key_der = PrivateKeyDer::from(PrivatePkcs8KeyDer::from(signing_key.serialize_der()));
    let config = Arc::new(
        ServerConfig::builder()
            .with_no_client_auth()
            .with_single_cert(vec![cert_der], key_der)
            .unwrap(),
    );

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for tcp in listener.incoming().flatten() {
            // A failed handshake (an untrusting client) just ends this
            // connection; keep accepting.
            let Ok(connection) = ServerConnection::new(Arc::clone(&config)) else {
                continue;
            };
            let mut stream = StreamOwned::new(connection, tcp);
            let mut request = [0u8; 1024];
            if stream.read(&mut request).is_err() {
                continue;
            }
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(body);
            let _ = stream.flush();
        }
    });

    (addr, pem)
}
