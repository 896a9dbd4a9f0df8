//! Integration tests for the bundle loader

mod servers;
mod tls;

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Initialize test logging once; honors `RUST_LOG`
pub fn init_logs() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .without_time()
            .try_init();
    });
}
