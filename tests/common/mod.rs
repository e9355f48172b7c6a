#![allow(dead_code)]
//! Shared helpers for integration tests.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing output for test debugging (RUST_LOG-controlled).
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build a JWT-shaped token with the given expiry claim.
pub fn make_jwt(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp));
    let signature = URL_SAFE_NO_PAD.encode("fake-signature");
    format!("{}.{}.{}", header, payload, signature)
}

/// A token that expires an hour from now.
pub fn fresh_jwt() -> String {
    make_jwt(chrono::Utc::now().timestamp() + 3600)
}

/// A token that expired an hour ago.
pub fn expired_jwt() -> String {
    make_jwt(chrono::Utc::now().timestamp() - 3600)
}
