//! Trait abstractions for dependency injection.
//!
//! These traits define the seams between the session/gateway logic and the
//! outside world (HTTP transport, durable credential storage), enabling
//! mocking in tests.

pub mod http;
pub mod storage;

pub use http::{Headers, HttpClient, HttpError, Method, Response};
pub use storage::{StoreError, TokenStore};
