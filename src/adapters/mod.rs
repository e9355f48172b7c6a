//! Production implementations of the trait seams.
//!
//! - [`ReqwestHttpClient`]: HTTP transport over reqwest
//! - [`FileTokenStore`]: durable credential storage on disk
//! - [`mock`]: in-memory implementations for testing

pub mod file_store;
pub mod mock;
pub mod reqwest_http;

pub use file_store::FileTokenStore;
pub use reqwest_http::ReqwestHttpClient;
