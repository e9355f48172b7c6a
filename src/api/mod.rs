//! Backend API surface: auth endpoints, the authenticated request gateway,
//! and the typed CRUD wrappers that ride on it.

pub mod auth_api;
pub mod client;
pub mod resources;

pub use auth_api::{AuthApi, AuthApiError, RefreshResponse, SignupRequest, TokenPair, DEFAULT_API_URL};
pub use client::ApiClient;
