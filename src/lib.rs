//! DayMatrix client - a Rust client for the DayMatrix productivity API.
//!
//! The core of the crate is the authenticated request pipeline:
//! [`auth::SessionManager`] owns the access/refresh token lifecycle and
//! [`api::ApiClient`] attaches the bearer credential to every call and
//! recovers transparently from a single expired-token rejection. Typed
//! wrappers for the task, note, habit, goal and user endpoints ride on the
//! gateway, and [`models::matrix`] derives Eisenhower-matrix classification
//! client-side.
//!
//! HTTP transport and credential storage sit behind traits so tests can swap
//! in the in-memory implementations under [`adapters::mock`].

pub mod adapters;
pub mod api;
pub mod auth;
pub mod error;
pub mod models;
pub mod traits;
