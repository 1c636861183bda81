//! REST API client module for the Voyaga backend.
//!
//! This module provides the `ApiClient` for issuing authenticated JSON
//! requests. The backend uses short-lived JWT access credentials paired
//! with a longer-lived refresh credential; on a 401 the client performs a
//! single refresh-and-retry sequence before giving up.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
