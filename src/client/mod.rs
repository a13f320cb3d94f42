//! HTTP client module for as-client.
//!
//! This module provides the API client and the response envelope it returns.

pub mod api;
pub mod envelope;


pub use api::Client;
pub use envelope::Envelope;
