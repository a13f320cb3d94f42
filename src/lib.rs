//! as-client - HTTP client helper for envelope-style JSON APIs
//!
//! This crate builds requests against a base URL, attaches the identification
//! and auth headers, sends them, and decodes the `{ "code", "data" }` JSON
//! envelope the API answers with.
//!
//! # Overview
//!
//! ```no_run
//! use as_client::{Client, ClientConfig};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Post {
//!     id: String,
//!     body: String,
//! }
//!
//! # async fn run() -> as_client::Result<()> {
//! let config = ClientConfig::new()?.with_base_url("https://write.as/api");
//! let mut client = Client::new(config);
//! client.set_token("00000000-0000-0000-0000-000000000000");
//!
//! let env = client.get::<Post>("/posts/abc123").await?;
//! if let Some(post) = env.data {
//!     println!("{} ({}): {}", post.id, env.code, post.body);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`client`] - The API client and the response envelope
//! - [`config`] - Client configuration and logging setup
//! - [`error`] - Error types and error handling

pub mod client;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use client::{Client, Envelope};
pub use config::ClientConfig;
pub use error::{ClientError, ErrorKind, Result};
