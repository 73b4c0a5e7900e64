//! HTTP client for the external LMS backend
//!
//! Provides a typed wrapper over the laboratory backend's REST API:
//! - Patient directory search
//! - Test catalog retrieval
//! - Bill creation, update, and fetch
//! - Test package creation
//!
//! Every request carries a bearer token supplied by an injected
//! [`TokenProvider`], and every response is parsed into an explicit wire
//! type at the boundary. Monetary fields are accepted as either JSON
//! numbers or string-encoded numbers, since the backend has been observed
//! to emit both.

pub mod client;
pub mod error;
pub mod token;
pub mod types;

pub use client::*;
pub use error::*;
pub use token::*;
pub use types::*;
