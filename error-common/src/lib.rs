//! Common error handling utilities for LabCare Engine
//!
//! This module provides the standardized error taxonomy and error codes
//! used across all LabCare Engine crates. It ensures consistent error
//! handling and secure, user-presentable error reporting.
//!
//! # Error Categories
//!
//! - **Validation**: input validation errors, caught before computation or
//!   submission and never sent to the backend
//! - **NotFound**: soft "nothing matched" conditions (e.g. a patient search
//!   with zero hits)
//! - **Network**: transport failures (connect, timeout) talking to the
//!   external LMS backend
//! - **Backend**: the backend answered but rejected or failed the request
//! - **Unauthorized**: the bearer token was missing or rejected; kept
//!   distinct from Network so the surrounding shell can re-authenticate
//! - **Serialization**: malformed payloads at the wire boundary
//!
//! # Example
//!
//! ```rust
//! use error_common::{LmsError, LmsResult};
//!
//! fn validate_discount(discount: f64) -> LmsResult<()> {
//!     if discount < 0.0 {
//!         return Err(LmsError::Validation(
//!             "Discount cannot be negative".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_discount(-1.0).is_err());
//! ```

pub mod codes;
pub mod types;

pub use codes::*;
pub use types::*;
