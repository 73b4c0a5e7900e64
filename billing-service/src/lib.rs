//! Billing Service for the LabCare laboratory management system
//!
//! Provides the billing wizard's core logic:
//! - Bill draft composition (line items, discount, payment capture, notes)
//! - Total computation (sub total, grand total, amount due) in exact
//!   decimal arithmetic
//! - Test/package selection with duplicate prevention and a live offer
//!   list
//! - Bill and test-package submission to the external LMS backend
//!
//! Totals are never stored: they are recomputed from the current items,
//! discount, and received amount on every change, so the displayed
//! figures cannot drift from their inputs.

pub mod models;
pub mod selection;
pub mod service;
pub mod totals;

pub use models::*;
pub use selection::*;
pub use service::*;
pub use totals::*;
