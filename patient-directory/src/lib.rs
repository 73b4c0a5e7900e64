//! Patient search resolution for the LabCare billing wizard
//!
//! Reconciles a free-text query against the external patient directory
//! and holds the wizard's "selected patient" state. The resolver is an
//! explicit state machine driven by three commands:
//!
//! - `search` - run one directory lookup (empty queries reset instead)
//! - `pick` - commit one patient from a result list
//! - `clear` - discard query, results, and selection
//!
//! Exactly one state holds at any time: Idle, Searching, NoResults,
//! Multiple, or Selected. Every command bumps a generation counter so a
//! slow response from an older search can never overwrite state set by a
//! newer command.

pub mod models;
pub mod resolver;

pub use models::*;
pub use resolver::*;
