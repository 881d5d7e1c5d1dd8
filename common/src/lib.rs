//! Shared domain types for `lanscout`.
//!
//! Everything the discovery pipeline passes between stages lives here: the
//! device records, the subnet descriptor, the run configuration, the error
//! taxonomy and the capability traits the core drives.

pub mod capability;
pub mod config;
pub mod error;
pub mod macros;
pub mod network;
pub mod rules;

pub use error::ReconError;

#[doc(hidden)]
pub use tracing as __tracing;
