//! Purpose: Define the stable public API boundary for errsift.
//! Exports: `parse_errors` plus the report and error types it produces.
//! Role: Public, additive-only surface; internal modules stay behind `core`.
//! Invariants: This module is the supported path for library consumers.

pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::report::{ErrorRecord, ErrorReport};
pub use crate::core::walker::parse_errors;
