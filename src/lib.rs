//! Purpose: Extract human-readable error messages from arbitrarily shaped JSON documents.
//! Exports: `api` (stable surface) and `core` (matcher, shape table, walker, report, errors).
//! Role: Pure classification library; callers own document I/O and result rendering.
//! Invariants: `parse_errors` is deterministic and holds no process-wide mutable state.
//! Invariants: Shape-trial failures are expected control flow, never surfaced as errors.
pub mod api;
pub mod core;
mod json;
