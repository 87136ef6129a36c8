//! User interface module - operator-facing output.
//!
//! Everything the tool tells the operator goes through [formatter]; diagnostic
//! detail goes to `tracing` instead.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_dry_run_plan, display_error, display_release, display_resolution, display_status,
    display_success,
};
