//! Resolution of the next release version from existing tags

pub mod version_resolver;

pub use version_resolver::{ResolvedVersion, VersionResolver};
