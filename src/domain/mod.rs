//! Domain logic - pure release rules independent of how git is invoked

pub mod release;
pub mod version;

pub use release::{NameTemplate, ReleaseDescriptor};
pub use version::{RolloverPolicy, TagVersion, Version};
