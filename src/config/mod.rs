//! Project descriptor handling for frontconf
//!
//! This module provides:
//! - The raw descriptor as read from `frontconf.json` / `frontconf.toml`
//! - Normalization into a fully populated descriptor
//! - Loading and saving descriptors and external rule catalogs
//! - Advisory checks used by `frontconf check`

pub mod file;
pub mod loader;
pub mod normalize;
pub mod validator;

pub use file::{ProjectDescriptor, DESCRIPTOR_FILE_NAMES};
pub use loader::{CatalogLoader, DescriptorFormat, DescriptorLoader, LoadedDescriptor};
pub use normalize::NormalizedDescriptor;
pub use validator::{
    validate_all, CatalogValidator, CheckContext, ConfigValidator, DescriptorValidator,
    ValidationIssue, ValidationResult, ValidationSeverity,
};
