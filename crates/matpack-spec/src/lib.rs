//! matpack plan and material data model.
//!
//! This crate provides the types, validation, and hashing for matpack pack
//! plans and material documents. Plans are JSON documents that describe how
//! to combine channels of named source images into packed output textures;
//! materials are JSON documents holding shader property values.
//!
//! # Example
//!
//! ```
//! use matpack_spec::channel::{Channel, ChannelSelector, TextureOutput};
//! use matpack_spec::plan::{PackPlan, PlanKind};
//! use matpack_spec::validation::validate_plan;
//! use matpack_spec::hash::canonical_plan_hash;
//!
//! let mut output = TextureOutput::new("_MOES");
//! output.r = ChannelSelector::source(0, Channel::R);
//! output.g = ChannelSelector::source(1, Channel::R);
//!
//! let plan = PackPlan::builder("crate_props", PlanKind::PackFilesV1)
//!     .input("metallic.png")
//!     .input("occlusion.png")
//!     .output(output)
//!     .build();
//!
//! let result = validate_plan(&plan);
//! assert!(result.is_ok());
//!
//! let hash = canonical_plan_hash(&plan).unwrap();
//! assert_eq!(hash.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`channel`]: Channel selectors and output recipes
//! - [`convert`]: Material conversion between shader layouts
//! - [`error`]: Error and warning types for validation
//! - [`hash`]: Canonical (JCS + BLAKE3) hashing
//! - [`material`]: Material documents and manageable properties
//! - [`plan`]: Pack plan type and builder
//! - [`validation`]: Plan and rules validation

pub mod channel;
pub mod convert;
pub mod error;
pub mod hash;
pub mod material;
pub mod plan;
pub mod validation;

// Re-export commonly used types at the crate root
pub use channel::{Channel, ChannelSelector, TextureOutput};
pub use convert::{convert_material, sync_properties, ConversionRules, PropertyMapping, SyncStats};
pub use error::{
    ErrorCode, PlanError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use hash::{canonical_plan_hash, canonicalize_json};
pub use material::{
    Material, MaterialProperty, PropertyId, PropertyIdCache, PropertyKind, PropertyValue,
};
pub use plan::{PackPlan, PackPlanBuilder, PlanKind, PLAN_VERSION};
pub use validation::{validate_plan, validate_rules};
