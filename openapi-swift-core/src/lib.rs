//! # OpenAPI Swift Core
//!
//! Core type descriptors for the OpenAPI Swift client generator.
//!
//! This crate provides:
//! - The closed set of schema classifications
//! - Immutable native Swift type descriptors and their composition rules
//! - Usage-site transforms for nullable and optional values
//! - Error types for classification parsing and type composition

pub mod error;
pub mod native;
pub mod types;

pub use error::{Error, Result};
pub use native::{NativeType, UsageTransform, UsageType};
pub use types::Classification;
