//! Core types shared across DocCompare crates
//!
//! This crate provides foundational types used by the diff kernel, the
//! session engine and the logging facility:
//!
//! - **Identifiers**: ComparisonId, ChangeId
//! - **Sensitive data**: Sensitive<T> marker keeping document contents out of logs
//! - **Schema constants**: Canonical field keys and event names

pub mod ids;
pub mod schema;
pub mod sensitive;

pub use ids::{ChangeId, ComparisonId};
pub use sensitive::Sensitive;
