//! Shared domain types for chatblocks.
//!
//! This crate contains the types used across the chatblocks workspace:
//! the block kind enumeration, the schema descriptor types that declare
//! each kind's field contract, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde_json and thiserror.

pub mod error;
pub mod kind;
pub mod schema;
