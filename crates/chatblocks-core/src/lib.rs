//! Schema-driven engine for chat-platform UI block trees.
//!
//! Every block kind declares a field contract in the [`registry`]; the
//! engines are generic over those contracts. [`validate`] checks a block
//! against its contract, [`serialize`] turns a valid block into an ordered
//! wire tree, [`resolve`] maps a wire tree back to a concrete kind (by
//! discriminator, or structurally for the value-object kinds), and
//! [`reconstruct`] rebuilds the full object graph from a tree. The
//! [`builder`] module provides fluent, navigable construction, and
//! [`list`] the ordered top-level block sequence.
//!
//! The engine is a pure in-memory transformation: no IO, no transport,
//! no shared mutable state beyond the lazily resolved schema registry.

pub mod block;
pub mod builder;
pub mod list;
pub mod reconstruct;
pub mod registry;
pub mod resolve;
pub mod serialize;
pub mod validate;
