//! Type resolution: wire tree to concrete block kind.
//!
//! Two tiers, evaluated in order. A tree carrying a `type` key is
//! resolved by discriminator lookup alone -- an unknown discriminator
//! never falls through to structural matching. A tree without a
//! discriminator is matched structurally against the undiscriminated
//! value-object kinds, in their declaration order, by testing whether a
//! candidate's required-field set is a subset of the tree's keys. The
//! first match wins: a tree satisfying more than one candidate resolves
//! to the earlier declaration, which is a documented precedence rule,
//! not an artifact of iteration order.

use serde_json::{Map, Value};

use chatblocks_types::error::ResolveError;
use chatblocks_types::kind::BlockKind;

use crate::registry::registry;

/// Resolve the concrete kind for a wire tree, if any.
pub fn resolve(tree: &Map<String, Value>) -> Option<BlockKind> {
    match tree.get("type") {
        Some(Value::String(discriminator)) => registry().by_discriminator(discriminator),
        Some(_) => None,
        None => structural(tree),
    }
}

/// Resolve the concrete kind for a wire tree, or explain why not.
pub fn resolve_required(tree: &Map<String, Value>) -> Result<BlockKind, ResolveError> {
    match tree.get("type") {
        Some(Value::String(discriminator)) => registry()
            .by_discriminator(discriminator)
            .ok_or_else(|| ResolveError::UnknownDiscriminator(discriminator.clone())),
        Some(_) => Err(ResolveError::NoMatch),
        None => structural(tree).ok_or(ResolveError::NoMatch),
    }
}

fn structural(tree: &Map<String, Value>) -> Option<BlockKind> {
    let found = registry()
        .structural_candidates()
        .iter()
        .copied()
        .find(|kind| {
            registry()
                .schema(*kind)
                .required
                .iter()
                .all(|field| tree.contains_key(*field))
        });
    if let Some(kind) = found {
        tracing::trace!(kind = %kind, "structurally resolved block kind");
    }
    found
}
