//! Serialization to the ordered wire tree.
//!
//! Emission is driven by the registry's resolved field order: the
//! discriminator first, then every populated field, base contract before
//! derived fields. Absent optional fields are omitted entirely -- never
//! emitted as null placeholders. Serialization validates first and emits
//! nothing on failure.

use serde_json::{Map, Value};

use chatblocks_types::error::ValidationError;

use crate::block::{Block, FieldValue};
use crate::validate::validate;

/// Validate `block`, then emit its ordered wire tree.
pub fn serialize(block: &Block) -> Result<Value, ValidationError> {
    validate(block)?;
    Ok(Value::Object(emit(block)))
}

/// Validate `block`, then emit the canonical JSON text encoding.
pub fn to_json(block: &Block) -> Result<String, ValidationError> {
    let tree = serialize(block)?;
    Ok(tree.to_string())
}

/// Emit a block already known to be valid. Shared with the aggregate
/// list so a batch is validated exactly once per element.
pub(crate) fn emit(block: &Block) -> Map<String, Value> {
    let schema = block.schema();
    let mut tree = Map::new();
    if let Some(discriminator) = schema.discriminator {
        tree.insert("type".to_string(), Value::String(discriminator.to_string()));
    }
    for spec in &schema.fields {
        if let Some(value) = block.get(spec.name) {
            tree.insert(spec.name.to_string(), emit_value(value));
        }
    }
    tree
}

fn emit_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Str(text) => Value::String(text.clone()),
        FieldValue::Int(value) => Value::from(*value),
        FieldValue::Bool(flag) => Value::Bool(*flag),
        FieldValue::Block(block) => Value::Object(emit(block)),
        FieldValue::List(items) => Value::Array(items.iter().map(emit_value).collect()),
        FieldValue::Raw(raw) => raw.clone(),
    }
}
