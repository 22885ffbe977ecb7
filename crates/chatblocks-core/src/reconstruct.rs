//! Reconstruction: wire tree back to the block graph.
//!
//! Steps: resolve the concrete kind, verify the required fields (and at
//! least one of a declared exclusive pair) are present as keys,
//! instantiate an empty block of that kind, then assign every
//! non-discriminator key. A nested tree that resolves to a kind recurses;
//! a list applies the same rule per element; everything else is assigned
//! verbatim. A key the resolved kind does not declare is a fatal schema
//! error for the whole call.

use serde_json::{Map, Value};

use chatblocks_types::error::{ReconstructError, SchemaError, ValidationError};

use crate::block::{Block, FieldValue};
use crate::resolve::{resolve, resolve_required};

/// Rebuild a block from a wire tree.
pub fn reconstruct(tree: &Map<String, Value>) -> Result<Block, ReconstructError> {
    let kind = resolve_required(tree).inspect_err(|err| {
        tracing::debug!(error = %err, "block reconstruction failed");
    })?;
    let schema = crate::registry::registry().schema(kind);

    for &field in &schema.required {
        if !tree.contains_key(field) {
            return Err(ValidationError::MissingRequired { kind, field }.into());
        }
    }
    if let Some((first, second)) = schema.exclusive
        && !tree.contains_key(first)
        && !tree.contains_key(second)
    {
        return Err(ValidationError::ExclusiveNoneSet { kind, first, second }.into());
    }

    let mut block = Block::new(kind);
    for (key, value) in tree {
        if key == "type" {
            continue;
        }
        if !schema.has_field(key) {
            return Err(SchemaError::UnknownField {
                kind,
                field: key.clone(),
            }
            .into());
        }
        block.set(key, convert(value)?)?;
    }
    Ok(block)
}

/// Rebuild a block from its JSON text encoding.
pub fn from_json(text: &str) -> Result<Block, ReconstructError> {
    let value: Value = serde_json::from_str(text)?;
    let tree = value.as_object().ok_or(ReconstructError::NotATree)?;
    reconstruct(tree)
}

fn convert(value: &Value) -> Result<FieldValue, ReconstructError> {
    match value {
        Value::Object(tree) => {
            if resolve(tree).is_some() {
                Ok(FieldValue::Block(Box::new(reconstruct(tree)?)))
            } else {
                // No schema resolves this subtree; keep it verbatim.
                Ok(FieldValue::Raw(value.clone()))
            }
        }
        Value::Array(items) => {
            let converted = items
                .iter()
                .map(convert)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(FieldValue::List(converted))
        }
        Value::String(text) => Ok(FieldValue::Str(text.clone())),
        Value::Bool(flag) => Ok(FieldValue::Bool(*flag)),
        Value::Number(number) => Ok(number
            .as_i64()
            .map(FieldValue::Int)
            .unwrap_or_else(|| FieldValue::Raw(value.clone()))),
        Value::Null => Ok(FieldValue::Raw(Value::Null)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use chatblocks_types::kind::BlockKind;

    use crate::builder::{ButtonBuilder, InputBuilder, ModalBuilder, SectionBuilder};
    use crate::serialize::serialize;

    fn tree(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_round_trip_preserves_equality() {
        let input = InputBuilder::new()
            .label("Choose")
            .block_id("b1")
            .hint("pick wisely")
            .optional(false)
            .select()
            .placeholder("Pick one")
            .action_id("a1")
            .option()
            .text("one")
            .value("v1")
            .up()
            .option()
            .text("two")
            .value("v2")
            .up()
            .up()
            .build();

        let wire = serialize(&input).unwrap();
        let rebuilt = reconstruct(wire.as_object().unwrap()).unwrap();
        assert_eq!(rebuilt, input);

        // And the re-serialized tree matches the original tree.
        assert_eq!(serialize(&rebuilt).unwrap(), wire);
    }

    #[test]
    fn test_reconstructed_kind_matches_discriminator() {
        let t = tree(json!({
            "type": "button",
            "action_id": "a1",
            "text": {"type": "plain_text", "text": "Click", "emoji": false},
        }));
        let block = reconstruct(&t).unwrap();
        assert_eq!(block.kind(), BlockKind::Button);
        assert_eq!(
            block
                .get("text")
                .and_then(FieldValue::as_block)
                .map(Block::kind),
            Some(BlockKind::PlainText)
        );
    }

    #[test]
    fn test_unknown_field_is_fatal() {
        let t = tree(json!({"type": "divider", "colour": "red"}));
        let err = reconstruct(&t).unwrap_err();
        assert_eq!(err.to_string(), "unknown field `colour` on divider");
    }

    #[test]
    fn test_missing_required_field_is_fatal() {
        let t = tree(json!({"type": "button", "action_id": "a1"}));
        let err = reconstruct(&t).unwrap_err();
        assert_eq!(err.to_string(), "missing required field `text` on button");
    }

    #[test]
    fn test_exclusive_pair_needs_at_least_one_key() {
        let t = tree(json!({
            "type": "static_select",
            "action_id": "a1",
            "placeholder": {"type": "plain_text", "text": "Pick one", "emoji": false},
        }));
        let err = reconstruct(&t).unwrap_err();
        assert!(matches!(
            err,
            ReconstructError::Validation(ValidationError::ExclusiveNoneSet { .. })
        ));
    }

    #[test]
    fn test_scalars_are_assigned_verbatim() {
        let t = tree(json!({
            "type": "plain_text_input",
            "action_id": "a1",
            "multiline": true,
            "min_length": 2,
        }));
        let block = reconstruct(&t).unwrap();
        assert_eq!(block.get("multiline"), Some(&FieldValue::Bool(true)));
        assert_eq!(block.get("min_length"), Some(&FieldValue::Int(2)));
    }

    #[test]
    fn test_unresolvable_subtree_is_kept_verbatim() {
        // A delivered modal carries submitted state the schema treats as
        // opaque; it must survive a reconstruct-then-serialize round trip.
        let state = json!({"values": {"b1": {"a1": {"value": "typed"}}}});
        let t = tree(json!({
            "type": "modal",
            "title": {"type": "plain_text", "text": "Form", "emoji": false},
            "blocks": [{"type": "divider"}],
            "state": state,
        }));
        let modal = reconstruct(&t).unwrap();
        assert_eq!(modal.get("state"), Some(&FieldValue::Raw(state.clone())));

        let wire = serialize(&modal).unwrap();
        assert_eq!(wire["state"], state);
    }

    #[test]
    fn test_disallowed_nested_kind_is_a_schema_error() {
        let t = tree(json!({
            "type": "section",
            "text": {"type": "mrkdwn", "text": "body", "verbatim": false},
            "accessory": {"type": "divider"},
        }));
        let err = reconstruct(&t).unwrap_err();
        assert!(matches!(
            err,
            ReconstructError::Schema(SchemaError::DisallowedKind { .. })
        ));
    }

    #[test]
    fn test_from_json_decodes_the_text_encoding() {
        let section = SectionBuilder::new().text("body").block_id("b1").build();
        let text = crate::serialize::to_json(&section).unwrap();
        let rebuilt = from_json(&text).unwrap();
        assert_eq!(rebuilt, section);
    }

    #[test]
    fn test_from_json_rejects_non_tree_input() {
        assert!(matches!(
            from_json("[1, 2]"),
            Err(ReconstructError::NotATree)
        ));
        assert!(matches!(from_json("not json"), Err(ReconstructError::Json(_))));
    }

    #[test]
    fn test_serde_deserialize_layers_on_reconstruction() {
        let button = ButtonBuilder::new().text("Click").action_id("a1").build();
        let text = serde_json::to_string(&button).unwrap();
        let rebuilt: Block = serde_json::from_str(&text).unwrap();
        assert_eq!(rebuilt, button);
    }

    #[test]
    fn test_view_round_trip() {
        let modal = ModalBuilder::new()
            .title("Form")
            .submit("Send")
            .close("Cancel")
            .callback_id("cb1")
            .private_metadata("k=v")
            .blocks()
            .header()
            .text("Heading")
            .up()
            .input()
            .label("Name")
            .plain_text_input()
            .action_id("a1")
            .up()
            .up()
            .up()
            .build();

        let wire = serialize(&modal).unwrap();
        let rebuilt = reconstruct(wire.as_object().unwrap()).unwrap();
        assert_eq!(rebuilt, modal);
        assert_eq!(serialize(&rebuilt).unwrap(), wire);
    }
}
