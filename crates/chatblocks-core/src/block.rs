//! The block type and its field storage.
//!
//! A [`Block`] is its kind plus a map of populated fields, keyed by the
//! registry's static field names. All public writes go through
//! [`Block::set`], which applies the construction-time schema checks
//! (unknown field, value shape, nested-kind membership); the fluent
//! builders use the crate-internal unchecked writes because their method
//! signatures already guarantee schema-correct assignments.

use std::collections::HashMap;

use serde_json::{Map, Value};

use chatblocks_types::error::{ReconstructError, SchemaError, ValidationError};
use chatblocks_types::kind::BlockKind;
use chatblocks_types::schema::FieldType;

use crate::registry::{ResolvedSchema, registry};

/// A value held by one field of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Block(Box<Block>),
    List(Vec<FieldValue>),
    /// An opaque subtree kept verbatim (platform-assigned payloads and
    /// subtrees no schema resolves).
    Raw(Value),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Self::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Block> for FieldValue {
    fn from(block: Block) -> Self {
        Self::Block(Box::new(block))
    }
}

/// A structured node in the UI description tree.
///
/// Two blocks are equal when their kind and field contents are equal,
/// which for valid blocks coincides with deep equality of their
/// serialized trees (field order is canonicalized at serialization).
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    kind: BlockKind,
    fields: HashMap<&'static str, FieldValue>,
}

impl Block {
    /// An empty block of the given kind, with the schema's scalar
    /// defaults applied (so a defaulted boolean serializes as
    /// present-and-false rather than absent).
    pub fn new(kind: BlockKind) -> Self {
        let mut fields = HashMap::new();
        for spec in &registry().schema(kind).fields {
            if let FieldType::Bool { default: Some(value) } = spec.ty {
                fields.insert(spec.name, FieldValue::Bool(value));
            }
        }
        Self { kind, fields }
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// The resolved schema this block is checked against.
    pub fn schema(&self) -> &'static ResolvedSchema {
        registry().schema(self.kind)
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Whether this block is the form-input kind that triggers the view
    /// submit rule.
    pub fn is_input(&self) -> bool {
        self.kind.is_input()
    }

    /// Assign a field, applying the construction-time schema checks:
    /// the field must be declared, the value shape must match the
    /// declared type, and nested blocks must be of an allowed kind.
    pub fn set(&mut self, field: &str, value: FieldValue) -> Result<(), SchemaError> {
        let spec = self.schema().field(field).ok_or_else(|| {
            SchemaError::UnknownField {
                kind: self.kind,
                field: field.to_string(),
            }
        })?;

        match (&spec.ty, &value) {
            (FieldType::Str { .. }, FieldValue::Str(_)) => {}
            (FieldType::Int { .. }, FieldValue::Int(_)) => {}
            (FieldType::Bool { .. }, FieldValue::Bool(_)) => {}
            (FieldType::Block { allowed, .. }, FieldValue::Block(block)) => {
                if !allowed.is_empty() && !allowed.contains(&block.kind()) {
                    return Err(SchemaError::DisallowedKind {
                        kind: self.kind,
                        field: spec.name,
                        found: block.kind(),
                    });
                }
            }
            (FieldType::BlockList { allowed, .. }, FieldValue::List(elements)) => {
                for element in elements {
                    let block = element.as_block().ok_or(SchemaError::InvalidValue {
                        kind: self.kind,
                        field: spec.name,
                        expected: spec.ty.expected(),
                    })?;
                    if !allowed.is_empty() && !allowed.contains(&block.kind()) {
                        return Err(SchemaError::DisallowedKind {
                            kind: self.kind,
                            field: spec.name,
                            found: block.kind(),
                        });
                    }
                }
            }
            (FieldType::Raw, _) => {}
            _ => {
                return Err(SchemaError::InvalidValue {
                    kind: self.kind,
                    field: spec.name,
                    expected: spec.ty.expected(),
                });
            }
        }

        self.fields.insert(spec.name, value);
        Ok(())
    }

    /// Unchecked write, used by the builders whose signatures guarantee
    /// a declared field and a matching value shape.
    pub(crate) fn put(&mut self, field: &'static str, value: FieldValue) {
        self.fields.insert(field, value);
    }

    /// Append to a list field, creating the list on first use.
    pub(crate) fn push_item(&mut self, field: &'static str, value: FieldValue) {
        let entry = self
            .fields
            .entry(field)
            .or_insert_with(|| FieldValue::List(Vec::new()));
        if let FieldValue::List(items) = entry {
            items.push(value);
        }
    }

    /// Whether a select menu declares an option whose text or value
    /// matches `needle`. Blocks without options report `false`.
    pub fn has_option(&self, needle: &str) -> bool {
        self.find_option(needle).is_some()
    }

    /// The declared option whose text or value matches `needle`, searched
    /// in `options` first, then inside each group of `option_groups`.
    pub fn find_option(&self, needle: &str) -> Option<&Block> {
        if let Some(FieldValue::List(options)) = self.get("options")
            && let Some(found) = option_matching(options, needle)
        {
            return Some(found);
        }
        if let Some(FieldValue::List(groups)) = self.get("option_groups") {
            for group in groups {
                if let Some(FieldValue::List(options)) =
                    group.as_block().and_then(|g| g.get("options"))
                    && let Some(found) = option_matching(options, needle)
                {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Check this block against its declared contract.
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::validate::validate(self)
    }

    /// Validate, then emit the ordered wire tree. All-or-nothing.
    pub fn serialize(&self) -> Result<Value, ValidationError> {
        crate::serialize::serialize(self)
    }

    /// Validate, then emit the canonical JSON text encoding.
    pub fn to_json(&self) -> Result<String, ValidationError> {
        crate::serialize::to_json(self)
    }

    /// Rebuild a block from a wire tree.
    pub fn reconstruct(tree: &Map<String, Value>) -> Result<Self, ReconstructError> {
        crate::reconstruct::reconstruct(tree)
    }

    /// Rebuild a block from its JSON text encoding.
    pub fn from_json(text: &str) -> Result<Self, ReconstructError> {
        crate::reconstruct::from_json(text)
    }
}

fn option_matching<'a>(options: &'a [FieldValue], needle: &str) -> Option<&'a Block> {
    options.iter().filter_map(FieldValue::as_block).find(|opt| {
        let text = opt
            .get("text")
            .and_then(FieldValue::as_block)
            .and_then(|t| t.get("text"))
            .and_then(FieldValue::as_str);
        let value = opt.get("value").and_then(FieldValue::as_str);
        text == Some(needle) || value == Some(needle)
    })
}

impl serde::Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let tree = crate::serialize::serialize(self).map_err(serde::ser::Error::custom)?;
        tree.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let tree = value
            .as_object()
            .ok_or_else(|| serde::de::Error::custom("expected a tree of fields"))?;
        crate::reconstruct::reconstruct(tree).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_boolean_defaults() {
        let block = Block::new(BlockKind::PlainText);
        assert_eq!(block.get("emoji"), Some(&FieldValue::Bool(false)));

        let block = Block::new(BlockKind::Markdown);
        assert_eq!(block.get("verbatim"), Some(&FieldValue::Bool(false)));

        // No default declared; absent until assigned.
        let block = Block::new(BlockKind::Input);
        assert!(block.get("optional").is_none());
    }

    #[test]
    fn test_set_unknown_field_is_fatal() {
        let mut block = Block::new(BlockKind::Button);
        let err = block.set("colour", FieldValue::from("red")).unwrap_err();
        assert_eq!(err.to_string(), "unknown field `colour` on button");
    }

    #[test]
    fn test_set_rejects_wrong_value_shape() {
        let mut block = Block::new(BlockKind::Button);
        let err = block.set("action_id", FieldValue::Int(7)).unwrap_err();
        assert_eq!(err.to_string(), "field `action_id` on button expects a string");
    }

    #[test]
    fn test_set_rejects_disallowed_nested_kind() {
        let mut section = Block::new(BlockKind::Section);
        let divider = Block::new(BlockKind::Divider);
        let err = section
            .set("accessory", FieldValue::from(divider))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "field `accessory` on section does not accept divider blocks"
        );
    }

    #[test]
    fn test_set_accepts_allowed_nested_kind() {
        let mut section = Block::new(BlockKind::Section);
        let mut image = Block::new(BlockKind::Image);
        image.set("image_url", FieldValue::from("https://example.com/a.png")).unwrap();
        image.set("alt_text", FieldValue::from("an image")).unwrap();
        assert!(section.set("accessory", FieldValue::from(image)).is_ok());
    }

    #[test]
    fn test_equality_ignores_assignment_order() {
        let mut a = Block::new(BlockKind::Divider);
        let mut b = Block::new(BlockKind::Divider);
        a.set("block_id", FieldValue::from("b1")).unwrap();
        b.set("block_id", FieldValue::from("b1")).unwrap();
        assert_eq!(a, b);

        b.set("block_id", FieldValue::from("b2")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_find_option_searches_groups() {
        let mut option = Block::new(BlockKind::SelectOption);
        let mut text = Block::new(BlockKind::PlainText);
        text.set("text", FieldValue::from("First")).unwrap();
        option.set("text", FieldValue::from(text)).unwrap();
        option.set("value", FieldValue::from("v1")).unwrap();

        let mut group = Block::new(BlockKind::OptionGroup);
        group
            .set("options", FieldValue::List(vec![FieldValue::from(option)]))
            .unwrap();

        let mut select = Block::new(BlockKind::StaticSelect);
        select
            .set("option_groups", FieldValue::List(vec![FieldValue::from(group)]))
            .unwrap();

        assert!(select.has_option("First"));
        assert!(select.has_option("v1"));
        assert!(!select.has_option("missing"));
    }
}
