//! The aggregate block list.
//!
//! An ordered sequence of top-level blocks, serialized as a plain list of
//! trees (no wrapping key). Reconstruction is all-or-nothing: any
//! element that fails resolution or reconstruction fails the whole list.

use serde_json::Value;

use chatblocks_types::error::{ReconstructError, ValidationError};

use crate::block::Block;
use crate::reconstruct;
use crate::serialize;
use crate::validate::validate;

/// Ceiling on the number of top-level blocks in one list.
pub const MAX_BLOCKS: usize = 100;

/// An ordered sequence of top-level blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockList {
    blocks: Vec<Block>,
}

impl BlockList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block to the end of the sequence.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    /// Whether any contained block is the form-input kind. An enclosing
    /// view uses this to enforce its submit rule.
    pub fn has_input_block(&self) -> bool {
        self.blocks.iter().any(Block::is_input)
    }

    /// Validate every block, then emit the list of wire trees.
    /// All-or-nothing: the first invalid block fails the whole list.
    pub fn serialize(&self) -> Result<Vec<Value>, ValidationError> {
        if self.blocks.len() > MAX_BLOCKS {
            return Err(ValidationError::TooManyBlocks {
                max: MAX_BLOCKS,
                len: self.blocks.len(),
            });
        }
        for block in &self.blocks {
            validate(block)?;
        }
        Ok(self
            .blocks
            .iter()
            .map(|block| Value::Object(serialize::emit(block)))
            .collect())
    }

    /// Validate every block, then emit the canonical JSON text encoding.
    pub fn to_json(&self) -> Result<String, ValidationError> {
        let trees = self.serialize()?;
        Ok(Value::Array(trees).to_string())
    }

    /// Rebuild a list from wire trees, resolving and reconstructing each
    /// element independently. Any element failure fails the whole list.
    pub fn reconstruct(trees: &[Value]) -> Result<Self, ReconstructError> {
        let blocks = trees
            .iter()
            .map(|value| {
                let tree = value.as_object().ok_or(ReconstructError::NotATree)?;
                reconstruct::reconstruct(tree)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { blocks })
    }

    /// Rebuild a list from its JSON text encoding.
    pub fn from_json(text: &str) -> Result<Self, ReconstructError> {
        let value: Value = serde_json::from_str(text)?;
        let trees = value.as_array().ok_or(ReconstructError::NotAList)?;
        Self::reconstruct(trees)
    }
}

impl From<Vec<Block>> for BlockList {
    fn from(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

impl serde::Serialize for BlockList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let trees = self.serialize().map_err(serde::ser::Error::custom)?;
        trees.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for BlockList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let trees = Vec::<Value>::deserialize(deserializer)?;
        Self::reconstruct(&trees).map_err(serde::de::Error::custom)
    }
}
