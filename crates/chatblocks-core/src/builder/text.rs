//! Builders for the two text blocks.

use chatblocks_types::kind::BlockKind;

use crate::block::{Block, FieldValue};

use super::{Attach, Root, Slot, attach_into};

/// Builder for a plain-text block.
pub struct PlainTextBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl PlainTextBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for PlainTextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> PlainTextBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::PlainText),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.block.put("text", FieldValue::Str(text.into()));
        self
    }

    /// Whether emoji shortcodes in the text are rendered as emoji.
    pub fn emoji(mut self, emoji: bool) -> Self {
        self.block.put("emoji", FieldValue::Bool(emoji));
        self
    }
}

impl<P: Attach> PlainTextBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for PlainTextBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for a markdown text block.
pub struct MarkdownBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl MarkdownBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for MarkdownBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> MarkdownBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::Markdown),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.block.put("text", FieldValue::Str(text.into()));
        self
    }

    /// When true, skip link and mention preprocessing of the text.
    pub fn verbatim(mut self, verbatim: bool) -> Self {
        self.block.put("verbatim", FieldValue::Bool(verbatim));
        self
    }
}

impl<P: Attach> MarkdownBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for MarkdownBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}
