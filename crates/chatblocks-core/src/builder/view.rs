//! Builders for the view surfaces.

use chatblocks_types::kind::BlockKind;

use crate::block::{Block, FieldValue};

use super::list::BlockListBuilder;
use super::{Attach, Root, Slot, attach_into, plain_text};

/// Builder for a modal view.
pub struct ModalBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl ModalBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for ModalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ModalBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::Modal),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    /// Title shown at the top of the view.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.block.put("title", plain_text(title));
        self
    }

    /// Open a child builder for the view's block sequence.
    pub fn blocks(self) -> BlockListBuilder<Self> {
        BlockListBuilder::nested(self, Slot::Set("blocks"))
    }

    /// Text of the close button.
    pub fn close(mut self, close: impl Into<String>) -> Self {
        self.block.put("close", plain_text(close));
        self
    }

    /// Text of the submit button; required when the blocks contain an
    /// input block.
    pub fn submit(mut self, submit: impl Into<String>) -> Self {
        self.block.put("submit", plain_text(submit));
        self
    }

    /// Opaque state echoed back in submission payloads.
    pub fn private_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.block.put("private_metadata", FieldValue::Str(metadata.into()));
        self
    }

    /// Identifier for recognizing submissions of this view.
    pub fn callback_id(mut self, callback_id: impl Into<String>) -> Self {
        self.block.put("callback_id", FieldValue::Str(callback_id.into()));
        self
    }

    pub fn clear_on_close(mut self, clear: bool) -> Self {
        self.block.put("clear_on_close", FieldValue::Bool(clear));
        self
    }

    pub fn notify_on_close(mut self, notify: bool) -> Self {
        self.block.put("notify_on_close", FieldValue::Bool(notify));
        self
    }

    /// Custom identifier, unique per workspace.
    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.block.put("external_id", FieldValue::Str(external_id.into()));
        self
    }
}

impl<P: Attach> ModalBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for ModalBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for a home-tab view.
pub struct HomeBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl HomeBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for HomeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> HomeBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::Home),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.block.put("title", plain_text(title));
        self
    }

    pub fn blocks(self) -> BlockListBuilder<Self> {
        BlockListBuilder::nested(self, Slot::Set("blocks"))
    }

    pub fn close(mut self, close: impl Into<String>) -> Self {
        self.block.put("close", plain_text(close));
        self
    }

    pub fn submit(mut self, submit: impl Into<String>) -> Self {
        self.block.put("submit", plain_text(submit));
        self
    }

    pub fn private_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.block.put("private_metadata", FieldValue::Str(metadata.into()));
        self
    }

    pub fn callback_id(mut self, callback_id: impl Into<String>) -> Self {
        self.block.put("callback_id", FieldValue::Str(callback_id.into()));
        self
    }

    pub fn clear_on_close(mut self, clear: bool) -> Self {
        self.block.put("clear_on_close", FieldValue::Bool(clear));
        self
    }

    pub fn notify_on_close(mut self, notify: bool) -> Self {
        self.block.put("notify_on_close", FieldValue::Bool(notify));
        self
    }

    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.block.put("external_id", FieldValue::Str(external_id.into()));
        self
    }
}

impl<P: Attach> HomeBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for HomeBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}
