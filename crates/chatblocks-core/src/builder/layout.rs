//! Builders for the layout blocks.

use chatblocks_types::kind::BlockKind;

use crate::block::{Block, FieldValue};

use super::element::{
    ButtonBuilder, ImageBuilder, MultiStaticSelectBuilder, OverflowBuilder,
    PlainTextInputBuilder, StaticSelectBuilder,
};
use super::text::MarkdownBuilder;
use super::{Attach, Root, Slot, attach_into, markdown, plain_text};

/// Builder for a header block.
pub struct HeaderBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl HeaderBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for HeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> HeaderBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::Header),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.block.put("text", plain_text(text));
        self
    }

    pub fn block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block.put("block_id", FieldValue::Str(block_id.into()));
        self
    }
}

impl<P: Attach> HeaderBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for HeaderBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for a section block.
///
/// `text` and `field` populate the mutually-exclusive pair; exactly one
/// of the two must be used before the section serializes.
pub struct SectionBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl SectionBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for SectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> SectionBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::Section),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    /// Markdown body of the section.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.block.put("text", markdown(text));
        self
    }

    pub fn block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block.put("block_id", FieldValue::Str(block_id.into()));
        self
    }

    /// Append a markdown field rendered in the two-column compact form.
    pub fn field(mut self, text: impl Into<String>) -> Self {
        self.block.push_item("fields", markdown(text));
        self
    }

    pub fn accessory_button(self) -> ButtonBuilder<Self> {
        ButtonBuilder::nested(self, Slot::Set("accessory"))
    }

    pub fn accessory_image(self) -> ImageBuilder<Self> {
        ImageBuilder::nested(self, Slot::Set("accessory"))
    }

    pub fn accessory_overflow(self) -> OverflowBuilder<Self> {
        OverflowBuilder::nested(self, Slot::Set("accessory"))
    }

    pub fn accessory_plain_text_input(self) -> PlainTextInputBuilder<Self> {
        PlainTextInputBuilder::nested(self, Slot::Set("accessory"))
    }

    pub fn accessory_select(self) -> StaticSelectBuilder<Self> {
        StaticSelectBuilder::nested(self, Slot::Set("accessory"))
    }

    pub fn accessory_multi_select(self) -> MultiStaticSelectBuilder<Self> {
        MultiStaticSelectBuilder::nested(self, Slot::Set("accessory"))
    }
}

impl<P: Attach> SectionBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for SectionBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for a divider block.
pub struct DividerBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl DividerBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for DividerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> DividerBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::Divider),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    pub fn block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block.put("block_id", FieldValue::Str(block_id.into()));
        self
    }
}

impl<P: Attach> DividerBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for DividerBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for an actions block holding up to five interactive elements.
pub struct ActionsBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl ActionsBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for ActionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ActionsBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::Actions),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    pub fn block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block.put("block_id", FieldValue::Str(block_id.into()));
        self
    }

    /// Append a button element and open its builder.
    pub fn button(self) -> ButtonBuilder<Self> {
        ButtonBuilder::nested(self, Slot::Push("elements"))
    }

    /// Append a select element and open its builder.
    pub fn select(self) -> StaticSelectBuilder<Self> {
        StaticSelectBuilder::nested(self, Slot::Push("elements"))
    }

    /// Append an overflow element and open its builder.
    pub fn overflow(self) -> OverflowBuilder<Self> {
        OverflowBuilder::nested(self, Slot::Push("elements"))
    }
}

impl<P: Attach> ActionsBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for ActionsBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for a context block holding small images and text.
pub struct ContextBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ContextBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::Context),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    pub fn block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block.put("block_id", FieldValue::Str(block_id.into()));
        self
    }

    /// Append an image element and open its builder.
    pub fn image(self) -> ImageBuilder<Self> {
        ImageBuilder::nested(self, Slot::Push("elements"))
    }

    /// Append a markdown text element and open its builder.
    pub fn markdown(self) -> MarkdownBuilder<Self> {
        MarkdownBuilder::nested(self, Slot::Push("elements"))
    }
}

impl<P: Attach> ContextBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for ContextBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for an input block collecting one value from the user.
pub struct InputBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl InputBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for InputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> InputBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::Input),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    /// Label shown above the input element.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.block.put("label", plain_text(label));
        self
    }

    pub fn block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block.put("block_id", FieldValue::Str(block_id.into()));
        self
    }

    /// Hint shown below the input element.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.block.put("hint", plain_text(hint));
        self
    }

    /// Whether the input may be left empty on submit.
    pub fn optional(mut self, optional: bool) -> Self {
        self.block.put("optional", FieldValue::Bool(optional));
        self
    }

    /// Set the element to a freeform text input and open its builder.
    pub fn plain_text_input(self) -> PlainTextInputBuilder<Self> {
        PlainTextInputBuilder::nested(self, Slot::Set("element"))
    }

    /// Set the element to a single-select menu and open its builder.
    pub fn select(self) -> StaticSelectBuilder<Self> {
        StaticSelectBuilder::nested(self, Slot::Set("element"))
    }

    /// Set the element to a multi-select menu and open its builder.
    pub fn multi_select(self) -> MultiStaticSelectBuilder<Self> {
        MultiStaticSelectBuilder::nested(self, Slot::Set("element"))
    }
}

impl<P: Attach> InputBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for InputBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}
