//! Builder for the aggregate block list.

use crate::block::{Block, FieldValue};
use crate::list::BlockList;

use super::layout::{
    ActionsBuilder, ContextBuilder, DividerBuilder, HeaderBuilder, InputBuilder,
    SectionBuilder,
};
use super::{Attach, Root, Slot};

/// Builder for an ordered sequence of top-level blocks.
///
/// Standalone it builds a [`BlockList`]; nested under a view builder it
/// attaches the sequence to the view's `blocks` field on `up()`.
pub struct BlockListBuilder<P = Root> {
    blocks: Vec<Block>,
    parent: P,
    slot: Slot,
}

impl BlockListBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for BlockListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> BlockListBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            blocks: Vec::new(),
            parent,
            slot,
        }
    }

    pub fn build(self) -> BlockList {
        BlockList::from(self.blocks)
    }

    /// Append an actions block and open its builder.
    pub fn actions(self) -> ActionsBuilder<Self> {
        ActionsBuilder::nested(self, Slot::Push("blocks"))
    }

    /// Append a context block and open its builder.
    pub fn context(self) -> ContextBuilder<Self> {
        ContextBuilder::nested(self, Slot::Push("blocks"))
    }

    /// Append a divider block and open its builder.
    pub fn divider(self) -> DividerBuilder<Self> {
        DividerBuilder::nested(self, Slot::Push("blocks"))
    }

    /// Append a header block and open its builder.
    pub fn header(self) -> HeaderBuilder<Self> {
        HeaderBuilder::nested(self, Slot::Push("blocks"))
    }

    /// Append an input block and open its builder.
    pub fn input(self) -> InputBuilder<Self> {
        InputBuilder::nested(self, Slot::Push("blocks"))
    }

    /// Append a section block and open its builder.
    pub fn section(self) -> SectionBuilder<Self> {
        SectionBuilder::nested(self, Slot::Push("blocks"))
    }
}

impl<P: Attach> BlockListBuilder<P> {
    /// Attach the sequence into the parent and return it.
    pub fn up(self) -> P {
        let Self { blocks, mut parent, slot } = self;
        let elements = blocks
            .into_iter()
            .map(|block| FieldValue::Block(Box::new(block)))
            .collect();
        parent.attach(slot, FieldValue::List(elements));
        parent
    }
}

impl<P> Attach for BlockListBuilder<P> {
    fn attach(&mut self, _slot: Slot, value: FieldValue) {
        if let FieldValue::Block(block) = value {
            self.blocks.push(*block);
        }
    }
}
