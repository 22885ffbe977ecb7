//! Fluent, navigable block construction.
//!
//! Every builder wraps one in-progress block and is generic over its
//! parent, with the explicit [`Root`] marker as the default for
//! standalone use. Immediate-field setters consume and return the same
//! builder; composite setters return a child builder whose parent and
//! attachment [`Slot`] are captured at creation time. `up()` attaches the
//! finished child into that slot and returns the parent -- it exists only
//! where a parent exists, so unbalanced navigation does not compile.
//! `build()` returns the wrapped block at any point, without validation,
//! so intermediate (possibly invalid) states are inspectable; validation
//! runs at serialize time.
//!
//! ```
//! use chatblocks_core::builder::SectionBuilder;
//!
//! let section = SectionBuilder::new()
//!     .text("Pick an action")
//!     .accessory_button()
//!     .text("Go")
//!     .action_id("go")
//!     .up()
//!     .block_id("b1")
//!     .build();
//! assert!(section.serialize().is_ok());
//! ```

mod element;
mod layout;
mod list;
mod text;
mod view;

pub use element::{
    ButtonBuilder, ConfirmationBuilder, ImageBuilder, MultiStaticSelectBuilder,
    OptionBuilder, OptionGroupBuilder, OverflowBuilder, PlainTextInputBuilder,
    StaticSelectBuilder,
};
pub use layout::{
    ActionsBuilder, ContextBuilder, DividerBuilder, HeaderBuilder, InputBuilder,
    SectionBuilder,
};
pub use list::BlockListBuilder;
pub use text::{MarkdownBuilder, PlainTextBuilder};
pub use view::{HomeBuilder, ModalBuilder};

use chatblocks_types::kind::BlockKind;

use crate::block::{Block, FieldValue};

/// Marker for a builder with no parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Root;

/// Where a finished child attaches in its parent.
#[derive(Debug, Clone, Copy)]
pub enum Slot {
    /// Not attached anywhere (root builders).
    Detached,
    /// Set a single field.
    Set(&'static str),
    /// Append to a list field, creating the list on first use.
    Push(&'static str),
}

/// Implemented by builders that can receive a finished child.
pub trait Attach {
    fn attach(&mut self, slot: Slot, value: FieldValue);
}

/// Color scheme for confirm buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Primary,
    Danger,
}

impl Style {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Danger => "danger",
        }
    }
}

pub(crate) fn attach_into(block: &mut Block, slot: Slot, value: FieldValue) {
    match slot {
        Slot::Set(field) => block.put(field, value),
        Slot::Push(field) => block.push_item(field, value),
        Slot::Detached => {}
    }
}

/// A plain-text block wrapping `text`, with the emoji default applied.
pub(crate) fn plain_text(text: impl Into<String>) -> FieldValue {
    let mut block = Block::new(BlockKind::PlainText);
    block.put("text", FieldValue::Str(text.into()));
    FieldValue::Block(Box::new(block))
}

/// A markdown block wrapping `text`, with the verbatim default applied.
pub(crate) fn markdown(text: impl Into<String>) -> FieldValue {
    let mut block = Block::new(BlockKind::Markdown);
    block.put("text", FieldValue::Str(text.into()));
    FieldValue::Block(Box::new(block))
}
