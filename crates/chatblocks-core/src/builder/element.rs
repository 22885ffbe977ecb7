//! Builders for the interactive elements and their value objects.

use chatblocks_types::kind::BlockKind;

use crate::block::{Block, FieldValue};

use super::{Attach, Root, Slot, Style, attach_into, markdown, plain_text};

/// Builder for an image element.
pub struct ImageBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for ImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ImageBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::Image),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.block.put("image_url", FieldValue::Str(url.into()));
        self
    }

    /// Plain-text summary of the image, without markup.
    pub fn alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.block.put("alt_text", FieldValue::Str(alt_text.into()));
        self
    }
}

impl<P: Attach> ImageBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for ImageBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for the confirmation dialog shown before an interactive
/// element's action is carried out.
pub struct ConfirmationBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl ConfirmationBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for ConfirmationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ConfirmationBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::Confirmation),
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

    /// Explanatory text shown in the dialog body.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.block.put("text", markdown(text));
        self
    }

    /// Text of the button that confirms the action.
    pub fn confirm(mut self, confirm: impl Into<String>) -> Self {
        self.block.put("confirm", plain_text(confirm));
        self
    }

    /// Text of the button that cancels the action.
    pub fn deny(mut self, deny: impl Into<String>) -> Self {
        self.block.put("deny", plain_text(deny));
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.block.put("style", FieldValue::Str(style.as_str().to_string()));
        self
    }
}

impl<P: Attach> ConfirmationBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for ConfirmationBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for a button element.
pub struct ButtonBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl ButtonBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for ButtonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ButtonBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::Button),
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

    /// Identifier reported back in the interaction payload; unique among
    /// all action ids in the surface.
    pub fn action_id(mut self, action_id: impl Into<String>) -> Self {
        self.block.put("action_id", FieldValue::Str(action_id.into()));
        self
    }

    /// URL opened in the user's browser when the button is clicked.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.block.put("url", FieldValue::Str(url.into()));
        self
    }

    /// Value sent along with the interaction payload.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.block.put("value", FieldValue::Str(value.into()));
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.block.put("style", FieldValue::Str(style.as_str().to_string()));
        self
    }

    /// Open a child builder for the optional confirmation dialog.
    pub fn confirm(self) -> ConfirmationBuilder<Self> {
        ConfirmationBuilder::nested(self, Slot::Set("confirm"))
    }
}

impl<P: Attach> ButtonBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for ButtonBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for a single selectable option.
pub struct OptionBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl OptionBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for OptionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> OptionBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::SelectOption),
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

    /// Value passed back when this option is chosen.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.block.put("value", FieldValue::Str(value.into()));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.block.put("description", plain_text(description));
        self
    }

    /// URL opened when the option is clicked; overflow menus only.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.block.put("url", FieldValue::Str(url.into()));
        self
    }
}

impl<P: Attach> OptionBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for OptionBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for a labelled group of options.
pub struct OptionGroupBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl OptionGroupBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for OptionGroupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> OptionGroupBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::OptionGroup),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.block.put("label", plain_text(label));
        self
    }

    /// Append an option to the group and open its builder.
    pub fn option(self) -> OptionBuilder<Self> {
        OptionBuilder::nested(self, Slot::Push("options"))
    }
}

impl<P: Attach> OptionGroupBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for OptionGroupBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for a single-select menu.
pub struct StaticSelectBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl StaticSelectBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for StaticSelectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> StaticSelectBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::StaticSelect),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.block.put("placeholder", plain_text(placeholder));
        self
    }

    pub fn action_id(mut self, action_id: impl Into<String>) -> Self {
        self.block.put("action_id", FieldValue::Str(action_id.into()));
        self
    }

    /// Append an option and open its builder. Mutually exclusive with
    /// option groups.
    pub fn option(self) -> OptionBuilder<Self> {
        OptionBuilder::nested(self, Slot::Push("options"))
    }

    /// Append an option group and open its builder. Mutually exclusive
    /// with flat options.
    pub fn option_group(self) -> OptionGroupBuilder<Self> {
        OptionGroupBuilder::nested(self, Slot::Push("option_groups"))
    }

    /// Preselect the declared option whose text or value matches
    /// `needle`. A needle that matches no declared option leaves the
    /// field unset.
    pub fn initial_option(mut self, needle: &str) -> Self {
        if let Some(option) = self.block.find_option(needle).cloned() {
            self.block.put("initial_option", FieldValue::Block(Box::new(option)));
        }
        self
    }

    /// Open a child builder for the optional confirmation dialog.
    pub fn confirm(self) -> ConfirmationBuilder<Self> {
        ConfirmationBuilder::nested(self, Slot::Set("confirm"))
    }
}

impl<P: Attach> StaticSelectBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for StaticSelectBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for a multi-select menu. Shares the single-select contract
/// and adds the selection ceiling.
pub struct MultiStaticSelectBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl MultiStaticSelectBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for MultiStaticSelectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> MultiStaticSelectBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::MultiStaticSelect),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.block.put("placeholder", plain_text(placeholder));
        self
    }

    pub fn action_id(mut self, action_id: impl Into<String>) -> Self {
        self.block.put("action_id", FieldValue::Str(action_id.into()));
        self
    }

    pub fn option(self) -> OptionBuilder<Self> {
        OptionBuilder::nested(self, Slot::Push("options"))
    }

    pub fn option_group(self) -> OptionGroupBuilder<Self> {
        OptionGroupBuilder::nested(self, Slot::Push("option_groups"))
    }

    /// Preselect the declared option whose text or value matches
    /// `needle`. A needle that matches no declared option leaves the
    /// field unset.
    pub fn initial_option(mut self, needle: &str) -> Self {
        if let Some(option) = self.block.find_option(needle).cloned() {
            self.block.put("initial_option", FieldValue::Block(Box::new(option)));
        }
        self
    }

    /// Maximum number of selectable items; at least one.
    pub fn max_selected_items(mut self, max: i64) -> Self {
        self.block.put("max_selected_items", FieldValue::Int(max));
        self
    }

    pub fn confirm(self) -> ConfirmationBuilder<Self> {
        ConfirmationBuilder::nested(self, Slot::Set("confirm"))
    }
}

impl<P: Attach> MultiStaticSelectBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for MultiStaticSelectBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for an overflow menu.
pub struct OverflowBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl OverflowBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for OverflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> OverflowBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::Overflow),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    pub fn action_id(mut self, action_id: impl Into<String>) -> Self {
        self.block.put("action_id", FieldValue::Str(action_id.into()));
        self
    }

    /// Append an option and open its builder. An overflow holds between
    /// two and five options.
    pub fn option(self) -> OptionBuilder<Self> {
        OptionBuilder::nested(self, Slot::Push("options"))
    }

    pub fn confirm(self) -> ConfirmationBuilder<Self> {
        ConfirmationBuilder::nested(self, Slot::Set("confirm"))
    }
}

impl<P: Attach> OverflowBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for OverflowBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

/// Builder for a freeform text input element.
pub struct PlainTextInputBuilder<P = Root> {
    block: Block,
    parent: P,
    slot: Slot,
}

impl PlainTextInputBuilder {
    pub fn new() -> Self {
        Self::nested(Root, Slot::Detached)
    }
}

impl Default for PlainTextInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> PlainTextInputBuilder<P> {
    pub(crate) fn nested(parent: P, slot: Slot) -> Self {
        Self {
            block: Block::new(BlockKind::PlainTextInput),
            parent,
            slot,
        }
    }

    pub fn build(self) -> Block {
        self.block
    }

    pub fn action_id(mut self, action_id: impl Into<String>) -> Self {
        self.block.put("action_id", FieldValue::Str(action_id.into()));
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.block.put("placeholder", plain_text(placeholder));
        self
    }

    /// Value prefilled when the input loads.
    pub fn initial_value(mut self, value: impl Into<String>) -> Self {
        self.block.put("initial_value", FieldValue::Str(value.into()));
        self
    }

    /// Render as a larger textarea instead of a single line.
    pub fn multiline(mut self, multiline: bool) -> Self {
        self.block.put("multiline", FieldValue::Bool(multiline));
        self
    }

    pub fn min_length(mut self, min_length: i64) -> Self {
        self.block.put("min_length", FieldValue::Int(min_length));
        self
    }

    pub fn max_length(mut self, max_length: i64) -> Self {
        self.block.put("max_length", FieldValue::Int(max_length));
        self
    }
}

impl<P: Attach> PlainTextInputBuilder<P> {
    pub fn up(self) -> P {
        let Self { block, mut parent, slot } = self;
        parent.attach(slot, FieldValue::Block(Box::new(block)));
        parent
    }
}

impl<P> Attach for PlainTextInputBuilder<P> {
    fn attach(&mut self, slot: Slot, value: FieldValue) {
        attach_into(&mut self.block, slot, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_button_with_confirmation_dialog() {
        let button = ButtonBuilder::new()
            .text("Delete")
            .action_id("del")
            .style(Style::Danger)
            .confirm()
            .title("Are you sure?")
            .text("This cannot be undone")
            .confirm("Yes")
            .deny("No")
            .up()
            .build();

        let tree = button.serialize().unwrap();
        assert_eq!(tree["style"], "danger");
        assert_eq!(
            tree["confirm"]["confirm"],
            json!({"type": "plain_text", "text": "Yes", "emoji": false})
        );
    }

    #[test]
    fn test_select_with_option_groups() {
        let select = StaticSelectBuilder::new()
            .placeholder("Pick one")
            .action_id("a1")
            .option_group()
            .label("Fruits")
            .option()
            .text("Apple")
            .value("apple")
            .up()
            .option()
            .text("Pear")
            .value("pear")
            .up()
            .up()
            .build();

        let tree = select.serialize().unwrap();
        let groups = tree["option_groups"].as_array().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0]["options"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_initial_option_clones_a_declared_option() {
        let select = StaticSelectBuilder::new()
            .placeholder("Pick one")
            .action_id("a1")
            .option()
            .text("Apple")
            .value("apple")
            .up()
            .initial_option("apple")
            .build();

        let initial = select
            .get("initial_option")
            .and_then(FieldValue::as_block)
            .unwrap();
        assert_eq!(initial.get("value").and_then(FieldValue::as_str), Some("apple"));
    }

    #[test]
    fn test_initial_option_miss_leaves_field_unset() {
        let select = StaticSelectBuilder::new()
            .placeholder("Pick one")
            .action_id("a1")
            .option()
            .text("Apple")
            .value("apple")
            .up()
            .initial_option("banana")
            .build();
        assert!(select.get("initial_option").is_none());
    }

    #[test]
    fn test_plain_text_input_scalars() {
        let input = PlainTextInputBuilder::new()
            .action_id("a1")
            .placeholder("Type here")
            .multiline(true)
            .min_length(2)
            .max_length(80)
            .build();

        let tree = input.serialize().unwrap();
        assert_eq!(tree["multiline"], json!(true));
        assert_eq!(tree["min_length"], json!(2));
        assert_eq!(tree["max_length"], json!(80));
    }
}
