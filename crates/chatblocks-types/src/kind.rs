use std::fmt;

/// The concrete kind of a block.
///
/// Discriminated kinds carry a `type` field in their serialized form;
/// the three value-object kinds (`Confirmation`, `SelectOption`,
/// `OptionGroup`) do not and are recognized structurally instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    PlainText,
    Markdown,
    Header,
    Image,
    Confirmation,
    SelectOption,
    OptionGroup,
    Button,
    StaticSelect,
    MultiStaticSelect,
    Overflow,
    PlainTextInput,
    Section,
    Divider,
    Actions,
    Context,
    Input,
    Modal,
    Home,
}

impl BlockKind {
    /// Wire-level name of the kind. For discriminated kinds this is the
    /// discriminator value; for value objects it is a descriptive name
    /// used in error messages only.
    pub fn name(self) -> &'static str {
        match self {
            Self::PlainText => "plain_text",
            Self::Markdown => "mrkdwn",
            Self::Header => "header",
            Self::Image => "image",
            Self::Confirmation => "confirmation",
            Self::SelectOption => "option",
            Self::OptionGroup => "option_group",
            Self::Button => "button",
            Self::StaticSelect => "static_select",
            Self::MultiStaticSelect => "multi_static_select",
            Self::Overflow => "overflow",
            Self::PlainTextInput => "plain_text_input",
            Self::Section => "section",
            Self::Divider => "divider",
            Self::Actions => "actions",
            Self::Context => "context",
            Self::Input => "input",
            Self::Modal => "modal",
            Self::Home => "home",
        }
    }

    /// Whether this kind is the form-input block that triggers the view
    /// submit rule.
    pub fn is_input(self) -> bool {
        matches!(self, Self::Input)
    }

    /// Whether this kind is a view (a top-level surface wrapping a block
    /// list).
    pub fn is_view(self) -> bool {
        matches!(self, Self::Modal | Self::Home)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(BlockKind::PlainText.to_string(), "plain_text");
        assert_eq!(BlockKind::MultiStaticSelect.to_string(), "multi_static_select");
        assert_eq!(BlockKind::SelectOption.to_string(), "option");
    }

    #[test]
    fn test_input_detection() {
        assert!(BlockKind::Input.is_input());
        assert!(!BlockKind::Section.is_input());
    }

    #[test]
    fn test_view_detection() {
        assert!(BlockKind::Modal.is_view());
        assert!(BlockKind::Home.is_view());
        assert!(!BlockKind::Header.is_view());
    }
}
