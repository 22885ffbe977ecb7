//! Serialize-time validation.
//!
//! Check order: required fields, then the mutually-exclusive pair, then
//! per-field constraints (recursing into nested blocks), then the
//! kind-specific cross-field rules. Every serialize call runs this pass
//! first, so a block that validates is a block that serializes.

use chatblocks_types::error::ValidationError;
use chatblocks_types::kind::BlockKind;
use chatblocks_types::schema::{FieldSpec, FieldType};

use crate::block::{Block, FieldValue};

/// Check a block, and every block nested under it, against the declared
/// contracts.
pub fn validate(block: &Block) -> Result<(), ValidationError> {
    let schema = block.schema();
    let kind = block.kind();

    for &field in &schema.required {
        if !block.contains(field) {
            return Err(ValidationError::MissingRequired { kind, field });
        }
    }

    if let Some((first, second)) = schema.exclusive {
        match (block.contains(first), block.contains(second)) {
            (true, true) => {
                return Err(ValidationError::ExclusiveBothSet { kind, first, second });
            }
            (false, false) => {
                return Err(ValidationError::ExclusiveNoneSet { kind, first, second });
            }
            _ => {}
        }
    }

    for spec in &schema.fields {
        if let Some(value) = block.get(spec.name) {
            check_field(kind, spec, value)?;
        }
    }

    kind_rules(block)
}

fn check_field(
    kind: BlockKind,
    spec: &FieldSpec,
    value: &FieldValue,
) -> Result<(), ValidationError> {
    // Shape mismatches cannot occur here: every write path checks the
    // value shape against the declared type at assignment time.
    match (&spec.ty, value) {
        (FieldType::Str { max_len }, FieldValue::Str(text)) => {
            check_text(kind, spec.name, text, *max_len)
        }
        (FieldType::Int { min, max }, FieldValue::Int(value)) => {
            if min.is_some_and(|min| *value < min) || max.is_some_and(|max| *value > max) {
                return Err(ValidationError::OutOfRange {
                    kind,
                    field: spec.name,
                    value: *value,
                });
            }
            Ok(())
        }
        (FieldType::Block { allowed, text_limit }, FieldValue::Block(nested)) => {
            check_element(kind, spec.name, allowed, *text_limit, nested)?;
            validate(nested)
        }
        (
            FieldType::BlockList { allowed, min, max, text_limit },
            FieldValue::List(elements),
        ) => {
            if let Some(max) = max
                && elements.len() > *max
            {
                return Err(ValidationError::TooManyItems {
                    kind,
                    field: spec.name,
                    max: *max,
                    len: elements.len(),
                });
            }
            if let Some(min) = min
                && elements.len() < *min
            {
                return Err(ValidationError::TooFewItems {
                    kind,
                    field: spec.name,
                    min: *min,
                    len: elements.len(),
                });
            }
            for element in elements {
                if let FieldValue::Block(nested) = element {
                    check_element(kind, spec.name, allowed, *text_limit, nested)?;
                    validate(nested)?;
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn check_text(
    kind: BlockKind,
    field: &'static str,
    text: &str,
    max_len: Option<usize>,
) -> Result<(), ValidationError> {
    if let Some(max) = max_len {
        let len = text.chars().count();
        if len > max {
            return Err(ValidationError::TextTooLong { kind, field, max, len });
        }
    }
    Ok(())
}

fn check_element(
    kind: BlockKind,
    field: &'static str,
    allowed: &[BlockKind],
    text_limit: Option<usize>,
    nested: &Block,
) -> Result<(), ValidationError> {
    if !allowed.is_empty() && !allowed.contains(&nested.kind()) {
        return Err(ValidationError::DisallowedElement {
            kind,
            field,
            found: nested.kind(),
        });
    }
    if let Some(limit) = text_limit
        && let Some(FieldValue::Str(text)) = nested.get("text")
    {
        check_text(kind, field, text, Some(limit))?;
    }
    Ok(())
}

/// Cross-field rules that a field contract alone cannot express.
fn kind_rules(block: &Block) -> Result<(), ValidationError> {
    if block.kind().is_view()
        && let Some(FieldValue::List(blocks)) = block.get("blocks")
    {
        let has_input = blocks
            .iter()
            .filter_map(FieldValue::as_block)
            .any(Block::is_input);
        if has_input && !block.contains("submit") {
            return Err(ValidationError::SubmitRequired { kind: block.kind() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{
        ActionsBuilder, ButtonBuilder, ContextBuilder, HeaderBuilder, InputBuilder,
        ModalBuilder, MultiStaticSelectBuilder, OverflowBuilder, SectionBuilder,
        StaticSelectBuilder,
    };

    #[test]
    fn test_missing_required_field_names_the_field() {
        let button = ButtonBuilder::new().action_id("a1").build();
        let err = validate(&button).unwrap_err();
        assert_eq!(err.to_string(), "missing required field `text` on button");
    }

    #[test]
    fn test_valid_button_passes() {
        let button = ButtonBuilder::new().text("Click").action_id("a1").build();
        assert!(validate(&button).is_ok());
    }

    #[test]
    fn test_exclusive_pair_requires_exactly_one() {
        // Neither.
        let section = SectionBuilder::new().block_id("b1").build();
        let err = validate(&section).unwrap_err();
        assert_eq!(
            err.to_string(),
            "exactly one of `text` or `fields` must be set on section"
        );

        // Both.
        let section = SectionBuilder::new().text("body").field("left").build();
        let err = validate(&section).unwrap_err();
        assert_eq!(
            err.to_string(),
            "fields `text` and `fields` on section are mutually exclusive"
        );

        // Exactly one.
        let section = SectionBuilder::new().text("body").build();
        assert!(validate(&section).is_ok());
    }

    #[test]
    fn test_select_exclusive_pair_applies_to_multi_select() {
        let select = MultiStaticSelectBuilder::new()
            .placeholder("Pick some")
            .action_id("a1")
            .build();
        let err = validate(&select).unwrap_err();
        assert_eq!(
            err.to_string(),
            "exactly one of `options` or `option_groups` must be set on multi_static_select"
        );
    }

    #[test]
    fn test_text_ceiling_on_nested_text_block() {
        let header = HeaderBuilder::new().text("h".repeat(3001)).build();
        let err = validate(&header).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TextTooLong { field: "text", max: 3000, .. }
        ));

        let header = HeaderBuilder::new().text("h".repeat(3000)).build();
        assert!(validate(&header).is_ok());
    }

    #[test]
    fn test_list_cardinality_ceiling() {
        let mut builder = ActionsBuilder::new();
        for i in 0..6 {
            builder = builder
                .button()
                .text("b")
                .action_id(format!("a{i}"))
                .up();
        }
        let err = validate(&builder.build()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooManyItems { field: "elements", max: 5, len: 6, .. }
        ));
    }

    #[test]
    fn test_overflow_needs_at_least_two_options() {
        let overflow = OverflowBuilder::new()
            .action_id("a1")
            .option()
            .text("only")
            .value("v1")
            .up()
            .build();
        let err = validate(&overflow).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooFewItems { field: "options", min: 2, len: 1, .. }
        ));
    }

    #[test]
    fn test_disallowed_element_kind_in_list() {
        // A context block only holds images and markdown text.
        let mut context = crate::block::Block::new(BlockKind::Context);
        let button = ButtonBuilder::new().text("b").action_id("a1").build();
        context
            .push_item("elements", FieldValue::Block(Box::new(button)));
        let err = validate(&context).unwrap_err();
        assert_eq!(
            err.to_string(),
            "field `elements` on context does not allow button blocks"
        );
    }

    #[test]
    fn test_context_accepts_its_element_kinds() {
        let context = ContextBuilder::new()
            .image()
            .image_url("https://example.com/a.png")
            .alt_text("an image")
            .up()
            .markdown()
            .text("caption")
            .up()
            .build();
        assert!(validate(&context).is_ok());
    }

    #[test]
    fn test_int_bounds() {
        let select = MultiStaticSelectBuilder::new()
            .placeholder("Pick some")
            .action_id("a1")
            .option()
            .text("one")
            .value("v1")
            .up()
            .max_selected_items(0)
            .build();
        let err = validate(&select).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange { field: "max_selected_items", value: 0, .. }
        ));
    }

    #[test]
    fn test_nested_blocks_are_validated_recursively() {
        // The select inside the input is missing its required options.
        let input = InputBuilder::new()
            .label("Choose")
            .select()
            .placeholder("Pick one")
            .action_id("a1")
            .up()
            .build();
        let err = validate(&input).unwrap_err();
        assert!(matches!(err, ValidationError::ExclusiveNoneSet { .. }));
    }

    #[test]
    fn test_view_with_input_block_requires_submit() {
        let modal = ModalBuilder::new()
            .title("Form")
            .blocks()
            .input()
            .label("Name")
            .plain_text_input()
            .action_id("a1")
            .up()
            .up()
            .up()
            .build();
        let err = validate(&modal).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`submit` is required on modal when its blocks contain an input block"
        );

        let modal = ModalBuilder::new()
            .title("Form")
            .submit("Send")
            .blocks()
            .input()
            .label("Name")
            .plain_text_input()
            .action_id("a1")
            .up()
            .up()
            .up()
            .build();
        assert!(validate(&modal).is_ok());
    }

    #[test]
    fn test_view_title_ceiling() {
        let modal = ModalBuilder::new()
            .title("t".repeat(25))
            .blocks()
            .divider()
            .up()
            .up()
            .build();
        let err = validate(&modal).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TextTooLong { field: "title", max: 24, .. }
        ));
    }

    #[test]
    fn test_section_fields_per_element_ceiling() {
        let section = SectionBuilder::new().field("f".repeat(2001)).build();
        let err = validate(&section).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TextTooLong { field: "fields", max: 2000, .. }
        ));
    }

    #[test]
    fn test_select_placeholder_ceiling() {
        let select = StaticSelectBuilder::new()
            .placeholder("p".repeat(151))
            .action_id("a1")
            .option()
            .text("one")
            .value("v1")
            .up()
            .build();
        let err = validate(&select).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TextTooLong { field: "placeholder", max: 150, .. }
        ));
    }
}
