//! Block schema registry.
//!
//! One declaration function per block kind, collected and resolved once
//! inside a process-wide lazy static. Resolution flattens a schema's base
//! contract and its own fields into the ordered full field list that
//! drives serialization (discriminator first, base fields in declared
//! order, derived fields last), and precomputes the required-field set.
//! The resolved registry is read-only after construction; recomputation
//! would be deterministic, so concurrent first-use is benign.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use chatblocks_types::kind::BlockKind;
use chatblocks_types::schema::{BlockSchema, FieldSpec, FieldType};

/// Block kinds a section accessory may hold.
const SECTION_ACCESSORIES: &[BlockKind] = &[
    BlockKind::Button,
    BlockKind::Image,
    BlockKind::Overflow,
    BlockKind::PlainTextInput,
    BlockKind::StaticSelect,
    BlockKind::MultiStaticSelect,
];

/// Block kinds an actions block may hold.
const ACTION_ELEMENTS: &[BlockKind] = &[
    BlockKind::Button,
    BlockKind::StaticSelect,
    BlockKind::Overflow,
];

/// Block kinds a context block may hold.
const CONTEXT_ELEMENTS: &[BlockKind] = &[BlockKind::Image, BlockKind::Markdown];

/// Block kinds an input block's element may be.
const INPUT_ELEMENTS: &[BlockKind] = &[
    BlockKind::PlainTextInput,
    BlockKind::StaticSelect,
    BlockKind::MultiStaticSelect,
];

const PLAIN_TEXT_ONLY: &[BlockKind] = &[BlockKind::PlainText];
const MARKDOWN_ONLY: &[BlockKind] = &[BlockKind::Markdown];
const OPTIONS_ONLY: &[BlockKind] = &[BlockKind::SelectOption];
const OPTION_GROUPS_ONLY: &[BlockKind] = &[BlockKind::OptionGroup];
const CONFIRM_ONLY: &[BlockKind] = &[BlockKind::Confirmation];

/// Any block kind is accepted.
const ANY_BLOCK: &[BlockKind] = &[];

/// A schema resolved for use by the engines.
#[derive(Debug)]
pub struct ResolvedSchema {
    pub kind: BlockKind,
    pub discriminator: Option<&'static str>,
    /// Ordered full field list: base contract first, derived fields last.
    pub fields: Vec<FieldSpec>,
    /// Names of the required fields, in field order.
    pub required: Vec<&'static str>,
    pub exclusive: Option<(&'static str, &'static str)>,
}

impl ResolvedSchema {
    fn from_declared(schema: BlockSchema) -> Self {
        let mut fields = schema.base;
        fields.extend(schema.fields);
        let required = fields
            .iter()
            .filter(|spec| spec.is_required())
            .map(|spec| spec.name)
            .collect();
        Self {
            kind: schema.kind,
            discriminator: schema.discriminator,
            fields,
            required,
            exclusive: schema.exclusive,
        }
    }

    /// Look up the declared spec for a field name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// The resolved schemas for every block kind, plus the two resolution
/// indexes: discriminator value to kind, and the declared-order candidate
/// list for structural resolution of the undiscriminated kinds.
pub struct Registry {
    schemas: HashMap<BlockKind, ResolvedSchema>,
    by_discriminator: HashMap<&'static str, BlockKind>,
    structural: Vec<BlockKind>,
}

impl Registry {
    fn build() -> Self {
        let declared = vec![
            plain_text_schema(),
            markdown_schema(),
            header_schema(),
            image_schema(),
            confirmation_schema(),
            select_option_schema(),
            option_group_schema(),
            button_schema(),
            static_select_schema(),
            multi_static_select_schema(),
            overflow_schema(),
            plain_text_input_schema(),
            section_schema(),
            divider_schema(),
            actions_schema(),
            context_schema(),
            input_schema(),
            modal_schema(),
            home_schema(),
        ];

        let mut schemas = HashMap::new();
        let mut by_discriminator = HashMap::new();
        let mut structural = Vec::new();

        for schema in declared {
            match schema.discriminator {
                Some(disc) => {
                    by_discriminator.insert(disc, schema.kind);
                }
                None => structural.push(schema.kind),
            }
            schemas.insert(schema.kind, ResolvedSchema::from_declared(schema));
        }

        Self {
            schemas,
            by_discriminator,
            structural,
        }
    }

    /// The resolved schema for a kind. Every kind is registered at
    /// construction, so this lookup always succeeds.
    pub fn schema(&self, kind: BlockKind) -> &ResolvedSchema {
        self.schemas
            .get(&kind)
            .expect("every block kind is registered")
    }

    /// Tier-one resolution: discriminator value to kind.
    pub fn by_discriminator(&self, discriminator: &str) -> Option<BlockKind> {
        self.by_discriminator.get(discriminator).copied()
    }

    /// Tier-two candidates: the undiscriminated kinds, in declaration
    /// order. Structural resolution tests them in this order and the
    /// first match wins.
    pub fn structural_candidates(&self) -> &[BlockKind] {
        &self.structural
    }
}

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::build);

/// The process-wide schema registry.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

fn text(max_len: usize) -> FieldType {
    FieldType::Str {
        max_len: Some(max_len),
    }
}

fn free_text() -> FieldType {
    FieldType::Str { max_len: None }
}

fn flag() -> FieldType {
    FieldType::Bool { default: None }
}

fn nested(allowed: &'static [BlockKind]) -> FieldType {
    FieldType::Block {
        allowed,
        text_limit: None,
    }
}

fn nested_text(allowed: &'static [BlockKind], text_limit: usize) -> FieldType {
    FieldType::Block {
        allowed,
        text_limit: Some(text_limit),
    }
}

fn items(allowed: &'static [BlockKind], max: usize) -> FieldType {
    FieldType::BlockList {
        allowed,
        min: None,
        max: Some(max),
        text_limit: None,
    }
}

fn plain_text_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::PlainText,
        Some("plain_text"),
        vec![
            FieldSpec::required("text", free_text()),
            FieldSpec::optional("emoji", FieldType::Bool { default: Some(false) }),
        ],
    )
}

fn markdown_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::Markdown,
        Some("mrkdwn"),
        vec![
            FieldSpec::required("text", free_text()),
            FieldSpec::optional("verbatim", FieldType::Bool { default: Some(false) }),
        ],
    )
}

fn header_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::Header,
        Some("header"),
        vec![
            FieldSpec::required("text", nested_text(PLAIN_TEXT_ONLY, 3000)),
            FieldSpec::optional("block_id", text(255)),
        ],
    )
}

fn image_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::Image,
        Some("image"),
        vec![
            FieldSpec::required("image_url", free_text()),
            FieldSpec::required("alt_text", free_text()),
        ],
    )
}

fn confirmation_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::Confirmation,
        None,
        vec![
            FieldSpec::required("title", nested_text(PLAIN_TEXT_ONLY, 100)),
            FieldSpec::required("text", nested_text(MARKDOWN_ONLY, 300)),
            FieldSpec::required("confirm", nested_text(PLAIN_TEXT_ONLY, 30)),
            FieldSpec::required("deny", nested_text(PLAIN_TEXT_ONLY, 30)),
            FieldSpec::optional("style", free_text()),
        ],
    )
}

fn select_option_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::SelectOption,
        None,
        vec![
            FieldSpec::required("text", nested_text(PLAIN_TEXT_ONLY, 75)),
            FieldSpec::required("value", text(75)),
            FieldSpec::optional("description", nested_text(PLAIN_TEXT_ONLY, 75)),
            FieldSpec::optional("url", text(3000)),
        ],
    )
}

fn option_group_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::OptionGroup,
        None,
        vec![
            FieldSpec::required("label", nested_text(PLAIN_TEXT_ONLY, 75)),
            FieldSpec::required("options", items(OPTIONS_ONLY, 100)),
        ],
    )
}

fn button_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::Button,
        Some("button"),
        vec![
            FieldSpec::required("text", nested_text(PLAIN_TEXT_ONLY, 75)),
            FieldSpec::required("action_id", text(255)),
            FieldSpec::optional("url", text(3000)),
            FieldSpec::optional("value", text(2000)),
            FieldSpec::optional("style", free_text()),
            FieldSpec::optional("confirm", nested(CONFIRM_ONLY)),
        ],
    )
}

/// The single-select contract, shared with the multi-select kind.
fn select_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::required("placeholder", nested_text(PLAIN_TEXT_ONLY, 150)),
        FieldSpec::required("action_id", text(255)),
        FieldSpec::optional("options", items(OPTIONS_ONLY, 100)),
        FieldSpec::optional("option_groups", items(OPTION_GROUPS_ONLY, 100)),
        FieldSpec::optional("initial_option", nested(OPTIONS_ONLY)),
        FieldSpec::optional("confirm", nested(CONFIRM_ONLY)),
    ]
}

fn static_select_schema() -> BlockSchema {
    BlockSchema::new(BlockKind::StaticSelect, Some("static_select"), select_fields())
        .with_exclusive("options", "option_groups")
}

fn multi_static_select_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::MultiStaticSelect,
        Some("multi_static_select"),
        vec![FieldSpec::optional(
            "max_selected_items",
            FieldType::Int { min: Some(1), max: None },
        )],
    )
    .with_base(select_fields())
    .with_exclusive("options", "option_groups")
}

fn overflow_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::Overflow,
        Some("overflow"),
        vec![
            FieldSpec::required("action_id", text(255)),
            FieldSpec::required(
                "options",
                FieldType::BlockList {
                    allowed: OPTIONS_ONLY,
                    min: Some(2),
                    max: Some(5),
                    text_limit: None,
                },
            ),
            FieldSpec::optional("confirm", nested(CONFIRM_ONLY)),
        ],
    )
}

fn plain_text_input_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::PlainTextInput,
        Some("plain_text_input"),
        vec![
            FieldSpec::required("action_id", text(255)),
            FieldSpec::optional("placeholder", nested_text(PLAIN_TEXT_ONLY, 150)),
            FieldSpec::optional("initial_value", free_text()),
            FieldSpec::optional("multiline", flag()),
            FieldSpec::optional(
                "min_length",
                FieldType::Int { min: Some(0), max: Some(3000) },
            ),
            FieldSpec::optional("max_length", FieldType::Int { min: None, max: None }),
        ],
    )
}

fn section_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::Section,
        Some("section"),
        vec![
            FieldSpec::optional("text", nested_text(MARKDOWN_ONLY, 3000)),
            FieldSpec::optional("block_id", text(255)),
            FieldSpec::optional(
                "fields",
                FieldType::BlockList {
                    allowed: MARKDOWN_ONLY,
                    min: None,
                    max: Some(10),
                    text_limit: Some(2000),
                },
            ),
            FieldSpec::optional("accessory", nested(SECTION_ACCESSORIES)),
        ],
    )
    .with_exclusive("text", "fields")
}

fn divider_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::Divider,
        Some("divider"),
        vec![FieldSpec::optional("block_id", text(255))],
    )
}

fn actions_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::Actions,
        Some("actions"),
        vec![
            FieldSpec::required("elements", items(ACTION_ELEMENTS, 5)),
            FieldSpec::optional("block_id", text(255)),
        ],
    )
}

fn context_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::Context,
        Some("context"),
        vec![
            FieldSpec::required("elements", items(CONTEXT_ELEMENTS, 5)),
            FieldSpec::optional("block_id", text(255)),
        ],
    )
}

fn input_schema() -> BlockSchema {
    BlockSchema::new(
        BlockKind::Input,
        Some("input"),
        vec![
            FieldSpec::required("label", nested_text(PLAIN_TEXT_ONLY, 2000)),
            FieldSpec::required("element", nested(INPUT_ELEMENTS)),
            FieldSpec::optional("block_id", text(255)),
            FieldSpec::optional("hint", nested_text(PLAIN_TEXT_ONLY, 2000)),
            FieldSpec::optional("optional", flag()),
        ],
    )
}

/// The view contract, shared by the modal and home surfaces.
fn view_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::required("blocks", items(ANY_BLOCK, 100)),
        FieldSpec::optional("callback_id", text(255)),
        FieldSpec::optional("clear_on_close", flag()),
        FieldSpec::optional("close", nested_text(PLAIN_TEXT_ONLY, 24)),
        FieldSpec::optional("external_id", free_text()),
        FieldSpec::optional("notify_on_close", flag()),
        FieldSpec::optional("private_metadata", text(3000)),
        FieldSpec::optional("submit", nested_text(PLAIN_TEXT_ONLY, 24)),
        FieldSpec::required("title", nested_text(PLAIN_TEXT_ONLY, 24)),
    ]
}

fn modal_schema() -> BlockSchema {
    // Platform-assigned identifiers, present when a delivered modal is
    // reconstructed from an interaction payload.
    BlockSchema::new(
        BlockKind::Modal,
        Some("modal"),
        vec![
            FieldSpec::optional("id", free_text()),
            FieldSpec::optional("team_id", free_text()),
            FieldSpec::optional("state", FieldType::Raw),
            FieldSpec::optional("hash", free_text()),
            FieldSpec::optional("previous_view_id", free_text()),
            FieldSpec::optional("root_view_id", free_text()),
            FieldSpec::optional("app_id", free_text()),
            FieldSpec::optional("app_installed_team_id", free_text()),
            FieldSpec::optional("bot_id", free_text()),
        ],
    )
    .with_base(view_fields())
}

fn home_schema() -> BlockSchema {
    BlockSchema::new(BlockKind::Home, Some("home"), Vec::new()).with_base(view_fields())
}
