//! Schema descriptor types.
//!
//! Each concrete block kind declares a [`BlockSchema`]: its discriminator
//! (if any), its field contract, and at most one mutually-exclusive field
//! pair. A schema may compose a shared base contract (the view contract,
//! the single-select contract); the registry in `chatblocks-core` resolves
//! the composition once into the ordered full field list that drives
//! serialization.

use crate::kind::BlockKind;

/// Whether a field must be present before a block serializes.
///
/// Fields that belong to a mutually-exclusive pair are declared
/// `Optional`; the pair itself is declared on the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// The declared type of a single field, with its serialize-time
/// constraints.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    /// UTF-8 text with an optional length ceiling, counted in characters.
    Str { max_len: Option<usize> },
    /// Integer with optional inclusive bounds.
    Int { min: Option<i64>, max: Option<i64> },
    /// Boolean. When `default` is set it is applied at construction, so
    /// the field serializes as present even when never assigned.
    Bool { default: Option<bool> },
    /// A nested block. An empty `allowed` slice accepts any kind;
    /// `text_limit` caps the nested block's own `text` field.
    Block {
        allowed: &'static [BlockKind],
        text_limit: Option<usize>,
    },
    /// An ordered list of nested blocks with cardinality bounds. An empty
    /// `allowed` slice accepts any kind; `text_limit` caps each element's
    /// own `text` field.
    BlockList {
        allowed: &'static [BlockKind],
        min: Option<usize>,
        max: Option<usize>,
        text_limit: Option<usize>,
    },
    /// An opaque subtree kept verbatim (platform-assigned payloads such
    /// as submitted view state).
    Raw,
}

impl FieldType {
    /// Short description of the expected value shape, used in schema
    /// error messages.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Str { .. } => "a string",
            Self::Int { .. } => "an integer",
            Self::Bool { .. } => "a boolean",
            Self::Block { .. } => "a block",
            Self::BlockList { .. } => "a list of blocks",
            Self::Raw => "a raw value",
        }
    }
}

/// One declared field of a block kind.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub presence: Presence,
}

impl FieldSpec {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            presence: Presence::Required,
        }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            presence: Presence::Optional,
        }
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

/// The declared contract for one concrete block kind.
///
/// `base` fields precede `fields` in the resolved serialization order;
/// the discriminator, when present, precedes both.
#[derive(Debug, Clone)]
pub struct BlockSchema {
    pub kind: BlockKind,
    pub discriminator: Option<&'static str>,
    pub base: Vec<FieldSpec>,
    pub fields: Vec<FieldSpec>,
    pub exclusive: Option<(&'static str, &'static str)>,
}

impl BlockSchema {
    /// A schema with no base contract and no exclusive pair.
    pub fn new(
        kind: BlockKind,
        discriminator: Option<&'static str>,
        fields: Vec<FieldSpec>,
    ) -> Self {
        Self {
            kind,
            discriminator,
            base: Vec::new(),
            fields,
            exclusive: None,
        }
    }

    pub fn with_base(mut self, base: Vec<FieldSpec>) -> Self {
        self.base = base;
        self
    }

    pub fn with_exclusive(mut self, first: &'static str, second: &'static str) -> Self {
        self.exclusive = Some((first, second));
        self
    }
}
