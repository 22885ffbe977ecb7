use thiserror::Error;

use crate::kind::BlockKind;

/// Construction-time errors: the assignment itself is malformed.
///
/// These are fatal for the assignment that raised them -- an unknown
/// field name, a value whose shape does not match the declared field
/// type, or a nested block of a kind the field does not accept.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown field `{field}` on {kind}")]
    UnknownField { kind: BlockKind, field: String },

    #[error("field `{field}` on {kind} expects {expected}")]
    InvalidValue {
        kind: BlockKind,
        field: &'static str,
        expected: &'static str,
    },

    #[error("field `{field}` on {kind} does not accept {found} blocks")]
    DisallowedKind {
        kind: BlockKind,
        field: &'static str,
        found: BlockKind,
    },
}

/// Serialize-time errors, recoverable by the caller: the block's current
/// contents violate its declared contract.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required field `{field}` on {kind}")]
    MissingRequired { kind: BlockKind, field: &'static str },

    #[error("fields `{first}` and `{second}` on {kind} are mutually exclusive")]
    ExclusiveBothSet {
        kind: BlockKind,
        first: &'static str,
        second: &'static str,
    },

    #[error("exactly one of `{first}` or `{second}` must be set on {kind}")]
    ExclusiveNoneSet {
        kind: BlockKind,
        first: &'static str,
        second: &'static str,
    },

    #[error("field `{field}` on {kind} exceeds {max} characters (got {len})")]
    TextTooLong {
        kind: BlockKind,
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("field `{field}` on {kind} is out of range: {value}")]
    OutOfRange {
        kind: BlockKind,
        field: &'static str,
        value: i64,
    },

    #[error("field `{field}` on {kind} holds at most {max} items (got {len})")]
    TooManyItems {
        kind: BlockKind,
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("field `{field}` on {kind} needs at least {min} items (got {len})")]
    TooFewItems {
        kind: BlockKind,
        field: &'static str,
        min: usize,
        len: usize,
    },

    #[error("field `{field}` on {kind} does not allow {found} blocks")]
    DisallowedElement {
        kind: BlockKind,
        field: &'static str,
        found: BlockKind,
    },

    #[error("`submit` is required on {kind} when its blocks contain an input block")]
    SubmitRequired { kind: BlockKind },

    #[error("a block list holds at most {max} blocks (got {len})")]
    TooManyBlocks { max: usize, len: usize },
}

/// Errors from resolving a wire tree to a concrete block kind.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("unknown block type `{0}`")]
    UnknownDiscriminator(String),

    #[error("cannot resolve a block type for this shape")]
    NoMatch,
}

/// Errors from reconstructing a block (or block list) from wire data.
///
/// Resolution and schema errors are fatal for the reconstruction call
/// that raised them; nothing is retried.
#[derive(Debug, Error)]
pub enum ReconstructError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid wire text: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a tree of fields")]
    NotATree,

    #[error("expected a list of trees")]
    NotAList,
}
