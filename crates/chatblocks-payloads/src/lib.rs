//! Inbound interaction payload reader.
//!
//! The chat platform delivers an interaction payload -- a button click, a
//! view submission, a view close -- as a single tree in the same wire
//! format the block engine emits. This crate wraps an already-received
//! tree with typed read access: interaction kind, actor and trigger
//! accessors, submitted form state, and reconstruction of the embedded
//! blocks through `chatblocks-core`. Transport (HTTP delivery, request
//! signing) is out of scope; callers hand in the decoded tree.

pub mod error;
pub mod interaction;
pub mod metadata;
