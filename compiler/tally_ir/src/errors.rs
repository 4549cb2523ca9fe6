//! Errors reported while declaring kinds and constructing nodes.
//!
//! Both are programming errors surfaced at definition/construction time, so
//! that a tree which exists can always be walked.

use crate::{NodeId, Shape};

/// Error declaring a kind in a `KindTable`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum KindError {
    #[error("kind names must not be empty")]
    EmptyName,

    #[error("kind `{name}` is already defined")]
    Duplicate { name: String },

    #[error("kind `{name}` extends an unknown parent ({parent:?})")]
    UnknownParent { name: String, parent: crate::KindId },

    #[error("kind `{name}` has no parent and declares no shape")]
    MissingShape { name: String },

    #[error("kind `{name}` declares shape {found} but its parent `{parent}` has shape {expected}")]
    ShapeMismatch {
        name: String,
        parent: String,
        expected: Shape,
        found: Shape,
    },

    #[error("kind `{name}` declares a literal check but is not a literal kind")]
    CheckOnNonLiteral { name: String },

    #[error("kind table is full")]
    Exhausted,
}

/// Error constructing a node in an `ExprTree`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConstructError {
    #[error("kind {0:?} is not defined in this tree's kind table")]
    UnknownKind(crate::KindId),

    #[error("kind `{kind}` is abstract and cannot be constructed")]
    AbstractKind { kind: String },

    #[error("`{kind}` expects {expected} children, found {found}")]
    Arity {
        kind: String,
        expected: usize,
        found: usize,
    },

    #[error("`{kind}` is a literal kind and takes a value, not children")]
    LiteralRequired { kind: String },

    #[error("`{kind}` takes children, not a literal value")]
    UnexpectedLiteral { kind: String },

    #[error("`{kind}` rejects literal {value}: {message}")]
    Rejected {
        kind: String,
        value: i64,
        message: &'static str,
    },

    #[error("child {0:?} does not exist in this tree")]
    UnknownChild(NodeId),

    #[error("child {0:?} is already owned by another node")]
    ChildAlreadyOwned(NodeId),

    #[error("child {0:?} appears more than once")]
    DuplicateChild(NodeId),

    #[error("expression tree is full")]
    Exhausted,
}
