//! Dispatch and walk errors.
//!
//! `DispatchError` is a programming-error signal: a kind reached a behavior
//! that has no handler for it or any of its ancestors. It is never replaced by
//! a default value. `WalkError` is everything a walk can report; handler
//! failures (such as arithmetic overflow) travel through it unchanged.

use tally_ir::{KindId, NodeId, NodeRef};

/// Result of walking a node with a behavior producing `T`.
pub type WalkResult<T> = Result<T, WalkError>;

/// No handler registered for a kind or any of its ancestors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no `{behavior}` handler for `{kind_name}` or any of its ancestors")]
pub struct DispatchError {
    pub behavior: &'static str,
    pub kind: KindId,
    pub kind_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WalkError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("integer overflow in {operation} at `{kind}`")]
    Overflow {
        operation: &'static str,
        kind: String,
    },

    #[error("walk exceeded the maximum depth of {limit}")]
    DepthLimit { limit: usize },

    #[error("node {0:?} does not exist in this tree")]
    UnknownNode(NodeId),

    #[error("`{kind}` handler failed: {message}")]
    Handler { kind: String, message: String },
}

impl WalkError {
    /// Arithmetic overflow while handling `node`.
    #[cold]
    pub fn overflow(operation: &'static str, node: NodeRef<'_>) -> Self {
        WalkError::Overflow {
            operation,
            kind: node.kind_name().to_string(),
        }
    }

    /// A handler rejecting `node` for its own reasons.
    #[cold]
    pub fn handler(node: NodeRef<'_>, message: impl Into<String>) -> Self {
        WalkError::Handler {
            kind: node.kind_name().to_string(),
            message: message.into(),
        }
    }

    /// A handler reached for a child the node does not have.
    #[cold]
    pub fn missing_child(node: NodeRef<'_>, index: usize) -> Self {
        Self::handler(
            node,
            format!("missing child {index} (node has {})", node.arity()),
        )
    }

    /// A literal handler reached a node without a payload.
    #[cold]
    pub fn missing_literal(node: NodeRef<'_>) -> Self {
        Self::handler(node, "node carries no literal value")
    }

    /// The dispatch failure, if this is one.
    pub fn as_dispatch(&self) -> Option<&DispatchError> {
        match self {
            WalkError::Dispatch(err) => Some(err),
            _ => None,
        }
    }
}
