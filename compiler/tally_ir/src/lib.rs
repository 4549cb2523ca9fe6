//! Tally IR - kinds and expression trees.
//!
//! This crate contains the node model shared by every behavior:
//! - `KindId` / `KindTable`: runtime kind identifiers and their single-parent
//!   hierarchy (the ancestor chains used for dispatch fallback)
//! - `NodeId` / `ExprTree`: an append-only arena of immutable nodes
//! - `NodeRef`: a borrowed view handed to behavior handlers
//!
//! # Design Philosophy
//!
//! - **Kinds are data**: a node does not know what can be done with it. Behaviors
//!   live in separate registries keyed by `KindId`.
//! - **Flatten everything**: children are `NodeId(u32)` indices into one arena,
//!   not boxed subtrees.
//! - **Check at construction**: arity, payload and ownership are validated when a
//!   node is allocated, so a tree that exists is always structurally walkable.

mod errors;
mod kind;
mod node_id;
mod tree;

pub use errors::{ConstructError, KindError};
pub use kind::{Ancestors, KindId, KindSpec, KindTable, LiteralCheck, Shape};
pub use node_id::{NodeId, NodeRange};
pub use tree::{ExprTree, NodeRef};
