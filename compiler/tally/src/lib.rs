//! Tally - evaluate and render expression trees through open dispatch.
//!
//! Nodes carry a kind and data, never behavior. Each behavior is a registry
//! from kinds to handlers; a kind without a handler borrows its nearest
//! ancestor's. New kinds and new handlers are added from outside, without
//! touching anything that already exists.
//!
//! # Example
//!
//! ```text
//! let session = Session::new();
//! let mut tree = session.tree();
//! let three = tree.integer(3)?;
//! let five = tree.integer(5)?;
//! let sum = tree.add(three, five)?;
//! assert_eq!(session.evaluate(&tree, sum)?, 8);
//! assert_eq!(session.render(&tree, sum)?, "(3 + 5)");
//! ```
//!
//! # Crates
//!
//! - `tally_ir`: kinds and arena trees
//! - `tally_dispatch`: registries and the recursive walker
//! - `tally_eval`: the `"evaluate"` behavior
//! - `tally_fmt`: the `"render"` behavior

mod session;
mod tracing_setup;

pub use session::Session;
pub use tracing_setup::init_tracing;

pub use tally_dispatch::{
    handler, DispatchError, FrozenRegistry, Handler, LockedRegistry, Registry, Resolved,
    WalkConfig, WalkError, WalkResult, Walker,
};
pub use tally_eval::{Evaluator, Number};
pub use tally_fmt::Renderer;
pub use tally_ir::{
    ConstructError, ExprTree, KindError, KindId, KindSpec, KindTable, LiteralCheck, NodeId,
    NodeRef, Shape,
};
