//! Tally Dispatch - open, type-directed dispatch over expression trees.
//!
//! A behavior (evaluate, render, ...) is a `Registry` mapping node kinds to
//! handlers. Nodes never carry behavior themselves, so adding a kind or a
//! behavior never touches existing code.
//!
//! # Architecture
//!
//! - `Registry<H>`: kind → handler table for one behavior, with ancestor-chain
//!   fallback (`resolve`)
//! - `Walker<T>`: the recursive callback passed to handlers; resolves and
//!   invokes a handler for every node it visits
//! - `FrozenRegistry` / `LockedRegistry`: wrappers for sharing a registry
//!   across threads
//! - `WalkConfig`: per-walk limits
//!
//! # Example
//!
//! ```text
//! let mut count: Registry<Handler<usize>> = Registry::new("count");
//! count.register(KindId::INTEGER, handler(|_, _| Ok(1)));
//! count.register(KindId::OPERATION, handler(|node, walker| {
//!     Ok(1 + walker.walk_child(node, 0)? + walker.walk_child(node, 1)?)
//! }));
//! let total = Walker::new(&tree, &count).walk(root)?;
//! ```

mod config;
mod errors;
mod registry;
mod shared;
mod stack;
mod walker;

pub use config::WalkConfig;
pub use errors::{DispatchError, WalkError, WalkResult};
pub use registry::{Registry, Resolved};
pub use shared::{FrozenRegistry, LockedRegistry};
pub use stack::ensure_sufficient_stack;
pub use walker::{handler, Handler, Walker};
