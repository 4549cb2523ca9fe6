//! Recursive tree walking through a dispatch registry.
//!
//! The walker is the recursive callback: a handler receives the node and the
//! walker, and calls `walk`/`walk_child` to process children with the same
//! registry. Every visited node costs exactly one resolution and one handler
//! invocation; nothing is cached between visits or between walks.

use std::cell::Cell;
use std::fmt;

use tally_ir::{ExprTree, KindTable, NodeId, NodeRef};

use crate::{ensure_sufficient_stack, Registry, WalkConfig, WalkError, WalkResult};

/// A behavior handler producing `T`.
///
/// Handlers only see shared references, so they cannot mutate the tree.
pub type Handler<T> = Box<dyn Fn(NodeRef<'_>, &Walker<'_, T>) -> WalkResult<T> + Send + Sync>;

/// Box a closure as a `Handler`.
///
/// Going through a generic bound lets closures infer the higher-ranked
/// signature without annotations.
pub fn handler<T, F>(f: F) -> Handler<T>
where
    F: Fn(NodeRef<'_>, &Walker<'_, T>) -> WalkResult<T> + Send + Sync + 'static,
{
    Box::new(f)
}

/// Walks one tree with one registry.
pub struct Walker<'a, T> {
    tree: &'a ExprTree<'a>,
    registry: &'a Registry<Handler<T>>,
    config: WalkConfig,
    depth: Cell<usize>,
}

impl<'a, T> Walker<'a, T> {
    pub fn new(tree: &'a ExprTree<'a>, registry: &'a Registry<Handler<T>>) -> Self {
        Walker {
            tree,
            registry,
            config: WalkConfig::default(),
            depth: Cell::new(0),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: WalkConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve a handler for `id`'s kind and invoke it.
    ///
    /// Dispatch failures and handler errors propagate unchanged.
    pub fn walk(&self, id: NodeId) -> WalkResult<T> {
        let node = self.tree.get(id).ok_or(WalkError::UnknownNode(id))?;

        let depth = self.depth.get() + 1;
        if let Some(limit) = self.config.max_depth {
            if depth > limit {
                return Err(WalkError::DepthLimit { limit });
            }
        }

        let resolved = self.registry.resolve(self.tree.kinds(), node.kind())?;
        tracing::trace!(
            behavior = self.registry.behavior(),
            ?id,
            kind = node.kind_name(),
            depth,
            "dispatch"
        );

        self.depth.set(depth);
        let result = ensure_sufficient_stack(|| (resolved.handler)(node, self));
        self.depth.set(depth - 1);
        result
    }

    /// Walk the `index`-th child of `node`.
    pub fn walk_child(&self, node: NodeRef<'_>, index: usize) -> WalkResult<T> {
        let child = node
            .child(index)
            .ok_or_else(|| WalkError::missing_child(node, index))?;
        self.walk(child)
    }

    /// Walk every child of `node`, in order.
    pub fn walk_children(&self, node: NodeRef<'_>) -> WalkResult<Vec<T>> {
        node.children().iter().map(|&child| self.walk(child)).collect()
    }

    /// Nesting depth of the node currently being handled (root is 1).
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    pub fn tree(&self) -> &'a ExprTree<'a> {
        self.tree
    }

    pub fn kinds(&self) -> &'a KindTable {
        self.tree.kinds()
    }

    pub fn behavior(&self) -> &'static str {
        self.registry.behavior()
    }
}

impl<T> fmt::Debug for Walker<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walker")
            .field("behavior", &self.registry.behavior())
            .field("config", &self.config)
            .field("depth", &self.depth.get())
            .finish_non_exhaustive()
    }
}
