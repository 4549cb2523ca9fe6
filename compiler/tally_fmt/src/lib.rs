//! Tally Fmt - text rendering of expression trees.
//!
//! `Renderer` owns the `"render"` registry. Literals render in decimal; every
//! binary operation renders fully parenthesized as `(<lhs> <symbol> <rhs>)`.
//! The operation handler is registered once on the abstract `Operation` kind
//! and reads the operator symbol from the kind table, so any kind extending
//! `Operation` with a symbol renders without a handler of its own.

mod infix;

use tally_dispatch::{handler, Handler, Registry, WalkConfig, WalkResult, Walker};
use tally_ir::{ExprTree, KindId, NodeId, NodeRef};

/// Name of the rendering behavior, as reported in `DispatchError`.
pub const BEHAVIOR: &str = "render";

/// The rendering behavior.
pub struct Renderer {
    registry: Registry<Handler<String>>,
    config: WalkConfig,
}

impl Renderer {
    /// Renderer with the built-in handlers registered.
    pub fn new() -> Self {
        let mut renderer = Self::empty();
        infix::register_builtins(&mut renderer.registry);
        renderer
    }

    /// Renderer with no handlers at all.
    pub fn empty() -> Self {
        Renderer {
            registry: Registry::new(BEHAVIOR),
            config: WalkConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: WalkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> WalkConfig {
        self.config
    }

    /// Install (or replace) the rendering handler for `kind`.
    pub fn register<F>(&mut self, kind: KindId, f: F) -> Option<Handler<String>>
    where
        F: Fn(NodeRef<'_>, &Walker<'_, String>) -> WalkResult<String> + Send + Sync + 'static,
    {
        self.registry.register(kind, handler(f))
    }

    pub fn registry(&self) -> &Registry<Handler<String>> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry<Handler<String>> {
        &mut self.registry
    }

    /// Render the subtree rooted at `root`.
    #[tracing::instrument(level = "debug", skip(self, tree), fields(nodes = tree.len()))]
    pub fn render(&self, tree: &ExprTree<'_>, root: NodeId) -> WalkResult<String> {
        Walker::new(tree, &self.registry)
            .with_config(self.config)
            .walk(root)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}
