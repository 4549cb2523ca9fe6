//! Tally Eval - integer evaluation of expression trees.
//!
//! `Evaluator` owns the `"evaluate"` registry. The built-ins cover `Integer`,
//! `Add` and `Multiply`; any other kind resolves through its ancestors or
//! fails with `DispatchError`. Evaluation is pure: every call walks the whole
//! tree again, one resolution and one handler call per node.
//!
//! Arithmetic is checked. Overflow is an error (`WalkError::Overflow`), not a
//! wrapped value.

mod operators;

use tally_dispatch::{handler, Handler, Registry, WalkConfig, WalkResult, Walker};
use tally_ir::{ExprTree, KindId, NodeId, NodeRef};

/// Result type of evaluation.
pub type Number = i64;

/// Name of the evaluation behavior, as reported in `DispatchError`.
pub const BEHAVIOR: &str = "evaluate";

/// The evaluation behavior.
pub struct Evaluator {
    registry: Registry<Handler<Number>>,
    config: WalkConfig,
}

impl Evaluator {
    /// Evaluator with the built-in handlers registered.
    pub fn new() -> Self {
        let mut evaluator = Self::empty();
        operators::register_builtins(&mut evaluator.registry);
        evaluator
    }

    /// Evaluator with no handlers at all.
    pub fn empty() -> Self {
        Evaluator {
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

    /// Install (or replace) the evaluation handler for `kind`.
    ///
    /// Subkinds of `kind` without a handler of their own pick it up.
    pub fn register<F>(&mut self, kind: KindId, f: F) -> Option<Handler<Number>>
    where
        F: Fn(NodeRef<'_>, &Walker<'_, Number>) -> WalkResult<Number> + Send + Sync + 'static,
    {
        self.registry.register(kind, handler(f))
    }

    pub fn registry(&self) -> &Registry<Handler<Number>> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry<Handler<Number>> {
        &mut self.registry
    }

    /// Evaluate the subtree rooted at `root`.
    #[tracing::instrument(level = "debug", skip(self, tree), fields(nodes = tree.len()))]
    pub fn evaluate(&self, tree: &ExprTree<'_>, root: NodeId) -> WalkResult<Number> {
        Walker::new(tree, &self.registry)
            .with_config(self.config)
            .walk(root)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests;
