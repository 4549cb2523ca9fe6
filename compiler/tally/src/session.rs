//! One kind table plus both built-in behaviors.

use tally_dispatch::{WalkConfig, WalkResult};
use tally_eval::{Evaluator, Number};
use tally_fmt::Renderer;
use tally_ir::{ExprTree, KindError, KindId, KindSpec, KindTable, NodeId};

/// Kinds and behaviors that belong together.
///
/// Trees borrow the session's kind table, so define kinds and register
/// handlers first, then build trees and run behaviors.
#[derive(Debug, Default)]
pub struct Session {
    kinds: KindTable,
    evaluator: Evaluator,
    renderer: Renderer,
}

impl Session {
    /// Built-in kinds with the built-in evaluation and rendering handlers.
    pub fn new() -> Self {
        Session {
            kinds: KindTable::new(),
            evaluator: Evaluator::new(),
            renderer: Renderer::new(),
        }
    }

    /// Apply `config` to every behavior of this session.
    #[must_use]
    pub fn with_config(mut self, config: WalkConfig) -> Self {
        self.evaluator = self.evaluator.with_config(config);
        self.renderer = self.renderer.with_config(config);
        self
    }

    pub fn define(&mut self, spec: KindSpec) -> Result<KindId, KindError> {
        self.kinds.define(spec)
    }

    pub fn kinds(&self) -> &KindTable {
        &self.kinds
    }

    /// An empty tree over this session's kinds.
    pub fn tree(&self) -> ExprTree<'_> {
        ExprTree::new(&self.kinds)
    }

    pub fn evaluate(&self, tree: &ExprTree<'_>, root: NodeId) -> WalkResult<Number> {
        self.evaluator.evaluate(tree, root)
    }

    pub fn render(&self, tree: &ExprTree<'_>, root: NodeId) -> WalkResult<String> {
        self.renderer.render(tree, root)
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn evaluator_mut(&mut self) -> &mut Evaluator {
        &mut self.evaluator
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }
}
