//! Per-behavior dispatch registry.
//!
//! Handlers are keyed by `KindId`. Resolution checks the exact kind first and
//! then walks the kind's ancestor chain in the `KindTable`, most specific
//! first, so a new subkind picks up every behavior its ancestors already have.
//! Chains are linear (a kind has at most one parent), which makes resolution
//! unambiguous and deterministic.

use std::fmt;

use rustc_hash::FxHashMap;
use tally_ir::{KindId, KindTable};

use crate::{DispatchError, FrozenRegistry};

/// Handler table for one behavior.
pub struct Registry<H> {
    behavior: &'static str,
    handlers: FxHashMap<KindId, H>,
}

/// A successful resolution.
#[derive(Debug)]
pub struct Resolved<'r, H> {
    pub handler: &'r H,
    /// Kind the handler is registered on: the queried kind or an ancestor.
    pub found_on: KindId,
    /// Steps up the ancestor chain; 0 for an exact match.
    pub distance: usize,
}

impl<H> Registry<H> {
    /// Create an empty registry for the named behavior.
    pub fn new(behavior: &'static str) -> Self {
        Registry {
            behavior,
            handlers: FxHashMap::default(),
        }
    }

    /// Behavior name, used in `DispatchError`.
    pub fn behavior(&self) -> &'static str {
        self.behavior
    }

    /// Insert or replace the handler for `kind`, returning the replaced one.
    ///
    /// Only `kind` itself is affected; subkinds without their own handler
    /// resolve to it through the ancestor chain.
    pub fn register(&mut self, kind: KindId, handler: H) -> Option<H> {
        let previous = self.handlers.insert(kind, handler);
        tracing::debug!(
            behavior = self.behavior,
            ?kind,
            replaced = previous.is_some(),
            "handler registered"
        );
        previous
    }

    /// Remove the handler for `kind`.
    pub fn unregister(&mut self, kind: KindId) -> Option<H> {
        self.handlers.remove(&kind)
    }

    /// Handler registered on exactly `kind`, ignoring ancestors.
    pub fn get(&self, kind: KindId) -> Option<&H> {
        self.handlers.get(&kind)
    }

    pub fn contains(&self, kind: KindId) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Find the handler for `kind`: exact match, then the nearest ancestor.
    ///
    /// Kinds unknown to `kinds` have no chain and always fail.
    pub fn resolve(
        &self,
        kinds: &KindTable,
        kind: KindId,
    ) -> Result<Resolved<'_, H>, DispatchError> {
        for (distance, candidate) in kinds.ancestors(kind).enumerate() {
            if let Some(handler) = self.handlers.get(&candidate) {
                if distance > 0 {
                    tracing::trace!(
                        behavior = self.behavior,
                        kind = kinds.name(kind),
                        via = kinds.name(candidate),
                        distance,
                        "resolved through ancestor"
                    );
                }
                return Ok(Resolved {
                    handler,
                    found_on: candidate,
                    distance,
                });
            }
        }
        Err(DispatchError {
            behavior: self.behavior,
            kind,
            kind_name: kinds.name(kind).to_string(),
        })
    }

    /// Number of kinds with a handler of their own.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Kinds with a handler of their own, in id order.
    pub fn kinds(&self) -> Vec<KindId> {
        let mut kinds: Vec<_> = self.handlers.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// End the registration phase; the result can be shared across threads.
    pub fn freeze(self) -> FrozenRegistry<H> {
        FrozenRegistry::new(self)
    }
}

impl<H> fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("behavior", &self.behavior)
            .field("kinds", &self.kinds())
            .finish()
    }
}
