//! Node kinds and their ancestor chains.
//!
//! A `KindTable` is the open type hierarchy of the node model. Every kind has
//! a unique name, at most one parent and a shape. Because a kind names a single
//! parent that must already exist, every ancestor chain is linear and acyclic;
//! diamond hierarchies cannot be declared.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::KindError;

/// Runtime identifier of a node kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct KindId(u32);

impl KindId {
    /// Integer literal.
    pub const INTEGER: KindId = KindId(0);
    /// Abstract base of the binary operators.
    pub const OPERATION: KindId = KindId(1);
    /// `Operation` with symbol `+`.
    pub const ADD: KindId = KindId(2);
    /// `Operation` with symbol `*`.
    pub const MULTIPLY: KindId = KindId(3);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        KindId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KindId({})", self.0)
    }
}

/// Structural shape of a kind, enforced when nodes are constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Leaf carrying one `i64` payload.
    Literal,
    /// Exactly this many children and no payload.
    Fixed(u16),
}

impl Shape {
    /// Number of children a node of this shape owns.
    pub fn arity(self) -> usize {
        match self {
            Shape::Literal => 0,
            Shape::Fixed(n) => usize::from(n),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Literal => write!(f, "literal"),
            Shape::Fixed(1) => write!(f, "1 child"),
            Shape::Fixed(n) => write!(f, "{n} children"),
        }
    }
}

/// Construction-time constraint on literal payloads.
#[derive(Copy, Clone, Debug)]
pub struct LiteralCheck {
    pub accepts: fn(i64) -> bool,
    pub message: &'static str,
}

/// Declaration of a new kind, built with chained setters.
///
/// ```text
/// let positive = kinds.define(
///     KindSpec::new("PositiveInteger")
///         .extends(KindId::INTEGER)
///         .literal_check(|v| v > 0, "must be positive"),
/// )?;
/// ```
#[derive(Clone, Debug)]
pub struct KindSpec {
    name: String,
    parent: Option<KindId>,
    shape: Option<Shape>,
    symbol: Option<String>,
    check: Option<LiteralCheck>,
    is_abstract: bool,
}

impl KindSpec {
    pub fn new(name: impl Into<String>) -> Self {
        KindSpec {
            name: name.into(),
            parent: None,
            shape: None,
            symbol: None,
            check: None,
            is_abstract: false,
        }
    }

    /// Declare the single parent kind.
    #[must_use]
    pub fn extends(mut self, parent: KindId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Declare the shape. Kinds with a parent inherit its shape when omitted.
    #[must_use]
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Operator symbol used when rendering infix forms.
    #[must_use]
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Reject literal payloads for which `accepts` returns false.
    #[must_use]
    pub fn literal_check(mut self, accepts: fn(i64) -> bool, message: &'static str) -> Self {
        self.check = Some(LiteralCheck { accepts, message });
        self
    }

    /// Mark the kind as an ancestor only; it cannot be instantiated.
    #[must_use]
    pub fn abstract_kind(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

#[derive(Clone, Debug)]
struct KindDef {
    name: String,
    parent: Option<KindId>,
    shape: Shape,
    symbol: Option<String>,
    check: Option<LiteralCheck>,
    is_abstract: bool,
}

/// The kind hierarchy: names, parents, shapes.
///
/// `KindTable::new()` starts with the built-in kinds:
///
/// ```text
/// Integer                 (literal)
/// Operation  [abstract]   (2 children)
/// ├── Add        "+"
/// └── Multiply   "*"
/// ```
#[derive(Clone, Debug)]
pub struct KindTable {
    kinds: Vec<KindDef>,
    by_name: FxHashMap<String, KindId>,
}

impl KindTable {
    /// Create a table holding the built-in kinds.
    pub fn new() -> Self {
        let mut table = KindTable {
            kinds: Vec::with_capacity(8),
            by_name: FxHashMap::default(),
        };
        table.push(KindDef {
            name: "Integer".to_string(),
            parent: None,
            shape: Shape::Literal,
            symbol: None,
            check: None,
            is_abstract: false,
        });
        table.push(KindDef {
            name: "Operation".to_string(),
            parent: None,
            shape: Shape::Fixed(2),
            symbol: None,
            check: None,
            is_abstract: true,
        });
        for (name, symbol) in [("Add", "+"), ("Multiply", "*")] {
            table.push(KindDef {
                name: name.to_string(),
                parent: Some(KindId::OPERATION),
                shape: Shape::Fixed(2),
                symbol: Some(symbol.to_string()),
                check: None,
                is_abstract: false,
            });
        }
        table
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "only called for the four built-ins; `define` checks capacity"
    )]
    fn push(&mut self, def: KindDef) -> KindId {
        let id = KindId(self.kinds.len() as u32);
        self.by_name.insert(def.name.clone(), id);
        self.kinds.push(def);
        id
    }

    /// Declare a new kind.
    ///
    /// The parent must already exist, so every chain is linear and finite.
    /// A declared shape must agree with the parent's, since the parent's
    /// handlers are reused for the new kind.
    #[tracing::instrument(level = "debug", skip(self), fields(name = %spec.name))]
    pub fn define(&mut self, spec: KindSpec) -> Result<KindId, KindError> {
        let KindSpec {
            name,
            parent,
            shape,
            symbol,
            check,
            is_abstract,
        } = spec;

        if name.is_empty() {
            return Err(KindError::EmptyName);
        }
        if self.by_name.contains_key(&name) {
            return Err(KindError::Duplicate { name });
        }

        let parent_def = match parent {
            Some(id) => match self.def(id) {
                Some(def) => Some(def),
                None => return Err(KindError::UnknownParent { name, parent: id }),
            },
            None => None,
        };

        let shape = match (shape, parent_def) {
            (Some(found), Some(parent)) if found != parent.shape => {
                return Err(KindError::ShapeMismatch {
                    parent: parent.name.clone(),
                    expected: parent.shape,
                    found,
                    name,
                });
            }
            (Some(shape), _) => shape,
            (None, Some(parent)) => parent.shape,
            (None, None) => return Err(KindError::MissingShape { name }),
        };

        if check.is_some() && shape != Shape::Literal {
            return Err(KindError::CheckOnNonLiteral { name });
        }

        // An unset symbol comes from the nearest ancestor. Literal checks are
        // not copied down: `literal_checks` gathers the whole chain.
        let symbol = symbol.or_else(|| parent_def.and_then(|p| p.symbol.clone()));

        let id = u32::try_from(self.kinds.len())
            .ok()
            .filter(|&raw| raw != u32::MAX)
            .map(KindId)
            .ok_or(KindError::Exhausted)?;

        tracing::debug!(?id, ?parent, %shape, "kind defined");
        self.by_name.insert(name.clone(), id);
        self.kinds.push(KindDef {
            name,
            parent,
            shape,
            symbol,
            check,
            is_abstract,
        });
        Ok(id)
    }

    fn def(&self, kind: KindId) -> Option<&KindDef> {
        self.kinds.get(kind.index())
    }

    /// Find a kind by name.
    pub fn lookup(&self, name: &str) -> Option<KindId> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, kind: KindId) -> bool {
        kind.index() < self.kinds.len()
    }

    /// Name of a kind, or `"<unknown>"` for ids from another table.
    pub fn name(&self, kind: KindId) -> &str {
        self.def(kind).map_or("<unknown>", |def| def.name.as_str())
    }

    pub fn parent(&self, kind: KindId) -> Option<KindId> {
        self.def(kind).and_then(|def| def.parent)
    }

    pub fn shape(&self, kind: KindId) -> Option<Shape> {
        self.def(kind).map(|def| def.shape)
    }

    /// Operator symbol, declared or inherited.
    pub fn symbol(&self, kind: KindId) -> Option<&str> {
        self.def(kind).and_then(|def| def.symbol.as_deref())
    }

    /// Check declared on exactly `kind`.
    pub fn literal_check(&self, kind: KindId) -> Option<LiteralCheck> {
        self.def(kind).and_then(|def| def.check)
    }

    /// Every check a literal of `kind` must pass: its own, then each
    /// ancestor's, most specific first.
    pub fn literal_checks(&self, kind: KindId) -> impl Iterator<Item = LiteralCheck> + '_ {
        self.ancestors(kind).filter_map(|ancestor| self.literal_check(ancestor))
    }

    pub fn is_abstract(&self, kind: KindId) -> bool {
        self.def(kind).is_some_and(|def| def.is_abstract)
    }

    /// Walk the ancestor chain: the kind itself, then its parent, and so on.
    ///
    /// Empty for kinds not in this table.
    pub fn ancestors(&self, kind: KindId) -> Ancestors<'_> {
        Ancestors {
            table: self,
            next: self.contains(kind).then_some(kind),
        }
    }

    /// Whether `ancestor` appears on `kind`'s chain (a kind is its own subkind).
    pub fn is_subkind(&self, kind: KindId, ancestor: KindId) -> bool {
        self.ancestors(kind).any(|k| k == ancestor)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// All kinds in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (KindId, &str)> {
        (0u32..)
            .zip(&self.kinds)
            .map(|(raw, def)| (KindId(raw), def.name.as_str()))
    }
}

impl Default for KindTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over an ancestor chain, most specific first.
pub struct Ancestors<'a> {
    table: &'a KindTable,
    next: Option<KindId>,
}

impl Iterator for Ancestors<'_> {
    type Item = KindId;

    fn next(&mut self) -> Option<KindId> {
        let current = self.next?;
        self.next = self.table.parent(current);
        Some(current)
    }
}
