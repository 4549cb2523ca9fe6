//! Arena-owned expression trees.
//!
//! `ExprTree` is append-only: a node is immutable once allocated, and its
//! children are allocated before it. Each node may be adopted as a child at
//! most once, which keeps every tree in the arena a proper tree (no sharing,
//! no cycles). Dropping the arena drops every node at once.

use std::fmt;

use crate::{ConstructError, KindId, KindTable, NodeId, NodeRange, Shape};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Node {
    kind: KindId,
    literal: Option<i64>,
    children: NodeRange,
}

/// Arena of nodes bound to one kind table.
pub struct ExprTree<'k> {
    kinds: &'k KindTable,
    nodes: Vec<Node>,
    /// Flattened child lists; each node owns a `NodeRange` into this.
    child_ids: Vec<NodeId>,
    /// `owned[i]` is set once node `i` has been adopted by a parent.
    owned: Vec<bool>,
}

impl<'k> ExprTree<'k> {
    pub fn new(kinds: &'k KindTable) -> Self {
        ExprTree {
            kinds,
            nodes: Vec::new(),
            child_ids: Vec::new(),
            owned: Vec::new(),
        }
    }

    /// The kind table this tree validates against.
    pub fn kinds(&self) -> &'k KindTable {
        self.kinds
    }

    /// Allocate a literal node of `kind`.
    pub fn literal(&mut self, kind: KindId, value: i64) -> Result<NodeId, ConstructError> {
        let shape = self.constructible(kind)?;
        if shape != Shape::Literal {
            return Err(ConstructError::UnexpectedLiteral {
                kind: self.kinds.name(kind).to_string(),
            });
        }
        if let Some(check) = self
            .kinds
            .literal_checks(kind)
            .find(|check| !(check.accepts)(value))
        {
            return Err(ConstructError::Rejected {
                kind: self.kinds.name(kind).to_string(),
                value,
                message: check.message,
            });
        }
        self.push(Node {
            kind,
            literal: Some(value),
            children: NodeRange::EMPTY,
        })
    }

    /// Allocate a node of `kind` owning `children`, in order.
    ///
    /// The number of children must match the kind's shape exactly, and every
    /// child must be a root of this arena (not yet owned by another node).
    pub fn node(&mut self, kind: KindId, children: &[NodeId]) -> Result<NodeId, ConstructError> {
        let shape = self.constructible(kind)?;
        let Shape::Fixed(arity) = shape else {
            return Err(ConstructError::LiteralRequired {
                kind: self.kinds.name(kind).to_string(),
            });
        };
        if children.len() != usize::from(arity) {
            return Err(ConstructError::Arity {
                kind: self.kinds.name(kind).to_string(),
                expected: usize::from(arity),
                found: children.len(),
            });
        }

        for (i, &child) in children.iter().enumerate() {
            match self.owned.get(child.index()) {
                None => return Err(ConstructError::UnknownChild(child)),
                Some(true) => return Err(ConstructError::ChildAlreadyOwned(child)),
                Some(false) => {}
            }
            if children[..i].contains(&child) {
                return Err(ConstructError::DuplicateChild(child));
            }
        }

        let start = u32::try_from(self.child_ids.len()).map_err(|_| ConstructError::Exhausted)?;
        let range = NodeRange::new(start, arity);
        let id = self.push(Node {
            kind,
            literal: None,
            children: range,
        })?;
        for &child in children {
            self.owned[child.index()] = true;
        }
        self.child_ids.extend_from_slice(children);
        Ok(id)
    }

    /// `Integer(value)`.
    pub fn integer(&mut self, value: i64) -> Result<NodeId, ConstructError> {
        self.literal(KindId::INTEGER, value)
    }

    /// `Add(lhs, rhs)`.
    pub fn add(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId, ConstructError> {
        self.node(KindId::ADD, &[lhs, rhs])
    }

    /// `Multiply(lhs, rhs)`.
    pub fn multiply(&mut self, lhs: NodeId, rhs: NodeId) -> Result<NodeId, ConstructError> {
        self.node(KindId::MULTIPLY, &[lhs, rhs])
    }

    fn constructible(&self, kind: KindId) -> Result<Shape, ConstructError> {
        let shape = self
            .kinds
            .shape(kind)
            .ok_or(ConstructError::UnknownKind(kind))?;
        if self.kinds.is_abstract(kind) {
            return Err(ConstructError::AbstractKind {
                kind: self.kinds.name(kind).to_string(),
            });
        }
        Ok(shape)
    }

    fn push(&mut self, node: Node) -> Result<NodeId, ConstructError> {
        let raw = u32::try_from(self.nodes.len()).map_err(|_| ConstructError::Exhausted)?;
        self.nodes.push(node);
        self.owned.push(false);
        Ok(NodeId::new(raw))
    }

    /// Borrow a node, or `None` for ids from another arena.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        let node = self.nodes.get(id.index())?;
        Some(NodeRef {
            id,
            kind: node.kind,
            literal: node.literal,
            children: &self.child_ids[node.children.bounds()],
            kinds: self.kinds,
        })
    }

    /// Whether `id` has been adopted as a child.
    pub fn is_owned(&self, id: NodeId) -> bool {
        self.owned.get(id.index()).copied().unwrap_or(false)
    }

    /// Nodes not owned by any parent, in allocation order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0u32..)
            .zip(&self.owned)
            .filter(|(_, owned)| !**owned)
            .map(|(raw, _)| NodeId::new(raw))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Debug for ExprTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprTree")
            .field("nodes", &self.nodes.len())
            .field("roots", &self.roots().count())
            .finish_non_exhaustive()
    }
}

/// Borrowed view of one node, handed to behavior handlers.
#[derive(Copy, Clone)]
pub struct NodeRef<'a> {
    id: NodeId,
    kind: KindId,
    literal: Option<i64>,
    children: &'a [NodeId],
    kinds: &'a KindTable,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> KindId {
        self.kind
    }

    pub fn kind_name(&self) -> &'a str {
        self.kinds.name(self.kind)
    }

    /// Payload of a literal node.
    pub fn literal(&self) -> Option<i64> {
        self.literal
    }

    pub fn children(&self) -> &'a [NodeId] {
        self.children
    }

    pub fn child(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied()
    }

    pub fn arity(&self) -> usize {
        self.children.len()
    }

    /// Operator symbol of this node's kind, declared or inherited.
    pub fn symbol(&self) -> Option<&'a str> {
        self.kinds.symbol(self.kind)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("NodeRef");
        s.field("id", &self.id).field("kind", &self.kind_name());
        if let Some(value) = self.literal {
            s.field("literal", &value);
        }
        s.field("children", &self.children).finish()
    }
}

#[cfg(test)]
mod tests;
