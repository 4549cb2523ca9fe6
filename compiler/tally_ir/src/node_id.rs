//! Node IDs and child ranges for the flat tree.

use std::fmt;

/// Index into an `ExprTree` arena.
///
/// 4 bytes, `Copy`, O(1) equality. Ids are only meaningful for the tree that
/// allocated them.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Range of child ids in the arena's flattened child list.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct NodeRange {
    pub start: u32,
    pub len: u16,
}

impl NodeRange {
    pub const EMPTY: NodeRange = NodeRange { start: 0, len: 0 };

    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        NodeRange { start, len }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Slice bounds of this range in the flattened child list.
    #[inline]
    pub fn bounds(&self) -> std::ops::Range<usize> {
        let start = self.start as usize;
        start..start + self.len()
    }
}

impl fmt::Debug for NodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self.start + u32::from(self.len);
        write!(f, "NodeRange({}..{end})", self.start)
    }
}
