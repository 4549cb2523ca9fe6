#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::KindSpec;
use pretty_assertions::assert_eq;

#[test]
fn test_build_canonical_tree() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);

    let three = tree.integer(3).unwrap();
    let five = tree.integer(5).unwrap();
    let four = tree.integer(4).unwrap();
    let seven = tree.integer(7).unwrap();
    let left = tree.add(three, five).unwrap();
    let right = tree.add(four, seven).unwrap();
    let root = tree.multiply(left, right).unwrap();

    assert_eq!(tree.len(), 7);
    assert_eq!(tree.roots().collect::<Vec<_>>(), vec![root]);

    let node = tree.get(root).unwrap();
    assert_eq!(node.kind(), KindId::MULTIPLY);
    assert_eq!(node.kind_name(), "Multiply");
    assert_eq!(node.children(), &[left, right]);
    assert_eq!(node.symbol(), Some("*"));
    assert_eq!(node.literal(), None);

    let leaf = tree.get(seven).unwrap();
    assert_eq!(leaf.literal(), Some(7));
    assert_eq!(leaf.arity(), 0);
    assert_eq!(leaf.child(0), None);
}

#[test]
fn test_children_are_built_first() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let a = tree.integer(1).unwrap();
    let b = tree.integer(2).unwrap();
    let sum = tree.add(a, b).unwrap();

    assert!(a.raw() < sum.raw());
    assert!(b.raw() < sum.raw());
}

#[test]
fn test_arity_is_checked_at_construction() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let one = tree.integer(1).unwrap();

    assert_eq!(
        tree.node(KindId::ADD, &[]),
        Err(ConstructError::Arity {
            kind: "Add".to_string(),
            expected: 2,
            found: 0,
        })
    );
    assert_eq!(
        tree.node(KindId::MULTIPLY, &[one]),
        Err(ConstructError::Arity {
            kind: "Multiply".to_string(),
            expected: 2,
            found: 1,
        })
    );

    // Nothing was allocated or adopted by the failed attempts.
    assert_eq!(tree.len(), 1);
    assert!(!tree.is_owned(one));
}

#[test]
fn test_children_are_exclusively_owned() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let a = tree.integer(1).unwrap();
    let b = tree.integer(2).unwrap();
    let c = tree.integer(3).unwrap();

    assert_eq!(tree.add(a, a), Err(ConstructError::DuplicateChild(a)));

    let sum = tree.add(a, b).unwrap();
    assert!(tree.is_owned(a));
    assert!(!tree.is_owned(sum));

    assert_eq!(
        tree.multiply(a, c),
        Err(ConstructError::ChildAlreadyOwned(a))
    );
    assert!(!tree.is_owned(c));
}

#[test]
fn test_unknown_child_is_rejected() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let a = tree.integer(1).unwrap();
    let ghost = NodeId::new(10);

    assert_eq!(tree.add(a, ghost), Err(ConstructError::UnknownChild(ghost)));
    let far = NodeId::new(u32::MAX);
    assert_eq!(tree.add(a, far), Err(ConstructError::UnknownChild(far)));
    assert!(!tree.is_owned(a));
}

#[test]
fn test_payload_must_match_shape() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);

    assert_eq!(
        tree.literal(KindId::ADD, 1),
        Err(ConstructError::UnexpectedLiteral {
            kind: "Add".to_string()
        })
    );
    assert_eq!(
        tree.node(KindId::INTEGER, &[]),
        Err(ConstructError::LiteralRequired {
            kind: "Integer".to_string()
        })
    );
}

#[test]
fn test_abstract_and_unknown_kinds_are_rejected() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let a = tree.integer(1).unwrap();
    let b = tree.integer(2).unwrap();

    assert_eq!(
        tree.node(KindId::OPERATION, &[a, b]),
        Err(ConstructError::AbstractKind {
            kind: "Operation".to_string()
        })
    );
    assert_eq!(
        tree.literal(KindId::new(77), 0),
        Err(ConstructError::UnknownKind(KindId::new(77)))
    );
}

#[test]
fn test_literal_must_pass_every_ancestor_check() {
    let mut kinds = KindTable::new();
    let positive = kinds
        .define(
            KindSpec::new("PositiveInteger")
                .extends(KindId::INTEGER)
                .literal_check(|v| v > 0, "must be positive"),
        )
        .unwrap();
    let small = kinds
        .define(
            KindSpec::new("SmallPositive")
                .extends(positive)
                .literal_check(|v| v < 100, "must be below 100"),
        )
        .unwrap();
    assert!(kinds.is_subkind(small, positive));

    let mut tree = ExprTree::new(&kinds);
    assert_eq!(
        tree.literal(small, -5),
        Err(ConstructError::Rejected {
            kind: "SmallPositive".to_string(),
            value: -5,
            message: "must be positive",
        })
    );
    assert_eq!(
        tree.literal(small, 100),
        Err(ConstructError::Rejected {
            kind: "SmallPositive".to_string(),
            value: 100,
            message: "must be below 100",
        })
    );
    assert!(tree.is_empty());

    let ok = tree.literal(small, 42).unwrap();
    assert_eq!(tree.get(ok).unwrap().literal(), Some(42));
}

#[test]
fn test_extended_kind_construction() {
    let mut kinds = KindTable::new();
    let positive = kinds
        .define(
            KindSpec::new("PositiveInteger")
                .extends(KindId::INTEGER)
                .literal_check(|v| v > 0, "must be positive"),
        )
        .unwrap();
    let subtract = kinds
        .define(KindSpec::new("Subtract").extends(KindId::OPERATION).symbol("-"))
        .unwrap();

    let mut tree = ExprTree::new(&kinds);
    let n = tree.literal(positive, 1234).unwrap();
    assert_eq!(tree.get(n).unwrap().literal(), Some(1234));
    assert_eq!(
        tree.literal(positive, -1),
        Err(ConstructError::Rejected {
            kind: "PositiveInteger".to_string(),
            value: -1,
            message: "must be positive",
        })
    );

    let m = tree.integer(4).unwrap();
    let diff = tree.node(subtract, &[n, m]).unwrap();
    assert_eq!(tree.get(diff).unwrap().symbol(), Some("-"));
    assert_eq!(
        tree.node(subtract, &[]).unwrap_err().to_string(),
        "`Subtract` expects 2 children, found 0"
    );
}

#[test]
fn test_roots_in_allocation_order() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    assert!(tree.is_empty());

    let a = tree.integer(1).unwrap();
    let b = tree.integer(2).unwrap();
    let c = tree.integer(3).unwrap();
    let sum = tree.add(a, c).unwrap();

    assert_eq!(tree.roots().collect::<Vec<_>>(), vec![b, sum]);
}

#[test]
fn test_get_foreign_id() {
    let kinds = KindTable::new();
    let tree = ExprTree::new(&kinds);
    assert!(tree.get(NodeId::new(0)).is_none());
    assert!(!tree.is_owned(NodeId::new(0)));
}

#[test]
fn test_node_id_debug() {
    assert_eq!(format!("{:?}", NodeId::new(3)), "NodeId(3)");
    assert_eq!(format!("{:?}", NodeRange::new(4, 2)), "NodeRange(4..6)");
    assert_eq!(std::mem::size_of::<NodeId>(), 4);
}
