#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use pretty_assertions::assert_eq;
use tally_dispatch::{DispatchError, WalkError};
use tally_ir::{KindSpec, KindTable};

/// `Multiply(Add(3, 5), Add(4, 7))`.
fn canonical(tree: &mut ExprTree<'_>) -> NodeId {
    let three = tree.integer(3).unwrap();
    let five = tree.integer(5).unwrap();
    let four = tree.integer(4).unwrap();
    let seven = tree.integer(7).unwrap();
    let left = tree.add(three, five).unwrap();
    let right = tree.add(four, seven).unwrap();
    tree.multiply(left, right).unwrap()
}

#[test]
fn test_canonical_expression() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let root = canonical(&mut tree);

    assert_eq!(Evaluator::new().evaluate(&tree, root), Ok(88));
}

#[test]
fn test_single_literal() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let root = tree.integer(-42).unwrap();

    assert_eq!(Evaluator::new().evaluate(&tree, root), Ok(-42));
}

#[test]
fn test_subtree_evaluation() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let four = tree.integer(4).unwrap();
    let seven = tree.integer(7).unwrap();
    let sum = tree.add(four, seven).unwrap();
    let two = tree.integer(2).unwrap();
    let _root = tree.multiply(sum, two).unwrap();

    assert_eq!(Evaluator::new().evaluate(&tree, sum), Ok(11));
}

#[test]
fn test_subkind_inherits_integer_handler() {
    let mut kinds = KindTable::new();
    let positive = kinds
        .define(
            KindSpec::new("PositiveInteger")
                .extends(KindId::INTEGER)
                .literal_check(|value| value > 0, "must be positive"),
        )
        .unwrap();
    let mut tree = ExprTree::new(&kinds);
    let root = tree.literal(positive, 1234).unwrap();

    assert_eq!(Evaluator::new().evaluate(&tree, root), Ok(1234));
}

#[test]
fn test_unhandled_operation_fails_until_registered() {
    let mut kinds = KindTable::new();
    let subtract = kinds
        .define(KindSpec::new("Subtract").extends(KindId::OPERATION).symbol("-"))
        .unwrap();
    let mut tree = ExprTree::new(&kinds);
    let ten = tree.integer(10).unwrap();
    let three = tree.integer(3).unwrap();
    let root = tree.node(subtract, &[ten, three]).unwrap();

    let mut evaluator = Evaluator::new();
    assert_eq!(
        evaluator.evaluate(&tree, root),
        Err(WalkError::Dispatch(DispatchError {
            behavior: "evaluate",
            kind: subtract,
            kind_name: "Subtract".to_string(),
        }))
    );

    evaluator.register(subtract, |node, walker| {
        let lhs = walker.walk_child(node, 0)?;
        let rhs = walker.walk_child(node, 1)?;
        lhs.checked_sub(rhs)
            .ok_or_else(|| WalkError::overflow("subtraction", node))
    });
    assert_eq!(evaluator.evaluate(&tree, root), Ok(7));
}

#[test]
fn test_empty_evaluator_fails_on_leaf() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let root = tree.integer(1).unwrap();

    let err = Evaluator::empty().evaluate(&tree, root).unwrap_err();
    assert_eq!(
        err.to_string(),
        "no `evaluate` handler for `Integer` or any of its ancestors"
    );
}

#[test]
fn test_addition_overflow() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let max = tree.integer(i64::MAX).unwrap();
    let one = tree.integer(1).unwrap();
    let root = tree.add(max, one).unwrap();

    assert_eq!(
        Evaluator::new().evaluate(&tree, root),
        Err(WalkError::Overflow {
            operation: "addition",
            kind: "Add".to_string(),
        })
    );
}

#[test]
fn test_multiplication_overflow_propagates_to_root() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let min = tree.integer(i64::MIN).unwrap();
    let neg = tree.integer(-1).unwrap();
    let product = tree.multiply(min, neg).unwrap();
    let zero = tree.integer(0).unwrap();
    let root = tree.add(product, zero).unwrap();

    let err = Evaluator::new().evaluate(&tree, root).unwrap_err();
    assert_eq!(err.to_string(), "integer overflow in multiplication at `Multiply`");
}

#[test]
fn test_evaluation_is_repeatable() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let root = canonical(&mut tree);
    let evaluator = Evaluator::new();

    let first = evaluator.evaluate(&tree, root);
    for _ in 0..10 {
        assert_eq!(evaluator.evaluate(&tree, root), first);
    }
}

#[test]
fn test_one_handler_call_per_node() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let root = canonical(&mut tree);

    let leaves = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&leaves);
    let mut evaluator = Evaluator::new();
    let replaced = evaluator.register(KindId::INTEGER, move |node, _| {
        counter.fetch_add(1, Ordering::Relaxed);
        node.literal().ok_or_else(|| WalkError::missing_literal(node))
    });
    assert!(replaced.is_some());

    assert_eq!(evaluator.evaluate(&tree, root), Ok(88));
    assert_eq!(leaves.load(Ordering::Relaxed), 4);
}

#[test]
fn test_depth_limit_config() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let root = canonical(&mut tree);

    let shallow = Evaluator::new().with_config(WalkConfig::with_max_depth(2));
    assert_eq!(
        shallow.evaluate(&tree, root),
        Err(WalkError::DepthLimit { limit: 2 })
    );
    assert_eq!(shallow.config(), WalkConfig::with_max_depth(2));
}

#[test]
fn test_builtin_registrations() {
    let evaluator = Evaluator::new();
    assert_eq!(
        evaluator.registry().kinds(),
        vec![KindId::INTEGER, KindId::ADD, KindId::MULTIPLY]
    );
    assert!(!evaluator.registry().contains(KindId::OPERATION));
    assert_eq!(evaluator.registry().behavior(), BEHAVIOR);
}

#[test]
fn test_unregister_through_registry_mut() {
    let kinds = KindTable::new();
    let mut tree = ExprTree::new(&kinds);
    let a = tree.integer(2).unwrap();
    let b = tree.integer(3).unwrap();
    let root = tree.multiply(a, b).unwrap();

    let mut evaluator = Evaluator::new();
    assert_eq!(evaluator.evaluate(&tree, root), Ok(6));

    assert!(evaluator.registry_mut().unregister(KindId::MULTIPLY).is_some());
    let err = evaluator.evaluate(&tree, root).unwrap_err();
    assert_eq!(err.as_dispatch().map(|e| e.kind), Some(KindId::MULTIPLY));
}
