//! Built-in evaluation handlers.
//!
//! Binary operators evaluate the left operand, then the right, then combine
//! with checked arithmetic.

use tally_dispatch::{handler, Handler, Registry, WalkError, WalkResult, Walker};
use tally_ir::{KindId, NodeRef};

use crate::Number;

pub(crate) fn register_builtins(registry: &mut Registry<Handler<Number>>) {
    registry.register(KindId::INTEGER, handler(integer));
    registry.register(KindId::ADD, handler(add));
    registry.register(KindId::MULTIPLY, handler(multiply));
}

fn integer(node: NodeRef<'_>, _: &Walker<'_, Number>) -> WalkResult<Number> {
    node.literal().ok_or_else(|| WalkError::missing_literal(node))
}

fn add(node: NodeRef<'_>, walker: &Walker<'_, Number>) -> WalkResult<Number> {
    let (lhs, rhs) = operands(node, walker)?;
    checked_arith(lhs.checked_add(rhs), "addition", node)
}

fn multiply(node: NodeRef<'_>, walker: &Walker<'_, Number>) -> WalkResult<Number> {
    let (lhs, rhs) = operands(node, walker)?;
    checked_arith(lhs.checked_mul(rhs), "multiplication", node)
}

fn operands(node: NodeRef<'_>, walker: &Walker<'_, Number>) -> WalkResult<(Number, Number)> {
    let lhs = walker.walk_child(node, 0)?;
    let rhs = walker.walk_child(node, 1)?;
    Ok((lhs, rhs))
}

#[inline]
fn checked_arith(
    result: Option<Number>,
    operation: &'static str,
    node: NodeRef<'_>,
) -> WalkResult<Number> {
    result.ok_or_else(|| WalkError::overflow(operation, node))
}
