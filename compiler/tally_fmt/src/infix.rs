//! Built-in rendering handlers.

use tally_dispatch::{handler, Handler, Registry, WalkError, WalkResult, Walker};
use tally_ir::{KindId, NodeRef};

pub(crate) fn register_builtins(registry: &mut Registry<Handler<String>>) {
    registry.register(KindId::INTEGER, handler(literal));
    registry.register(KindId::OPERATION, handler(binary));
}

fn literal(node: NodeRef<'_>, _: &Walker<'_, String>) -> WalkResult<String> {
    node.literal()
        .map(|value| value.to_string())
        .ok_or_else(|| WalkError::missing_literal(node))
}

/// `(<lhs> <symbol> <rhs>)`, symbol taken from the nearest kind declaring one.
fn binary(node: NodeRef<'_>, walker: &Walker<'_, String>) -> WalkResult<String> {
    let symbol = node
        .symbol()
        .ok_or_else(|| WalkError::handler(node, "no operator symbol declared"))?;
    let lhs = walker.walk_child(node, 0)?;
    let rhs = walker.walk_child(node, 1)?;
    Ok(format!("({lhs} {symbol} {rhs})"))
}
