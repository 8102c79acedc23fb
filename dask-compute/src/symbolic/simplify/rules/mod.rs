//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the node to simplify as an argument, and
//! returns `Some(node)` with the simplified node if the rule applies, or `None` if the rule does
//! not apply. Rules only look at the node itself and its direct children; the driver in
//! [`super`] is responsible for simplifying the children first.

pub mod fold;
pub mod identity;
pub mod zero;

use crate::symbolic::step_collector::StepCollector;
use dask_parser::parser::{node::Node, op::BinOpKind};
use super::step::Step;

/// If the node is a binary node with the given operator, calls the given transformation function
/// with the left and right-hand-side operands.
///
/// Returns `Some(node)` with the transformed node if a transformation was applied.
pub(crate) fn do_binary(
    node: &Node,
    target: BinOpKind,
    f: impl Fn(&Node, &Node) -> Option<Node>,
) -> Option<Node> {
    match node {
        Node::Binary { op, lhs, rhs } if *op == target => f(lhs, rhs),
        _ => None,
    }
}

/// Applies the first rule that matches, trying constant folding first, then the identity
/// rules, then the zero rules.
pub fn all(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    fold::all(node, step_collector)
        .or_else(|| identity::all(node, step_collector))
        .or_else(|| zero::all(node, step_collector))
}
