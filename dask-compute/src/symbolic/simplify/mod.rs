//! Module to simplify expression trees.
//!
//! This module provides the [`simplify`] function, which reduces the size of a tree by applying
//! local rewriting rules. The tree is walked in strict post-order: both children of a node are
//! simplified before any rule is tried on the node itself, and at most one rule is applied per
//! node. Since every rule produces either a number or one of the already simplified children,
//! one pass reaches a fixed point, and simplifying a simplified tree changes nothing.

pub mod rules;
pub mod step;

use crate::symbolic::step_collector::StepCollector;
use dask_parser::parser::node::Node;
use step::Step;
use tracing::trace;

/// Base implementation of the simplification algorithm.
fn inner_simplify(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Node {
    let Node::Binary { op, lhs, rhs } = node else {
        return node.clone();
    };

    let node = Node::binary(
        *op,
        inner_simplify(lhs, step_collector),
        inner_simplify(rhs, step_collector),
    );

    match rules::all(&node, step_collector) {
        Some(simplified) => {
            trace!(from = %node, to = %simplified, "rewrote node");
            simplified
        },
        None => node,
    }
}

/// Simplify the given tree. The input is left untouched; the simplified tree is built from
/// clones of its nodes.
pub fn simplify(node: &Node) -> Node {
    inner_simplify(node, &mut ())
}

/// Simplify the given tree. The steps taken by the simplifier will also be collected and
/// returned, in the order they were taken. This is useful for displaying the steps taken to the
/// user.
pub fn simplify_with_steps(node: &Node) -> (Node, Vec<Step>) {
    let mut steps = Vec::new();
    let node = inner_simplify(node, &mut steps);
    (node, steps)
}
