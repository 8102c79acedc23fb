//! A relative cost model for expression trees.
//!
//! The weighted cost is not a runtime measurement. Each operator has a fixed weight (see
//! [`BinOpKind::cost`]), and the cost of a tree is the sum of the weights of its operators. It is
//! used to show how much a simplification saved.

use crate::tree::ParseTree;
use dask_parser::parser::{node::Node, op::BinOpKind};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size and cost metrics of a single tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metrics {
    /// The total number of nodes.
    pub total_nodes: usize,

    /// The number of operator nodes.
    pub operator_nodes: usize,

    /// The number of leaves (numbers and variables).
    pub leaf_nodes: usize,

    /// The number of nodes on the longest path from the root to a leaf.
    pub height: usize,

    /// The sum of the weights of all operators.
    pub weighted_cost: usize,
}

impl Metrics {
    /// Computes the metrics of the given tree. An absent tree has all metrics zero.
    pub fn of(root: Option<&Node>) -> Self {
        let mut metrics = Self::default();
        let Some(root) = root else {
            return metrics;
        };

        let mut stack = vec![(root, 1)];
        while let Some((node, depth)) = stack.pop() {
            metrics.total_nodes += 1;
            metrics.height = metrics.height.max(depth);
            if node.is_leaf() {
                metrics.leaf_nodes += 1;
            } else if let Node::Binary { op, lhs, rhs } = node {
                metrics.operator_nodes += 1;
                metrics.weighted_cost += op.cost();
                stack.push((rhs, depth + 1));
                stack.push((lhs, depth + 1));
            }
        }
        metrics
    }
}

/// The metrics of a tree before and after simplification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostReport {
    /// The metrics of the original tree.
    pub original: Metrics,

    /// The metrics of the simplified tree.
    pub simplified: Metrics,
}

impl CostReport {
    /// Computes the report for the given tree, simplifying it if that has not been done yet.
    pub fn of(tree: &ParseTree) -> Self {
        Self {
            original: Metrics::of(tree.original()),
            simplified: Metrics::of(tree.simplified()),
        }
    }

    /// Returns how much weighted cost the simplification removed. Simplification never adds
    /// nodes, so this is never negative for a report built by [`CostReport::of`].
    pub fn savings(&self) -> isize {
        self.original.weighted_cost as isize - self.simplified.weighted_cost as isize
    }

    /// Returns the savings as a percentage of the original weighted cost, or [`None`] if the
    /// original tree has no operators.
    pub fn savings_percent(&self) -> Option<f64> {
        (self.original.weighted_cost > 0)
            .then(|| self.savings() as f64 * 100.0 / self.original.weighted_cost as f64)
    }
}

/// Returns the weight of each operator, in the order of [`BinOpKind::ALL`].
pub fn operator_weights() -> [(BinOpKind, usize); 7] {
    BinOpKind::ALL.map(|op| (op, op.cost()))
}
