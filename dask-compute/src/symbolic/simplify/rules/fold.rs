//! Constant folding.

use crate::numerical::apply;
use crate::symbolic::{simplify::step::Step, step_collector::StepCollector};
use dask_parser::parser::node::Node;

/// `(2+3) = 5`
///
/// Replaces an operation on two numbers with its result. Operations without a finite result,
/// such as `(1/0)`, are left as they are.
pub fn constant_fold(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let Node::Binary { op, lhs, rhs } = node else {
        return None;
    };

    let result = apply(*op, lhs.as_number()?, rhs.as_number()?)?;
    step_collector.push(Step::ConstantFold);
    Some(Node::Number(result))
}

/// Applies all rules.
pub fn all(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    constant_fold(node, step_collector)
}
