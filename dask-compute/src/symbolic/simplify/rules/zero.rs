//! Simplification rules for products with zero.

use crate::symbolic::{simplify::{rules::do_binary, step::Step}, step_collector::StepCollector};
use dask_parser::parser::{node::Node, op::BinOpKind};

/// `(a*0) = 0`
/// `(0*a) = 0`
///
/// `(0/a)` is deliberately not rewritten: `a` may be a variable that evaluates to zero.
pub fn multiply_zero(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(node, BinOpKind::Mul, |lhs, rhs| {
        (lhs.is_number_eq(0.0) || rhs.is_number_eq(0.0)).then_some(Node::Number(0.0))
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// Applies all rules.
pub fn all(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    multiply_zero(node, step_collector)
}
