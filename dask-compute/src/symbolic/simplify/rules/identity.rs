//! Simplification rules that remove identity elements: `0` for addition, `1` for multiplication,
//! division and powers.

use crate::symbolic::{simplify::{rules::do_binary, step::Step}, step_collector::StepCollector};
use dask_parser::parser::{node::Node, op::BinOpKind};

/// `(a+0) = a`
/// `(0+a) = a`
pub fn add_zero(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(node, BinOpKind::Add, |lhs, rhs| {
        if rhs.is_number_eq(0.0) {
            Some(lhs.clone())
        } else if lhs.is_number_eq(0.0) {
            Some(rhs.clone())
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `(a*1) = a`
/// `(1*a) = a`
pub fn multiply_one(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(node, BinOpKind::Mul, |lhs, rhs| {
        if rhs.is_number_eq(1.0) {
            Some(lhs.clone())
        } else if lhs.is_number_eq(1.0) {
            Some(rhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// `(a/1) = a`
pub fn divide_one(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(node, BinOpKind::Div, |lhs, rhs| {
        rhs.is_number_eq(1.0).then(|| lhs.clone())
    })?;

    step_collector.push(Step::DivideOne);
    Some(opt)
}

/// `(a**1) = a`
pub fn power_one(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(node, BinOpKind::Exp, |lhs, rhs| {
        rhs.is_number_eq(1.0).then(|| lhs.clone())
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `(a**0) = 1`
pub fn power_zero(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(node, BinOpKind::Exp, |_, rhs| {
        rhs.is_number_eq(0.0).then_some(Node::Number(1.0))
    })?;

    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// Applies all rules.
pub fn all(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    add_zero(node, step_collector)
        .or_else(|| multiply_one(node, step_collector))
        .or_else(|| divide_one(node, step_collector))
        .or_else(|| power_one(node, step_collector))
        .or_else(|| power_zero(node, step_collector))
}
