use crate::symbolic::simplify;
use dask_parser::parser::{node::Node, op::BinOpKind};
use std::fmt::{Display, Formatter};

/// An error that can occur while differentiating a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivativeError {
    /// The operator has no supported derivative rule. This is the case for the triangular
    /// operators `++` and `//` anywhere in the tree, and for `**` when the exponent is not a
    /// number leaf.
    UnsupportedOperator(BinOpKind),

    /// The tree has no root, or contains a number that is not finite.
    MalformedTree,
}

impl Display for DerivativeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DerivativeError::UnsupportedOperator(BinOpKind::Exp) => {
                write!(f, "cannot differentiate `**` with a non-constant exponent")
            },
            DerivativeError::UnsupportedOperator(op) => {
                write!(f, "cannot differentiate the `{}` operator", op)
            },
            DerivativeError::MalformedTree => write!(f, "the expression tree is malformed"),
        }
    }
}

impl std::error::Error for DerivativeError {}

/// Finds the first triangular operator in the tree, if any.
fn find_triangular(node: &Node) -> Option<BinOpKind> {
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        if let Node::Binary { op, lhs, rhs } = node {
            if matches!(op, BinOpKind::Sum | BinOpKind::SumDiv) {
                return Some(*op);
            }
            stack.push(rhs);
            stack.push(lhs);
        }
    }
    None
}

/// `(u*v)' = (u'*v)+(u*v')`
fn product_rule(u: &Node, v: &Node, var: &str) -> Result<Node, DerivativeError> {
    Ok(Node::binary(
        BinOpKind::Add,
        Node::binary(BinOpKind::Mul, raw_derivative(u, var)?, v.clone()),
        Node::binary(BinOpKind::Mul, u.clone(), raw_derivative(v, var)?),
    ))
}

/// `(u/v)' = ((u'*v)-(u*v'))/(v**2)`
fn quotient_rule(u: &Node, v: &Node, var: &str) -> Result<Node, DerivativeError> {
    Ok(Node::binary(
        BinOpKind::Div,
        Node::binary(
            BinOpKind::Sub,
            Node::binary(BinOpKind::Mul, raw_derivative(u, var)?, v.clone()),
            Node::binary(BinOpKind::Mul, u.clone(), raw_derivative(v, var)?),
        ),
        Node::binary(BinOpKind::Exp, v.clone(), Node::Number(2.0)),
    ))
}

/// `(u**n)' = n*((u**(n-1))*u')`, where `n` is a constant.
fn power_rule(u: &Node, n: &Node, var: &str) -> Result<Node, DerivativeError> {
    // only a number leaf counts as a constant, `(x**(1+2))` is rejected
    let Node::Number(n) = *n else {
        return Err(DerivativeError::UnsupportedOperator(BinOpKind::Exp));
    };
    if !n.is_finite() {
        return Err(DerivativeError::MalformedTree);
    }

    Ok(Node::binary(
        BinOpKind::Mul,
        Node::Number(n),
        Node::binary(
            BinOpKind::Mul,
            Node::binary(
                BinOpKind::Exp,
                u.clone(),
                Node::binary(BinOpKind::Sub, Node::Number(n), Node::Number(1.0)),
            ),
            raw_derivative(u, var)?,
        ),
    ))
}

/// Computes the derivative without simplifying it.
fn raw_derivative(node: &Node, var: &str) -> Result<Node, DerivativeError> {
    match node {
        Node::Number(n) if n.is_finite() => Ok(Node::Number(0.0)),
        Node::Number(_) => Err(DerivativeError::MalformedTree),
        Node::Variable(name) => Ok(Node::Number(if name == var { 1.0 } else { 0.0 })),
        Node::Binary { op, lhs, rhs } => match op {
            BinOpKind::Add | BinOpKind::Sub => Ok(Node::binary(
                *op,
                raw_derivative(lhs, var)?,
                raw_derivative(rhs, var)?,
            )),
            BinOpKind::Mul => product_rule(lhs, rhs, var),
            BinOpKind::Div => quotient_rule(lhs, rhs, var),
            BinOpKind::Exp => power_rule(lhs, rhs, var),
            BinOpKind::Sum | BinOpKind::SumDiv => Err(DerivativeError::UnsupportedOperator(*op)),
        },
    }
}

/// Computes the derivative of the given tree with respect to the given variable, and simplifies
/// it. Every other variable is treated as a constant.
///
/// Returns [`Err`] if the tree contains an operator that cannot be differentiated.
pub fn derivative(node: &Node, var: &str) -> Result<Node, DerivativeError> {
    if let Some(op) = find_triangular(node) {
        return Err(DerivativeError::UnsupportedOperator(op));
    }

    raw_derivative(node, var).map(|derived| simplify(&derived))
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_relative_error_msg, afe_is_relative_eq, assert_float_relative_eq};
    use crate::numerical::{eval::Eval, value::Value};
    use dask_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use crate::tree::ParseTree;
    use super::*;

    fn derive(source: &str) -> Result<String, DerivativeError> {
        derivative(&parse(source).unwrap(), "x").map(|node| node.to_string())
    }

    /// Evaluates the derivative of the given source at `x = at`.
    fn slope(source: &str, at: f64) -> f64 {
        let node = derivative(&parse(source).unwrap(), "x").unwrap();
        let ctxt = HashMap::from([("x".to_string(), ParseTree::new(Node::Number(at)))]);
        node.eval(&ctxt).map(Value::as_f64).unwrap()
    }

    #[test]
    fn leaves() {
        assert_eq!(derive("x").unwrap(), "1");
        assert_eq!(derive("y").unwrap(), "0");
        assert_eq!(derive("7").unwrap(), "0");
    }

    #[test]
    fn sums_and_differences() {
        assert_eq!(derive("(x+5)").unwrap(), "1");
        assert_eq!(derive("(y-x)").unwrap(), "(0-1)");
    }

    #[test]
    fn product_rule_x_squared() {
        assert_eq!(derive("(x*x)").unwrap(), "(x+x)");
        assert_float_relative_eq!(slope("(x*x)", 3.0), 6.0);
    }

    #[test]
    fn constant_factors() {
        assert_eq!(derive("(3*x)").unwrap(), "3");
        assert_eq!(derive("(x*y)").unwrap(), "y");
    }

    #[test]
    fn power_rule_cube() {
        assert_eq!(derive("(x**3)").unwrap(), "(3*(x**2))");
        assert_eq!(derive("(x**2)").unwrap(), "(2*x)");
    }

    #[test]
    fn exponent_must_be_number_leaf() {
        assert_eq!(derive("(x**(1+2))").unwrap_err(), DerivativeError::UnsupportedOperator(BinOpKind::Exp));
        assert_eq!(derive("(x**(y))").unwrap_err(), DerivativeError::UnsupportedOperator(BinOpKind::Exp));
        assert_eq!(derive("(x**(3))").unwrap(), "(3*(x**2))");
    }

    #[test]
    fn quotient_rule_constant_divisor() {
        assert_eq!(derive("(x/2)").unwrap(), "0.5");
        assert_float_relative_eq!(slope("(1/x)", 2.0), -0.25);
    }

    #[test]
    fn chain_through_power() {
        // d/dx (2x)^2 = 2 * (2x) * 2 = 8x
        assert_float_relative_eq!(slope("((2*x)**2)", 1.5), 12.0);
    }

    #[test]
    fn unsupported_operators() {
        assert_eq!(derive("(x++2)").unwrap_err(), DerivativeError::UnsupportedOperator(BinOpKind::Sum));
        assert_eq!(derive("(x//2)").unwrap_err(), DerivativeError::UnsupportedOperator(BinOpKind::SumDiv));
        assert_eq!(derive("(x**y)").unwrap_err(), DerivativeError::UnsupportedOperator(BinOpKind::Exp));
        // found even where the rules would otherwise never look
        assert_eq!(derive("(x**(2++1))").unwrap_err(), DerivativeError::UnsupportedOperator(BinOpKind::Sum));
    }

    #[test]
    fn malformed_number() {
        let node = Node::binary(BinOpKind::Add, Node::variable("x"), Node::Number(f64::NAN));
        assert_eq!(derivative(&node, "x").unwrap_err(), DerivativeError::MalformedTree);
    }

    #[test]
    fn source_is_untouched() {
        let node = parse("(x*(x+1))").unwrap();
        let copy = node.clone();
        derivative(&node, "x").unwrap();
        assert_eq!(node, copy);
    }
}
