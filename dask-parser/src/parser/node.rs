//! The expression tree produced by the [`Parser`](super::Parser).
//!
//! A [`Node`] is either a leaf (a number or a variable name) or a binary operator node that
//! exclusively owns its two children. The kind of a node is fixed when it is constructed, so
//! there is no such thing as an operator node without an operator, or a leaf with children.

use super::op::BinOpKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single node of an expression tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// A numeric literal, such as `2` or `3.5`.
    Number(f64),

    /// A variable name, such as `x` or `Alpha`.
    Variable(String),

    /// A binary operation, such as `(a+b)`.
    Binary {
        /// The operator.
        op: BinOpKind,

        /// The left-hand operand.
        lhs: Box<Node>,

        /// The right-hand operand.
        rhs: Box<Node>,
    },
}

impl Node {
    /// Creates a variable leaf.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Creates a binary operator node.
    pub fn binary(op: BinOpKind, lhs: Node, rhs: Node) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Returns true if the node is a numeric literal.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns true if the node is a variable name.
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        !self.is_operator()
    }

    /// Returns true if the node is a binary operator node.
    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Binary { .. })
    }

    /// If the node is a numeric literal, returns its value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns true if the node is the numeric literal `value`.
    pub fn is_number_eq(&self, value: f64) -> bool {
        self.as_number() == Some(value)
    }

    /// If the node is a variable, returns its name.
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Self::Variable(name) => Some(name),
            _ => None,
        }
    }
}
