//! The binary operators of the DASK grammar.

use crate::tokenizer::TokenKind;
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    /// `a + b`
    Add,

    /// `a - b`
    Sub,

    /// `a * b`
    Mul,

    /// `a / b`
    Div,

    /// `a ** b`
    Exp,

    /// `a ++ b`, the sum of the triangular numbers of `a` and `b`.
    Sum,

    /// `a // b`, the quotient of the triangular numbers of `a` and `b`.
    SumDiv,
}

impl BinOpKind {
    /// All seven operators, in the order they are listed in the grammar.
    pub const ALL: [BinOpKind; 7] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Sum,
        Self::Exp,
        Self::SumDiv,
    ];

    /// Returns the source symbol of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Exp => "**",
            Self::Sum => "++",
            Self::SumDiv => "//",
        }
    }

    /// Returns the operator represented by the given token kind, if any.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Add => Some(Self::Add),
            TokenKind::Sub => Some(Self::Sub),
            TokenKind::Mul => Some(Self::Mul),
            TokenKind::Div => Some(Self::Div),
            TokenKind::Exp => Some(Self::Exp),
            TokenKind::Sum => Some(Self::Sum),
            TokenKind::SumDiv => Some(Self::SumDiv),
            _ => None,
        }
    }

    /// Returns the relative cost of evaluating the operator.
    ///
    /// This is not a runtime measurement, but a fixed weight: `1` for `+` and `-`, `2` for `*`
    /// and `/`, and `3` for the power and triangular-number operators.
    pub fn cost(self) -> usize {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Exp | Self::Sum | Self::SumDiv => 3,
        }
    }
}

impl Display for BinOpKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
