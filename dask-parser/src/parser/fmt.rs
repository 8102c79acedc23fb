use std::fmt::{Display, Formatter, Result};
use super::node::Node;

impl Display for Node {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            // negative literals cannot be written in source, so spell them as a subtraction
            Self::Number(n) if *n < 0.0 => write!(f, "(0-{})", -n),
            // `f64` already prints integral values without a fractional part; `-0` is just `0`
            Self::Number(n) if *n == 0.0 => f.write_str("0"),
            Self::Number(n) => write!(f, "{}", n),
            Self::Variable(name) => write!(f, "{}", name),
            Self::Binary { op, lhs, rhs } => write!(f, "({}{}{})", lhs, op, rhs),
        }
    }
}

impl Node {
    /// Returns a wrapper that displays the tree rotated 90 degrees counter-clockwise: the right
    /// subtree is printed above its parent and the left subtree below, with one `.` of
    /// indentation per level of depth.
    ///
    /// ```
    /// use dask_parser::parser::parse;
    ///
    /// let node = parse("(2+(4*5))").unwrap();
    /// assert_eq!(node.rotated().to_string(), "..5\n.*\n..4\n+\n.2\n");
    /// ```
    pub fn rotated(&self) -> Rotated<'_> {
        Rotated(self)
    }
}

/// Sideways rendering of a [`Node`], created by [`Node::rotated`].
#[derive(Debug, Clone, Copy)]
pub struct Rotated<'a>(&'a Node);

impl Rotated<'_> {
    fn fmt_at(node: &Node, depth: usize, f: &mut Formatter) -> Result {
        if let Node::Binary { op, lhs, rhs } = node {
            Self::fmt_at(rhs, depth + 1, f)?;
            writeln!(f, "{}{}", ".".repeat(depth), op)?;
            Self::fmt_at(lhs, depth + 1, f)
        } else {
            writeln!(f, "{}{}", ".".repeat(depth), node)
        }
    }
}

impl Display for Rotated<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        Self::fmt_at(self.0, 0, f)
    }
}
