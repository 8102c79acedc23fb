use crate::{cost::CostReport, symbolic::{derivative::{derivative, DerivativeError}, simplify}};
use dask_parser::parser::{error::Error, node::Node, Parser};
use once_cell::unsync::OnceCell;

/// An expression tree, holding both the tree as it was built and its simplified form.
///
/// The simplified root is computed the first time it is requested, from a clone of the original
/// root; the two never share nodes, so the original tree is always available as it was written.
#[derive(Debug, Clone, Default)]
pub struct ParseTree {
    /// The root of the tree as it was built.
    original: Option<Node>,

    /// The root of the simplified tree, computed on first use.
    simplified: OnceCell<Option<Node>>,
}

impl ParseTree {
    /// Creates a tree with the given root.
    pub fn new(root: Node) -> Self {
        Self {
            original: Some(root),
            simplified: OnceCell::new(),
        }
    }

    /// Creates a tree with no root.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the tree of the given source.
    pub fn parse(source: &str) -> Result<Self, Error> {
        Parser::new(source).parse().map(Self::new)
    }

    /// Returns true if the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.original.is_none()
    }

    /// Returns the root of the tree as it was built.
    pub fn original(&self) -> Option<&Node> {
        self.original.as_ref()
    }

    /// Returns the root of the simplified tree, simplifying the original tree if this has not
    /// been done yet.
    pub fn simplified(&self) -> Option<&Node> {
        self.simplified
            .get_or_init(|| self.original.as_ref().map(simplify))
            .as_ref()
    }

    /// Returns the root to evaluate: the simplified root, or the original root if there is no
    /// simplified root.
    pub fn root(&self) -> Option<&Node> {
        self.simplified().or(self.original.as_ref())
    }

    /// Differentiates the tree with respect to the given variable, returning the derivative as a
    /// new tree.
    pub fn derivative(&self, var: &str) -> Result<ParseTree, DerivativeError> {
        let root = self.original.as_ref().ok_or(DerivativeError::MalformedTree)?;
        derivative(root, var).map(Self::new)
    }

    /// Computes the cost metrics of the original and simplified trees.
    pub fn cost(&self) -> CostReport {
        CostReport::of(self)
    }
}

#[cfg(test)]
mod tests {
    use dask_parser::parser::op::BinOpKind;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn empty_tree() {
        let tree = ParseTree::empty();
        assert!(tree.is_empty());
        assert_eq!(tree.original(), None);
        assert_eq!(tree.simplified(), None);
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn simplified_is_separate_from_original() {
        let tree = ParseTree::parse("((x*1)+(2*3))").unwrap();
        assert_eq!(
            tree.simplified(),
            Some(&Node::binary(BinOpKind::Add, Node::variable("x"), Node::Number(6.0))),
        );
        assert_eq!(tree.original().unwrap().to_string(), "((x*1)+(2*3))");
        assert_eq!(tree.root().unwrap().to_string(), "(x+6)");
    }

    #[test]
    fn parse_errors_propagate() {
        assert!(ParseTree::parse("(1+)").is_err());
        assert!(ParseTree::parse("").is_err());
    }

    #[test]
    fn derivative_of_empty_tree() {
        assert_eq!(ParseTree::empty().derivative("x").unwrap_err(), DerivativeError::MalformedTree);
    }

    #[test]
    fn derivative_tree() {
        let tree = ParseTree::parse("(x**3)").unwrap();
        let derived = tree.derivative("x").unwrap();
        assert_eq!(derived.original().unwrap().to_string(), "(3*(x**2))");
    }
}
