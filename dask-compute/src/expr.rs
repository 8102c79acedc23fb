use crate::{numerical::value::Value, tree::ParseTree};
use dask_parser::parser::error::Error;

/// An expression bound to a variable name.
///
/// The tree is built once, when the expression is created. The value is only written by the
/// [`Registry`](crate::registry::Registry) when it re-evaluates all of its expressions, since
/// the value of one expression can change whenever another one is rebound.
#[derive(Debug, Clone)]
pub struct NamedExpr {
    /// The variable name.
    name: String,

    /// The source text of the expression.
    source: String,

    /// The tree of the expression.
    tree: ParseTree,

    /// The last computed value of the expression, or [`None`] if it is undefined.
    value: Option<Value>,
}

impl NamedExpr {
    /// Builds the tree of the given source and binds it to the given name.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Result<Self, Error> {
        let source = source.into();
        let tree = ParseTree::parse(&source)?;
        Ok(Self::from_tree(name, source, tree))
    }

    /// Binds an already built tree to the given name.
    pub fn from_tree(name: impl Into<String>, source: impl Into<String>, tree: ParseTree) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            tree,
            value: None,
        }
    }

    /// Returns the variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the source text of the expression.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the tree of the expression.
    pub fn tree(&self) -> &ParseTree {
        &self.tree
    }

    /// Returns the last computed value of the expression.
    pub fn value(&self) -> Option<Value> {
        self.value
    }

    pub(crate) fn set_value(&mut self, value: Option<Value>) {
        self.value = value;
    }
}
