use crate::tree::ParseTree;
use dask_parser::parser::node::Node;
use std::collections::{HashMap, HashSet};
use super::{apply, ctxt::{Ctxt, MAX_RECURSION_DEPTH}, value::Value};
use tracing::{trace, warn};

/// Tracks the variables currently being resolved along one evaluation path, and the results of
/// the variables that have already been resolved.
///
/// A name is inserted when its tree starts being evaluated and removed when that evaluation
/// returns. Meeting a name that is already in the set means the variable refers to itself
/// (directly, or through other variables), so that branch is undefined. Because names are removed
/// on the way back up, a variable that is used twice in sibling branches, such as `B` in `(B+B)`,
/// is not mistaken for a cycle.
///
/// Finished results are remembered, so every variable is evaluated at most once per resolver.
/// A variable that came out undefined because it reached a name on the path is part of that
/// cycle, so it is undefined on its own as well and the result can be kept. Results cut short by
/// [`MAX_RECURSION_DEPTH`] depend on the path and are not kept.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    /// The names on the current resolution path.
    resolving: HashSet<String>,

    /// Results of the names that were fully resolved.
    finished: HashMap<String, Option<f64>>,

    /// Whether the recursion limit was hit since the innermost pending resolution started.
    limited: bool,
}

impl Resolver {
    /// Creates a resolver with an empty resolution path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates the tree bound to the given name.
    ///
    /// This differs from evaluating the variable's tree directly in that the variable itself is
    /// on the resolution path from the start, so a variable referring to itself is caught one
    /// level earlier.
    pub fn resolve(&mut self, name: &str, ctxt: &dyn Ctxt) -> Option<f64> {
        if let Some(result) = self.finished.get(name) {
            return *result;
        }

        let Some(tree) = ctxt.lookup(name) else {
            trace!(variable = name, "variable is not defined");
            return None;
        };

        if self.resolving.contains(name) {
            trace!(variable = name, "cyclic reference");
            return None;
        }

        if self.resolving.len() >= MAX_RECURSION_DEPTH {
            warn!(variable = name, depth = self.resolving.len(), "maximum recursion depth exceeded");
            self.limited = true;
            return None;
        }

        let outer_limited = std::mem::take(&mut self.limited);
        self.resolving.insert(name.to_string());
        let result = tree.root().and_then(|root| self.eval_node(root, ctxt));
        self.resolving.remove(name);

        if !self.limited {
            self.finished.insert(name.to_string(), result);
        }
        self.limited |= outer_limited;
        result
    }

    /// Evaluates the given node.
    pub fn eval_node(&mut self, node: &Node, ctxt: &dyn Ctxt) -> Option<f64> {
        match node {
            Node::Number(n) => n.is_finite().then_some(*n),
            Node::Variable(name) => self.resolve(name, ctxt),
            Node::Binary { op, lhs, rhs } => {
                let lhs = self.eval_node(lhs, ctxt)?;
                let rhs = self.eval_node(rhs, ctxt)?;
                apply(*op, lhs, rhs)
            },
        }
    }
}

/// Any type that can be evaluated to produce a value.
pub trait Eval {
    /// Evaluate the expression to a raw number, resolving variables through the given resolver.
    /// Returns [`None`] if the expression is undefined.
    fn eval_with(&self, ctxt: &dyn Ctxt, resolver: &mut Resolver) -> Option<f64>;

    /// Evaluate the expression to produce a value, using the given context. Returns [`None`] if
    /// the expression is undefined.
    fn eval(&self, ctxt: &dyn Ctxt) -> Option<Value> {
        Value::from_f64(self.eval_with(ctxt, &mut Resolver::new())?)
    }

    /// Evaluate the expression using the empty context, in which every variable is undefined.
    fn eval_default(&self) -> Option<Value> {
        self.eval(&())
    }
}

impl Eval for Node {
    fn eval_with(&self, ctxt: &dyn Ctxt, resolver: &mut Resolver) -> Option<f64> {
        resolver.eval_node(self, ctxt)
    }
}

impl Eval for ParseTree {
    fn eval_with(&self, ctxt: &dyn Ctxt, resolver: &mut Resolver) -> Option<f64> {
        resolver.eval_node(self.root()?, ctxt)
    }
}

/// Eval tests depend on the parser, so ensure that parser tests pass before running these.
#[cfg(test)]
mod tests {
    use assert_float_eq::{afe_abs, afe_relative_error_msg, afe_is_relative_eq, assert_float_relative_eq};
    use dask_parser::parser::{op::BinOpKind, parse};
    use super::*;

    /// Builds a context from `(name, source)` pairs.
    fn ctxt(bindings: &[(&str, &str)]) -> HashMap<String, ParseTree> {
        bindings.iter()
            .map(|(name, source)| (name.to_string(), ParseTree::parse(source).unwrap()))
            .collect()
    }

    fn eval_name(name: &str, ctxt: &dyn Ctxt) -> Option<Value> {
        Resolver::new().resolve(name, ctxt).and_then(Value::from_f64)
    }

    fn eval_source(source: &str) -> Option<Value> {
        parse(source).unwrap().eval_default()
    }

    #[test]
    fn arithmetic() {
        assert_eq!(eval_source("((5*3)+4)"), Some(Value::Integer(19)));
        assert_eq!(eval_source("(2+(4*5))"), Some(Value::Integer(22)));
        assert_eq!(eval_source("((10-4)/4)"), Some(Value::Float(1.5)));
        assert_eq!(eval_source("(2**(1+2))"), Some(Value::Integer(8)));
        assert_eq!(eval_source("7"), Some(Value::Integer(7)));
    }

    #[test]
    fn triangular_operators() {
        assert_eq!(eval_source("(3++4)"), Some(Value::Integer(16)));
        assert_float_relative_eq!(eval_source("(3//4)").unwrap().as_f64(), 0.6);
        assert_eq!(eval_source("(4//4)"), Some(Value::Integer(1)));
    }

    #[test]
    fn undefined_results() {
        assert_eq!(eval_source("(1/0)"), None);
        assert_eq!(eval_source("(0/0)"), None);
        assert_eq!(eval_source("(5//0)"), None);
        assert_eq!(eval_source("((1/0)*0)"), None);
    }

    #[test]
    fn unknown_variables() {
        assert_eq!(eval_source("(x+1)"), None);
        assert_eq!(parse("(x+1)").unwrap().eval(&ctxt(&[("y", "2")])), None);
    }

    #[test]
    fn variables() {
        let ctxt = ctxt(&[("Alpha", "((5*3)+Beta)"), ("Beta", "(2*Gamma)"), ("Gamma", "(1+2)")]);
        assert_eq!(eval_name("Alpha", &ctxt), Some(Value::Integer(21)));
        assert_eq!(eval_name("Gamma", &ctxt), Some(Value::Integer(3)));
        assert_eq!(parse("(Alpha-Beta)").unwrap().eval(&ctxt), Some(Value::Integer(15)));
    }

    #[test]
    fn mutual_cycle() {
        let ctxt = ctxt(&[("A", "(B)"), ("B", "(A)")]);
        assert_eq!(eval_name("A", &ctxt), None);
        assert_eq!(eval_name("B", &ctxt), None);
    }

    #[test]
    fn self_reference() {
        let ctxt = ctxt(&[("A", "(A+1)"), ("B", "2")]);
        assert_eq!(eval_name("A", &ctxt), None);
        assert_eq!(eval_name("B", &ctxt), Some(Value::Integer(2)));
    }

    #[test]
    fn repeated_siblings_are_not_cycles() {
        let ctxt = ctxt(&[("A", "((B+B)*C)"), ("B", "(C+1)"), ("C", "3")]);
        assert_eq!(eval_name("A", &ctxt), Some(Value::Integer(24)));
    }

    #[test]
    fn cycle_makes_only_its_branch_undefined() {
        // `A` is undefined because one of its operands is, but `C` is still fine on its own
        let ctxt = ctxt(&[("A", "(B+C)"), ("B", "(A*2)"), ("C", "5")]);
        assert_eq!(eval_name("A", &ctxt), None);
        assert_eq!(eval_name("C", &ctxt), Some(Value::Integer(5)));
    }

    /// Builds a context where `v0` refers to `v1`, `v1` to `v2`, and so on, with the last
    /// variable bound to `1`.
    fn chain(len: usize) -> HashMap<String, ParseTree> {
        (0..len)
            .map(|i| {
                let root = if i + 1 == len {
                    Node::Number(1.0)
                } else {
                    Node::variable(format!("v{}", i + 1))
                };
                (format!("v{}", i), ParseTree::new(root))
            })
            .collect()
    }

    /// Builds a context where `d0` is `(d1+d1)`, `d1` is `(d2+d2)`, and so on, with the last
    /// variable bound to `1`.
    fn diamonds(len: usize) -> HashMap<String, ParseTree> {
        (0..len)
            .map(|i| {
                let root = if i + 1 == len {
                    Node::Number(1.0)
                } else {
                    let next = format!("d{}", i + 1);
                    Node::binary(BinOpKind::Add, Node::variable(next.clone()), Node::variable(next))
                };
                (format!("d{}", i), ParseTree::new(root))
            })
            .collect()
    }

    #[test]
    fn shared_references_resolve_once() {
        // without remembering finished names this would take 2^39 lookups
        assert_eq!(eval_name("d0", &diamonds(40)), Some(Value::Integer(1 << 39)));
    }

    #[test]
    fn remembered_cycle_results() {
        // `B` is first met while `A` is on the path; it is still undefined when asked directly
        let ctxt = ctxt(&[("A", "(B+1)"), ("B", "(A*2)"), ("C", "(B+1)")]);
        let mut resolver = Resolver::new();
        assert_eq!(resolver.resolve("A", &ctxt), None);
        assert_eq!(resolver.resolve("B", &ctxt), None);
        assert_eq!(resolver.resolve("C", &ctxt), None);
        assert_eq!(eval_name("B", &ctxt), None);
    }

    #[test]
    fn recursion_limit() {
        // resolution recurses once per variable, so give the test thread room to do so
        std::thread::Builder::new()
            .stack_size(64 * 1024 * 1024)
            .spawn(|| {
                assert_eq!(eval_name("v0", &chain(100)), Some(Value::Integer(1)));
                assert_eq!(eval_name("v0", &chain(MAX_RECURSION_DEPTH)), Some(Value::Integer(1)));
                assert_eq!(eval_name("v0", &chain(MAX_RECURSION_DEPTH + 1)), None);
            })
            .unwrap()
            .join()
            .unwrap();
    }
}
