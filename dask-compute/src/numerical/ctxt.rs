use crate::tree::ParseTree;
use std::collections::HashMap;

/// The maximum number of variables that may be resolved inside one another during a single
/// evaluation. Exceeding it makes the innermost result undefined.
pub const MAX_RECURSION_DEPTH: usize = 1 << 11;

/// A read-only context to evaluate expressions in, mapping variable names to the trees bound to
/// them.
pub trait Ctxt {
    /// Returns the tree bound to the given name, if any.
    fn lookup(&self, name: &str) -> Option<&ParseTree>;
}

/// The empty context, in which every variable is undefined.
impl Ctxt for () {
    fn lookup(&self, _: &str) -> Option<&ParseTree> {
        None
    }
}

impl Ctxt for HashMap<String, ParseTree> {
    fn lookup(&self, name: &str) -> Option<&ParseTree> {
        self.get(name)
    }
}
