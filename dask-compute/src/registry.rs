use crate::{
    expr::NamedExpr,
    numerical::{ctxt::Ctxt, eval::Resolver, value::Value},
    symbolic::derivative::DerivativeError,
    tree::ParseTree,
};
use dask_parser::parser::{error::Error, validate::Binding};
use levenshtein::levenshtein;
use std::{collections::BTreeMap, fmt::{Display, Formatter}};
use tracing::{debug, info};

/// An error that can occur when deriving a new variable from an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No expression is bound to the given name.
    UnknownName(String),

    /// The variable to differentiate with respect to is not a valid variable name.
    InvalidVariable(String),

    /// The expression could not be differentiated.
    Derivative(DerivativeError),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::UnknownName(name) => write!(f, "variable `{}` is not defined", name),
            RegistryError::InvalidVariable(var) => {
                write!(f, "`{}` is not a valid variable name", var)
            },
            RegistryError::Derivative(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<DerivativeError> for RegistryError {
    fn from(err: DerivativeError) -> Self {
        RegistryError::Derivative(err)
    }
}

/// The set of named expressions known to the program.
///
/// The registry is also the context that variables are resolved against. Expressions may refer
/// to variables that are bound later, or not at all; whenever a binding changes, every value is
/// recomputed with [`Registry::refresh`], so stored values always reflect the current bindings.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// The expressions, by name.
    exprs: BTreeMap<String, NamedExpr>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds an expression to a name, replacing the previous expression with that name, and
    /// re-evaluates all expressions. Returns the replaced expression, if any.
    pub fn insert(&mut self, expr: NamedExpr) -> Option<NamedExpr> {
        let name = expr.name().to_string();
        let previous = self.exprs.insert(name.clone(), expr);
        match &previous {
            Some(old) => info!(%name, old = old.source(), "rebound variable"),
            None => debug!(%name, "bound variable"),
        }
        self.refresh();
        previous
    }

    /// Builds the tree of a validated binding line and binds it.
    pub fn bind(&mut self, binding: &Binding) -> Result<Option<NamedExpr>, Error> {
        self.bind_source(binding.name, binding.source)
    }

    /// Builds the tree of the given source and binds it to the given name.
    pub fn bind_source(&mut self, name: &str, source: &str) -> Result<Option<NamedExpr>, Error> {
        let expr = NamedExpr::new(name, source)?;
        Ok(self.insert(expr))
    }

    /// Re-evaluates every expression against the current bindings.
    ///
    /// The values are all computed first and only then stored, so the order in which expressions
    /// are visited cannot influence the result. One [`Resolver`] is shared by the whole pass, so
    /// every expression is evaluated once no matter how many others refer to it.
    pub fn refresh(&mut self) {
        let mut resolver = Resolver::new();
        let values = self.exprs.keys()
            .map(|name| resolver.resolve(name, &*self).and_then(Value::from_f64))
            .collect::<Vec<_>>();

        for (expr, value) in self.exprs.values_mut().zip(values) {
            expr.set_value(value);
        }

        debug!(count = self.exprs.len(), "refreshed values");
    }

    /// Returns the expression with the given name.
    pub fn get(&self, name: &str) -> Option<&NamedExpr> {
        self.exprs.get(name)
    }

    /// Returns the stored value of the expression with the given name. Returns [`None`] if the
    /// name is unknown or the expression is undefined.
    pub fn value_of(&self, name: &str) -> Option<Value> {
        self.exprs.get(name)?.value()
    }

    /// Returns true if an expression is bound to the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.exprs.contains_key(name)
    }

    /// Returns an iterator over the expressions, in alphabetical order of their names.
    pub fn iter(&self) -> impl Iterator<Item = &NamedExpr> {
        self.exprs.values()
    }

    /// Returns the number of expressions.
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Returns true if there are no expressions.
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Returns the names that are similar to the given name, for "did you mean" hints.
    pub fn similar_names(&self, name: &str) -> Vec<&str> {
        self.exprs.keys()
            .filter(|other| levenshtein(other, name) < 2)
            .map(String::as_str)
            .collect()
    }

    /// Groups the expressions by value. Groups are ordered from the highest value to the lowest,
    /// followed by the group of undefined expressions; inside each group, expressions are in
    /// alphabetical order.
    pub fn sorted_by_value(&self) -> Vec<(Option<Value>, Vec<&NamedExpr>)> {
        let mut defined = Vec::new();
        let mut undefined = Vec::new();
        for expr in self.exprs.values() {
            match expr.value() {
                Some(value) => defined.push((value, expr)),
                None => undefined.push(expr),
            }
        }

        // stable, so names stay alphabetical within equal values
        defined.sort_by(|(a, _), (b, _)| b.total_cmp(a));

        let mut groups: Vec<(Option<Value>, Vec<&NamedExpr>)> = Vec::new();
        for (value, expr) in defined {
            match groups.last_mut() {
                Some((Some(last), exprs)) if *last == value => exprs.push(expr),
                _ => groups.push((Some(value), vec![expr])),
            }
        }

        if !undefined.is_empty() {
            groups.push((None, undefined));
        }
        groups
    }

    /// Differentiates the expression with the given name with respect to `var`, and binds the
    /// result to the name `d{name}d{var}`. Returns the new expression.
    pub fn bind_derivative(&mut self, name: &str, var: &str) -> Result<&NamedExpr, RegistryError> {
        if var.is_empty() || !var.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RegistryError::InvalidVariable(var.to_string()));
        }

        let expr = self.exprs.get(name).ok_or_else(|| RegistryError::UnknownName(name.to_string()))?;
        let derived: ParseTree = expr.tree().derivative(var)?;
        let source = derived.original().map(ToString::to_string).unwrap_or_default();
        let derived_name = format!("d{}d{}", name, var);

        debug!(%name, var, derived = %source, "differentiated variable");
        self.insert(NamedExpr::from_tree(derived_name.clone(), source, derived));

        self.exprs.get(&derived_name).ok_or(RegistryError::UnknownName(derived_name))
    }
}

impl Ctxt for Registry {
    fn lookup(&self, name: &str) -> Option<&ParseTree> {
        self.exprs.get(name).map(NamedExpr::tree)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a NamedExpr;
    type IntoIter = std::collections::btree_map::Values<'a, String, NamedExpr>;

    fn into_iter(self) -> Self::IntoIter {
        self.exprs.values()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn registry(bindings: &[(&str, &str)]) -> Registry {
        let mut registry = Registry::new();
        for (name, source) in bindings {
            registry.bind_source(name, source).unwrap();
        }
        registry
    }

    #[test]
    fn forward_references() {
        // `Alpha` refers to `Beta` before it is bound
        let registry = registry(&[("Alpha", "(Beta*2)"), ("Beta", "(1+2)")]);
        assert_eq!(registry.value_of("Alpha"), Some(Value::Integer(6)));
        assert_eq!(registry.value_of("Beta"), Some(Value::Integer(3)));
    }

    #[test]
    fn rebinding_updates_dependents() {
        let mut registry = registry(&[("a", "(b+1)"), ("b", "1")]);
        assert_eq!(registry.value_of("a"), Some(Value::Integer(2)));

        let previous = registry.bind_source("b", "(10/4)").unwrap();
        assert_eq!(previous.map(|e| e.source().to_string()).as_deref(), Some("1"));
        assert_eq!(registry.value_of("a"), Some(Value::Float(3.5)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn failed_bind_keeps_previous() {
        let mut registry = registry(&[("a", "5")]);
        assert!(registry.bind_source("a", "(5*3+4)").is_err());
        assert_eq!(registry.get("a").unwrap().source(), "5");
    }

    #[test]
    fn cycles_are_undefined() {
        let registry = registry(&[("A", "(B)"), ("B", "(A)"), ("C", "4")]);
        assert_eq!(registry.value_of("A"), None);
        assert_eq!(registry.value_of("B"), None);
        assert_eq!(registry.value_of("C"), Some(Value::Integer(4)));
    }

    #[test]
    fn deep_shared_references() {
        // names are letters only: `daa`, `dab`, ..., `dbn`
        let name = |i: u8| format!("d{}{}", (b'a' + i / 26) as char, (b'a' + i % 26) as char);

        // each line doubles the number of paths to the last name, bound last as in a loaded file
        let mut registry = Registry::new();
        for i in 0..39 {
            let next = name(i + 1);
            registry.bind_source(&name(i), &format!("({0}+{0})", next)).unwrap();
        }
        registry.bind_source(&name(39), "1").unwrap();
        assert_eq!(registry.len(), 40);
        assert_eq!(registry.value_of(&name(0)), Some(Value::Integer(1 << 39)));
        assert_eq!(registry.value_of(&name(20)), Some(Value::Integer(1 << 19)));
    }

    #[test]
    fn iteration_is_alphabetical() {
        let registry = registry(&[("Gamma", "1"), ("Alpha", "2"), ("Beta", "3")]);
        let names = registry.iter().map(NamedExpr::name).collect::<Vec<_>>();
        assert_eq!(names, ["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn suggestions() {
        let registry = registry(&[("Alpha", "1"), ("Alpah", "2"), ("Beta", "3")]);
        assert_eq!(registry.similar_names("Alpa"), ["Alpah", "Alpha"]);
        assert_eq!(registry.similar_names("Bet"), ["Beta"]);
        assert_eq!(registry.similar_names("Zeta"), ["Beta"]);
        assert!(registry.similar_names("Omega").is_empty());
    }

    #[test]
    fn grouped_by_value() {
        let registry = registry(&[
            ("d", "2"),
            ("a", "(1+1)"),
            ("c", "(x+1)"),
            ("b", "7"),
            ("e", "(1/0)"),
            ("f", "0.5"),
        ]);
        let groups = registry.sorted_by_value()
            .into_iter()
            .map(|(value, exprs)| (value, exprs.into_iter().map(NamedExpr::name).collect::<Vec<_>>()))
            .collect::<Vec<_>>();
        assert_eq!(groups, vec![
            (Some(Value::Integer(7)), vec!["b"]),
            (Some(Value::Integer(2)), vec!["a", "d"]),
            (Some(Value::Float(0.5)), vec!["f"]),
            (None, vec!["c", "e"]),
        ]);
    }

    #[test]
    fn derivative_binding() {
        let mut registry = registry(&[("f", "(x**3)"), ("x", "2")]);
        let derived = registry.bind_derivative("f", "x").unwrap();
        assert_eq!(derived.name(), "dfdx");
        assert_eq!(derived.source(), "(3*(x**2))");
        assert_eq!(derived.value(), Some(Value::Integer(12)));
        assert!(registry.contains("dfdx"));
    }

    #[test]
    fn derived_source_can_be_bound_again() {
        let mut registry = registry(&[("g", "(1/x)"), ("x", "2")]);
        let source = registry.bind_derivative("g", "x").unwrap().source().to_string();
        assert_eq!(source, "((0-1)/(x**2))");

        let line = format!("h={}", source);
        let binding = dask_parser::parser::validate::parse_binding(&line).unwrap();
        registry.bind(&binding).unwrap();
        assert_eq!(registry.value_of("h"), Some(Value::Float(-0.25)));
        assert_eq!(registry.value_of("h"), registry.value_of("dgdx"));
    }

    #[test]
    fn derivative_errors() {
        let mut registry = registry(&[("f", "(x++2)")]);
        assert_eq!(
            registry.bind_derivative("g", "x").unwrap_err(),
            RegistryError::UnknownName("g".to_string()),
        );
        assert_eq!(
            registry.bind_derivative("f", "x1").unwrap_err(),
            RegistryError::InvalidVariable("x1".to_string()),
        );
        assert!(matches!(
            registry.bind_derivative("f", "x").unwrap_err(),
            RegistryError::Derivative(DerivativeError::UnsupportedOperator(_)),
        ));
    }
}
