//! Text formatting for everything the menu prints or writes to a file.

use dask_compute::{
    cost::{operator_weights, CostReport, Metrics},
    numerical::value::Value,
    symbolic::simplify::step::Step,
    NamedExpr,
    Registry,
};
use std::fmt::Write;

/// Formats a value, or `None` if it is undefined.
pub fn value(value: Option<Value>) -> String {
    value.map_or_else(|| "None".to_string(), |value| value.to_string())
}

/// Formats one expression as `name=source=> value`.
pub fn binding(expr: &NamedExpr) -> String {
    format!("{}={}=> {}", expr.name(), expr.source(), value(expr.value()))
}

/// Formats all expressions, alphabetically, one per line.
pub fn listing(registry: &Registry) -> String {
    let mut out = String::new();
    for expr in registry {
        let _ = writeln!(out, "{}", binding(expr));
    }
    out
}

/// Formats the expressions grouped by value, highest value first, with a blank line between
/// groups.
pub fn sorted(registry: &Registry) -> String {
    let mut out = String::new();
    for (i, (group_value, exprs)) in registry.sorted_by_value().into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "*** Expressions with value=> {}", value(group_value));
        for expr in exprs {
            let _ = writeln!(out, "{}={}", expr.name(), expr.source());
        }
    }
    out
}

/// Formats the result of evaluating a single variable: its tree, rotated sideways, followed by
/// its value.
pub fn evaluation(expr: &NamedExpr) -> String {
    let mut out = String::from("Expression Tree:\n");
    if let Some(root) = expr.tree().original() {
        let _ = write!(out, "{}", root.rotated());
    }
    let _ = writeln!(out, "Value for variable \"{}\" is {}", expr.name(), value(expr.value()));
    out
}

/// Formats the list of simplification steps, numbered from 1.
pub fn steps(steps: &[Step]) -> String {
    if steps.is_empty() {
        return "No simplification steps apply.\n".to_string();
    }

    let mut out = String::from("Steps:\n");
    for (i, step) in steps.iter().enumerate() {
        let _ = writeln!(out, "\t{}. {}", i + 1, step);
    }
    out
}

/// Formats one row of the cost table.
fn row(out: &mut String, label: &str, before: usize, after: usize) {
    let _ = writeln!(out, "{:<16}{:>10}{:>12}", label, before, after);
}

/// Formats the cost report as a table comparing the original and simplified trees.
pub fn cost(report: &CostReport) -> String {
    let CostReport { original, simplified } = report;
    let rows: [(&str, fn(&Metrics) -> usize); 5] = [
        ("total nodes", |m| m.total_nodes),
        ("operator nodes", |m| m.operator_nodes),
        ("leaf nodes", |m| m.leaf_nodes),
        ("tree height", |m| m.height),
        ("weighted cost", |m| m.weighted_cost),
    ];

    let mut out = String::from("Cost analysis:\n");
    let _ = writeln!(out, "{:<16}{:>10}{:>12}", "", "original", "simplified");
    for (label, metric) in rows {
        row(&mut out, label, metric(original), metric(simplified));
    }

    match report.savings_percent() {
        Some(percent) => {
            let _ = writeln!(out, "Saved {} weighted cost ({:.1}%)", report.savings(), percent);
        },
        None => out.push_str("Nothing to save, the expression has no operators\n"),
    }

    let weights = operator_weights()
        .iter()
        .map(|(op, weight)| format!("{}={}", op, weight))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "Operator weights: {}", weights);
    out
}

#[cfg(test)]
mod tests {
    use dask_compute::symbolic::simplify_with_steps;
    use dask_parser::parser::parse;
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
    fn listing_format() {
        let registry = registry(&[("b", "(a*2)"), ("a", "(1/4)"), ("c", "(z+1)")]);
        assert_eq!(listing(&registry), "a=(1/4)=> 0.25\nb=(a*2)=> 0.5\nc=(z+1)=> None\n");
    }

    #[test]
    fn sorted_groups() {
        let registry = registry(&[("x", "3"), ("y", "(1+2)"), ("z", "10"), ("w", "(q*2)")]);
        assert_eq!(
            sorted(&registry),
            "*** Expressions with value=> 10\n\
             z=10\n\
             \n\
             *** Expressions with value=> 3\n\
             x=3\n\
             y=(1+2)\n\
             \n\
             *** Expressions with value=> None\n\
             w=(q*2)\n",
        );
    }

    #[test]
    fn sorted_empty() {
        assert_eq!(sorted(&Registry::new()), "");
    }

    #[test]
    fn evaluation_format() {
        let registry = registry(&[("A", "(2+(4*5))")]);
        assert_eq!(
            evaluation(registry.get("A").unwrap()),
            "Expression Tree:\n..5\n.*\n..4\n+\n.2\nValue for variable \"A\" is 22\n",
        );
    }

    #[test]
    fn steps_format() {
        let (_, taken) = simplify_with_steps(&parse("((x*1)+0)").unwrap());
        assert_eq!(steps(&taken), "Steps:\n\t1. (a*1) = a\n\t2. (a+0) = a\n");
        assert_eq!(steps(&[]), "No simplification steps apply.\n");
    }

    #[test]
    fn cost_table() {
        let registry = registry(&[("f", "((x*1)+(2*3))")]);
        let table = cost(&registry.get("f").unwrap().tree().cost());
        let lines = table.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Cost analysis:");
        assert_eq!(lines[2], "total nodes              7           3");
        assert_eq!(lines[6], "weighted cost            5           1");
        assert_eq!(lines[7], "Saved 4 weighted cost (80.0%)");
        assert_eq!(lines[8], "Operator weights: +=1 -=1 *=2 /=2 ++=3 **=3 //=3");
    }
}
