//! Symbolic manipulation of expression trees.
//!
//! # Simplification
//!
//! [`simplify()`] rewrites a tree bottom-up: the children of a node are simplified first, then at
//! most one rule is applied to the node itself. The rules are deliberately local. They fold
//! operations on two numbers into a single number, remove additive and multiplicative
//! identities, and collapse products with zero, but they never reorder operands or combine like
//! terms, so `(x+x)` stays as it is.
//!
//! ```
//! use dask_compute::symbolic::simplify;
//! use dask_parser::parser::parse;
//!
//! let tree = parse("((x*1)+(2*(3+4)))").unwrap();
//! assert_eq!(simplify(&tree).to_string(), "(x+14)");
//! ```
//!
//! # Differentiation
//!
//! [`derivative()`](derivative::derivative) differentiates a tree with respect to one variable
//! using the sum, product, quotient and power rules, then simplifies the result.
//!
//! ```
//! use dask_compute::symbolic::derivative::derivative;
//! use dask_parser::parser::parse;
//!
//! let tree = parse("(x**3)").unwrap();
//! assert_eq!(derivative(&tree, "x").unwrap().to_string(), "(3*(x**2))");
//! ```

pub mod derivative;
pub mod simplify;
pub mod step_collector;

pub use simplify::{simplify, simplify_with_steps};
pub use step_collector::StepCollector;
