//! Evaluation, simplification, differentiation and cost analysis of DASK expression trees.
//!
//! Trees are built by [`dask_parser`] and wrapped in a [`ParseTree`], which keeps the original
//! root next to a lazily computed simplified root. Named trees live in a [`Registry`], which is
//! also the context that variables are resolved against during evaluation.
//!
//! ```
//! use dask_compute::{numerical::value::Value, registry::Registry};
//!
//! let mut registry = Registry::new();
//! registry.bind_source("Beta", "(2*Gamma)").unwrap();
//! registry.bind_source("Gamma", "(1+2)").unwrap();
//! registry.bind_source("Alpha", "((5*3)+Beta)").unwrap();
//!
//! assert_eq!(registry.value_of("Alpha"), Some(Value::Integer(21)));
//! ```

pub mod cost;
pub mod expr;
pub mod numerical;
pub mod registry;
pub mod symbolic;
pub mod tree;

pub use expr::NamedExpr;
pub use registry::Registry;
pub use tree::ParseTree;
