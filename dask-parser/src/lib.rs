//! Tokenizer and tree builder for DASK expressions.
//!
//! A DASK expression is a fully-parenthesized infix expression over numbers, alphabetic
//! variable names and the operators `+ - * / ++ ** //`, where every binary operation sits in its
//! own pair of parentheses, such as `(Alpha+((2*Beta)**3))`.
//!
//! ```
//! use dask_parser::parser::{node::Node, op::BinOpKind, Parser};
//!
//! let node = Parser::new("(2+(4*X))").parse().unwrap();
//! assert_eq!(node, Node::binary(
//!     BinOpKind::Add,
//!     Node::Number(2.0),
//!     Node::binary(BinOpKind::Mul, Node::Number(4.0), Node::variable("X")),
//! ));
//! assert_eq!(node.to_string(), "(2+(4*X))");
//! ```

pub mod parser;
pub mod tokenizer;
