//! Errors produced while validating and building expression trees.
//!
//! All errors are [`dask_error::Error`]s: a set of spans into the source code plus an
//! [`ErrorKind`](dask_error::ErrorKind) from the [`kind`] module describing what went wrong.

pub mod kind;

pub use dask_error::Error;
