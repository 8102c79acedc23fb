//! Numerical evaluation of expression trees.
//!
//! Evaluation happens in `f64`. Anything that has no finite result, whether it is a division by
//! zero, an overflow, an unknown variable or a cyclic reference, is reported as [`None`]
//! ("undefined") rather than as an error, and propagates upwards through every operator.

pub mod ctxt;
pub mod eval;
pub mod value;

use dask_parser::parser::op::BinOpKind;

/// Returns the `n`-th triangular number, `1 + 2 + ... + n`, computed as `n(n+1)/2`.
pub fn triangular(n: f64) -> f64 {
    n * (n + 1.0) / 2.0
}

/// Applies the operator to the given operands. Returns [`None`] if the result is not finite.
pub fn apply(op: BinOpKind, lhs: f64, rhs: f64) -> Option<f64> {
    let result = match op {
        BinOpKind::Add => lhs + rhs,
        BinOpKind::Sub => lhs - rhs,
        BinOpKind::Mul => lhs * rhs,
        BinOpKind::Div => lhs / rhs,
        BinOpKind::Exp => lhs.powf(rhs),
        BinOpKind::Sum => triangular(lhs) + triangular(rhs),
        BinOpKind::SumDiv => triangular(lhs) / triangular(rhs),
    };

    result.is_finite().then_some(result)
}
