use std::fmt::{Display, Formatter};

/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `(2+3) = 5`
    ///
    /// An operation on two numbers was replaced by its result.
    ConstantFold,

    /// `(a+0) = a`
    /// `(0+a) = a`
    AddZero,

    /// `(a*1) = a`
    /// `(1*a) = a`
    MultiplyOne,

    /// `(a/1) = a`
    DivideOne,

    /// `(a**1) = a`
    PowerOne,

    /// `(a**0) = 1`
    PowerZero,

    /// `(a*0) = 0`
    /// `(0*a) = 0`
    MultiplyZero,
}

impl Step {
    /// Returns a short description of the rewrite.
    pub fn description(self) -> &'static str {
        match self {
            Step::ConstantFold => "fold constant operation",
            Step::AddZero => "(a+0) = a",
            Step::MultiplyOne => "(a*1) = a",
            Step::DivideOne => "(a/1) = a",
            Step::PowerOne => "(a**1) = a",
            Step::PowerZero => "(a**0) = 1",
            Step::MultiplyZero => "(a*0) = 0",
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
