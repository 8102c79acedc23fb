use ariadne::Fmt;
use dask_attrs::ErrorKind;
use dask_error::{ErrorKind, EXPR};

/// There were no tokens to build a tree from.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty expression",
    labels = [format!("add an {} here", "expression".fg(EXPR))],
)]
pub struct EmptyExpression;

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// An operator was closed with fewer than two operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operand",
    labels = [
        format!("the `{}` operator needs an operand on each side", symbol),
        "the group ends here".to_string(),
    ],
    help = "negative numbers cannot be written directly; try `(0-5)` instead of `(-5)`",
)]
pub struct MissingOperand {
    /// The operator that is missing an operand.
    pub symbol: &'static str,
}

/// A pair of parentheses contained more than one operator, or operands without an operator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "every operation must be enclosed in its own parentheses",
    labels = [if *operators > 1 {
        format!("this group contains {} operators", operators)
    } else {
        format!("this group contains {} operands but no operator", operands)
    }],
    help = format!("group each operation separately, for example: {}", "((5*3)+4)".fg(EXPR)),
)]
pub struct UngroupedOperation {
    /// The number of operators found inside the group.
    pub operators: usize,

    /// The number of operands found inside the group.
    pub operands: usize,
}

/// An operand was found that is not connected to the rest of the expression by an operator.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing operator",
    labels = ["this operand is not connected to the expression before it"],
    help = format!("combine the operands with an operator, for example: {}", "(a+b)".fg(EXPR)),
)]
pub struct MissingOperator;

/// A token that cannot appear in an expression was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected `{}`", lexeme),
    labels = ["this is not a number, a name, an operator or a parenthesis"],
    help = if lexeme == "." {
        "decimal points must be next to a digit, such as `0.5` or `5.`"
    } else {
        "allowed operators are: + - * / ++ ** //"
    },
)]
pub struct UnexpectedToken {
    /// The raw text that was found.
    pub lexeme: String,
}

/// Parentheses were nested deeper than the parser allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = [format!("this parenthesis exceeds the limit of {} nested groups", max)],
)]
pub struct NestingTooDeep {
    /// The maximum nesting depth.
    pub max: usize,
}

/// A binding line has no `=` separating the name from the expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing `=` in assignment",
    labels = ["expected `name=expression`"],
    help = format!("for example: {}", "Alpha=(1+2)".fg(EXPR)),
)]
pub struct MissingAssignment;

/// The name of a binding was not purely alphabetic.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = if name.is_empty() {
        "missing variable name".to_string()
    } else {
        format!("`{}` is not a valid variable name", name)
    },
    labels = ["this name"],
    help = "variable names may only contain the letters a-z and A-Z",
)]
pub struct InvalidName {
    /// The name that was given.
    pub name: String,
}

/// A negative number literal was written in an expression.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "negative numbers are not supported",
    labels = ["this minus sign starts a negative literal"],
    help = format!("subtract from zero instead, for example: {}", "(0-5)".fg(EXPR)),
)]
pub struct NegativeLiteral;

/// The parentheses of an expression do not balance.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unbalanced parentheses",
    labels = [if *opening {
        "this parenthesis is never closed"
    } else {
        "this parenthesis closes nothing"
    }],
)]
pub struct UnbalancedParentheses {
    /// Whether the offending parenthesis was an opening parenthesis `(`.
    pub opening: bool,
}

/// A character that is not part of the expression grammar was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("character `{}` is not allowed", character),
    labels = ["this character"],
    help = "expressions may contain letters, digits, `.`, spaces, parentheses and + - * /",
)]
pub struct DisallowedCharacter {
    /// The character that was found.
    pub character: char,
}
