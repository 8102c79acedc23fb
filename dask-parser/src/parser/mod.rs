pub mod error;
pub mod fmt;
pub mod node;
pub mod op;
pub mod validate;

use error::{kind, Error};
use node::Node;
use op::BinOpKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// The maximum number of nested parenthesis groups. Every later pass over the tree (evaluation,
/// simplification, differentiation, rendering) recurses once per level, so this also bounds their
/// stack usage.
pub const MAX_NESTING_DEPTH: usize = 512;

/// An open parenthesis group, remembering how tall both stacks were when it was opened.
#[derive(Debug, Clone)]
struct Group {
    /// The span of the `(` token.
    open: Range<usize>,

    /// The height of the operator stack when the group was opened.
    ops: usize,

    /// The height of the operand stack when the group was opened.
    operands: usize,
}

/// Builds expression trees from fully-parenthesized DASK expressions.
///
/// The parser runs the classic two-stack algorithm: operators are pushed onto one stack,
/// operands onto the other, and each `)` combines the innermost operator with the two operands
/// before it. Unlike the bare algorithm, every group is checked to hold exactly one operation, so
/// input such as `(5*3+4)` is rejected instead of silently losing an operand.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
        }
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Builds the expression tree. All the tokens must be consumed into a single tree; if not, an
    /// error is returned.
    pub fn parse(&self) -> Result<Node, Error> {
        let mut ops: Vec<(BinOpKind, Range<usize>)> = Vec::new();
        let mut operands: Vec<(Node, Range<usize>)> = Vec::new();
        let mut groups: Vec<Group> = Vec::new();

        for token in self.tokens.iter().filter(|token| !token.is_whitespace()) {
            match token.kind {
                TokenKind::OpenParen => {
                    if groups.len() >= MAX_NESTING_DEPTH {
                        return Err(Error::new(
                            vec![token.span.clone()],
                            kind::NestingTooDeep { max: MAX_NESTING_DEPTH },
                        ));
                    }

                    groups.push(Group {
                        open: token.span.clone(),
                        ops: ops.len(),
                        operands: operands.len(),
                    });
                },
                TokenKind::CloseParen => {
                    let group = groups.pop().ok_or_else(|| Error::new(
                        vec![token.span.clone()],
                        kind::UnclosedParenthesis { opening: false },
                    ))?;
                    let operand = close_group(&group, token, &mut ops, &mut operands)?;
                    operands.push(operand);
                },
                TokenKind::Name => {
                    operands.push((Node::variable(token.lexeme), token.span.clone()));
                },
                TokenKind::Number => {
                    let value = token.lexeme.parse::<f64>().map_err(|_| Error::new(
                        vec![token.span.clone()],
                        kind::UnexpectedToken { lexeme: token.lexeme.to_string() },
                    ))?;
                    operands.push((Node::Number(value), token.span.clone()));
                },
                other if other.is_operator() => {
                    // `is_operator` and `from_token` agree on the seven operator tokens
                    if let Some(op) = BinOpKind::from_token(other) {
                        ops.push((op, token.span.clone()));
                    }
                },
                _ => {
                    return Err(Error::new(
                        vec![token.span.clone()],
                        kind::UnexpectedToken { lexeme: token.lexeme.to_string() },
                    ));
                },
            }
        }

        if let Some(group) = groups.pop() {
            return Err(Error::new(vec![group.open], kind::UnclosedParenthesis { opening: true }));
        }

        if let Some((_, span)) = ops.first() {
            // operators outside of any parentheses
            let whole = operands.first().map_or(span.start, |(_, s)| s.start.min(span.start))
                ..self.eof_span().end;
            return Err(Error::new(
                vec![whole],
                kind::UngroupedOperation { operators: ops.len(), operands: operands.len() },
            ));
        }

        let mut operands = operands.into_iter();
        let (root, _) = operands.next()
            .ok_or_else(|| Error::new(vec![self.eof_span()], kind::EmptyExpression))?;
        if let Some((_, span)) = operands.next() {
            return Err(Error::new(vec![span], kind::MissingOperator));
        }

        Ok(root)
    }
}

/// Closes the given group at the `)` token, returning the operand the group evaluates to.
fn close_group(
    group: &Group,
    close: &Token,
    ops: &mut Vec<(BinOpKind, Range<usize>)>,
    operands: &mut Vec<(Node, Range<usize>)>,
) -> Result<(Node, Range<usize>), Error> {
    let span = group.open.start..close.span.end;
    let op_count = ops.len() - group.ops;
    let operand_count = operands.len() - group.operands;

    match (op_count, operand_count) {
        (0, 0) => Err(Error::new(vec![span], kind::EmptyParenthesis)),
        // redundant grouping, such as `(B)`
        (0, 1) => {
            let (node, _) = operands.pop().ok_or_else(|| Error::new(vec![span.clone()], kind::EmptyParenthesis))?;
            Ok((node, span))
        },
        (1, 2) => {
            let missing = || Error::new(vec![span.clone()], kind::EmptyParenthesis);
            let (op, _) = ops.pop().ok_or_else(missing)?;
            let (rhs, _) = operands.pop().ok_or_else(missing)?;
            let (lhs, _) = operands.pop().ok_or_else(missing)?;
            Ok((Node::binary(op, lhs, rhs), span))
        },
        (1, 0 | 1) => {
            let (op, op_span) = &ops[ops.len() - 1];
            Err(Error::new(
                vec![op_span.clone(), close.span.clone()],
                kind::MissingOperand { symbol: op.symbol() },
            ))
        },
        (operators, operands) => Err(Error::new(
            vec![span],
            kind::UngroupedOperation { operators, operands },
        )),
    }
}

/// Parses the given source code into an expression tree.
pub fn parse(source: &str) -> Result<Node, Error> {
    Parser::new(source).parse()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn num(n: f64) -> Node {
        Node::Number(n)
    }

    fn var(name: &str) -> Node {
        Node::variable(name)
    }

    /// Returns the spans of the error produced by parsing the given source.
    fn error_spans(source: &str) -> Vec<Range<usize>> {
        parse(source).unwrap_err().spans
    }

    #[test]
    fn single_leaf() {
        assert_eq!(parse("42").unwrap(), num(42.0));
        assert_eq!(parse("Alpha").unwrap(), var("Alpha"));
        assert_eq!(parse("  3.25 ").unwrap(), num(3.25));
    }

    #[test]
    fn binary_group() {
        assert_eq!(
            parse("(5*3)").unwrap(),
            Node::binary(BinOpKind::Mul, num(5.0), num(3.0)),
        );
    }

    #[test]
    fn operand_order() {
        // the operand closest to `)` is the right-hand side
        assert_eq!(
            parse("(A-B)").unwrap(),
            Node::binary(BinOpKind::Sub, var("A"), var("B")),
        );
    }

    #[test]
    fn nested_groups() {
        assert_eq!(
            parse("((5*3)+4)").unwrap(),
            Node::binary(
                BinOpKind::Add,
                Node::binary(BinOpKind::Mul, num(5.0), num(3.0)),
                num(4.0),
            ),
        );
        assert_eq!(
            parse("(Alpha+(Delta+(Pi*(Beta*(Gamma/Sigma)))))").unwrap().to_string(),
            "(Alpha+(Delta+(Pi*(Beta*(Gamma/Sigma)))))",
        );
    }

    #[test]
    fn all_operators() {
        for op in BinOpKind::ALL {
            let source = format!("(a{}b)", op.symbol());
            assert_eq!(parse(&source).unwrap(), Node::binary(op, var("a"), var("b")));
        }
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(
            parse(" ( x ** 2 ) ").unwrap(),
            Node::binary(BinOpKind::Exp, var("x"), num(2.0)),
        );
    }

    #[test]
    fn redundant_grouping() {
        assert_eq!(parse("(B)").unwrap(), var("B"));
        assert_eq!(parse("(((7)))").unwrap(), num(7.0));
        assert_eq!(
            parse("((a)+(2))").unwrap(),
            Node::binary(BinOpKind::Add, var("a"), num(2.0)),
        );
    }

    #[test]
    fn flat_group_is_rejected() {
        // a bare two-stack parser would silently build `(3+4)` here
        assert_eq!(error_spans("(5*3+4)"), vec![0..7]);
        assert_eq!(error_spans("(a b)"), vec![0..5]);
    }

    #[test]
    fn ungrouped_top_level() {
        assert_eq!(error_spans("5*3"), vec![0..3]);
    }

    #[test]
    fn empty_input() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
        assert_eq!(error_spans("()"), vec![0..2]);
    }

    #[test]
    fn unbalanced_parentheses() {
        assert_eq!(error_spans("((1+2)"), vec![0..1]);
        assert_eq!(error_spans("(1+2))"), vec![5..6]);
    }

    #[test]
    fn missing_operand() {
        assert_eq!(error_spans("(-5)"), vec![1..2, 3..4]);
        assert_eq!(error_spans("(5+)"), vec![2..3, 3..4]);
    }

    #[test]
    fn missing_operator() {
        assert_eq!(error_spans("(1+2) (3+4)"), vec![6..11]);
    }

    #[test]
    fn unexpected_tokens() {
        assert_eq!(error_spans("(x%2)"), vec![2..3]);
        assert_eq!(error_spans("(x+.)"), vec![3..4]);
    }

    #[test]
    fn nesting_limit() {
        let deep = format!("{}x{}", "(".repeat(MAX_NESTING_DEPTH), ")".repeat(MAX_NESTING_DEPTH));
        assert_eq!(parse(&deep).unwrap(), var("x"));

        let too_deep = format!("({}", deep);
        assert_eq!(error_spans(&format!("{})", too_deep)), vec![MAX_NESTING_DEPTH..MAX_NESTING_DEPTH + 1]);
    }
}
