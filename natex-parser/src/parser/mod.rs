pub mod binary;
pub mod call;
pub mod error;
pub mod expr;
pub mod fmt;
pub mod literal;
pub mod paren;
pub mod token;
pub mod unary;

use error::{Error, kind};
use natex_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::{ops::Range, rc::Rc};

/// Attempts to parse a value from the given stream of tokens, using multiple parsing functions
/// in order. The first function that succeeds is used to parse the value.
///
/// This macro can also catch fatal errors and immediately short-circuit the parsing process.
///
/// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
/// value is returned. Otherwise, the stream is left unchanged and the error of the last
/// attempted parsing function is returned.
#[macro_export]
macro_rules! try_parse_catch_fatal {
    ($($expr:expr),+ $(,)?) => {{
        $(
            match $expr {
                Ok(value) => return Ok(value),
                Err(err) if err.fatal => return Err(err),
                // ignore this error and try the next parser, or return it
                err => err,
            }
        )+
    }};
}

/// How deeply parentheses, call arguments, unary operators and right-associative operators may
/// nest.
pub const MAX_DEPTH: usize = 64;

/// The most binary operations a single expression may contain.
pub const MAX_OPERATIONS: usize = 256;

/// A high-level parser for infix expressions. This is the type to use to parse an arbitrary
/// piece of text into an abstract syntax tree.
///
/// Cloning a parser is cheap: the tokens are shared, so a clone can be used to look ahead.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Rc<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// How many nested expressions are being parsed right now.
    depth: usize,

    /// How many binary operations have been parsed so far.
    operations: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source).into(),
            cursor: 0,
            depth: 0,
            operations: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Moves the cursor of this parser to the cursor of another parser, which is assumed to be
    /// parsing the same source (usually a clone that was used to look ahead).
    pub fn set_cursor(&mut self, other: &Parser) {
        self.cursor = other.cursor;
        self.operations = other.operations;
    }

    /// Runs the given parsing function one nesting level deeper. Fails with a fatal error instead
    /// if the expression already nests [`MAX_DEPTH`] levels deep.
    pub(crate) fn nested<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        if self.depth >= MAX_DEPTH {
            return Err(Error::new_fatal(
                vec![self.span()],
                kind::NestedTooDeep { limit: MAX_DEPTH },
            ));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Records a binary operation spanning the given region. Fails with a fatal error if the
    /// expression would contain more than [`MAX_OPERATIONS`] of them.
    pub(crate) fn add_operation(&mut self, span: Range<usize>) -> Result<(), Error> {
        if self.operations >= MAX_OPERATIONS {
            return Err(Error::new_fatal(
                vec![span],
                kind::TooManyOperations { limit: MAX_OPERATIONS },
            ));
        }

        self.operations += 1;
        Ok(())
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Returns the next non-whitespace token without advancing the cursor.
    pub fn peek_token(&self) -> Option<Token<'source>> {
        self.clone().next_token().ok()
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. This function can be used in the [`Parse::parse`]
    /// implementation of a type with the given [`Parser`], as it will automatically backtrack the
    /// cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let (start, operations) = (self.cursor, self.operations);
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                self.operations = operations;
                err
            },
        }
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;

        // trailing whitespace is fine, anything else is not
        let Some(token) = self.peek_token() else {
            return Ok(value);
        };

        Err(match token.kind {
            TokenKind::CloseParen => Error::new_fatal(
                vec![token.span],
                kind::UnclosedParenthesis { opening: false },
            ),
            TokenKind::Symbol => Error::new_fatal(
                vec![token.span],
                kind::UnknownToken { lexeme: token.lexeme.to_owned() },
            ),
            _ => Error::new(vec![token.span.start..self.eof_span().end], kind::ExpectedEof),
        })
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)` (the operators appear to the
    /// left of the operand).
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,

    /// Precedence of literals, parenthesized expressions and function application. Nothing can
    /// split these apart.
    Atom,
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use binary::Binary;
    use call::Call;
    use expr::Expr;
    use literal::{Literal, LitNum, LitSym};
    use paren::Paren;
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};
    use unary::Unary;

    fn num(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_string(), span }))
    }

    #[test]
    fn literal_int() {
        let mut parser = Parser::new("16");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("16", 0..2));
    }

    #[test]
    fn literal_float_keeps_source_text() {
        let mut parser = Parser::new("3.140");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, num("3.140", 0..5));
    }

    #[test]
    fn literal_symbol() {
        let mut parser = Parser::new("  theta ");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, sym("theta", 2..7));
    }

    #[test]
    fn binary_precedence() {
        let mut parser = Parser::new("1+2*x");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(num("1", 0..1)),
            op: BinOp { kind: BinOpKind::Add, span: 1..2 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(num("2", 2..3)),
                op: BinOp { kind: BinOpKind::Mul, span: 3..4 },
                rhs: Box::new(sym("x", 4..5)),
                span: 2..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn binary_left_associativity() {
        let mut parser = Parser::new("a-b-c");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("a", 0..1)),
                op: BinOp { kind: BinOpKind::Sub, span: 1..2 },
                rhs: Box::new(sym("b", 2..3)),
                span: 0..3,
            })),
            op: BinOp { kind: BinOpKind::Sub, span: 3..4 },
            rhs: Box::new(sym("c", 4..5)),
            span: 0..5,
        }));
    }

    #[test]
    fn exp_right_associativity() {
        let mut parser = Parser::new("2^3^4");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(num("2", 0..1)),
            op: BinOp { kind: BinOpKind::Exp, span: 1..2 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(num("3", 2..3)),
                op: BinOp { kind: BinOpKind::Exp, span: 3..4 },
                rhs: Box::new(num("4", 4..5)),
                span: 2..5,
            })),
            span: 0..5,
        }));
    }

    #[test]
    fn neg_binds_looser_than_exp() {
        let mut parser = Parser::new("-x^2");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", 1..2)),
                op: BinOp { kind: BinOpKind::Exp, span: 2..3 },
                rhs: Box::new(num("2", 3..4)),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn neg_binds_tighter_than_mul() {
        let mut parser = Parser::new("-x*y");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Unary(Unary {
                operand: Box::new(sym("x", 1..2)),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
                span: 0..2,
            })),
            op: BinOp { kind: BinOpKind::Mul, span: 2..3 },
            rhs: Box::new(sym("y", 3..4)),
            span: 0..4,
        }));
    }

    #[test]
    fn call_and_paren() {
        let mut parser = Parser::new("sin(x)*(y)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Call(Call {
                name: LitSym { name: "sin".to_string(), span: 0..3 },
                arg: Box::new(sym("x", 4..5)),
                span: 0..6,
                paren_span: 3..6,
            })),
            op: BinOp { kind: BinOpKind::Mul, span: 6..7 },
            rhs: Box::new(Expr::Paren(Paren {
                expr: Box::new(sym("y", 8..9)),
                span: 7..10,
            })),
            span: 0..10,
        }));
    }

    #[test]
    fn user_function_call() {
        let mut parser = Parser::new("f(x)");
        let expr = parser.try_parse_full::<Expr>().unwrap();

        assert!(matches!(expr, Expr::Call(ref call) if call.name.name == "f"));
    }

    #[test]
    fn empty_input() {
        let mut parser = Parser::new("   ");
        assert!(parser.try_parse_full::<Expr>().is_err());
    }

    #[test]
    fn unclosed_open_paren() {
        let mut parser = Parser::new("(x + 1");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert!(err.fatal);
        assert_eq!(err.spans, vec![0..1]);
        assert_eq!(err.to_string(), "unclosed parenthesis at 0..1");
    }

    #[test]
    fn unclosed_close_paren() {
        let mut parser = Parser::new("x + 1)");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn unknown_token() {
        let mut parser = Parser::new("x = 1");
        assert!(parser.try_parse_full::<Expr>().is_err());

        let mut parser = Parser::new("$x");
        assert!(parser.try_parse_full::<Expr>().is_err());
    }

    #[test]
    fn function_name_without_argument() {
        let mut parser = Parser::new("sin + 1");
        let err = parser.try_parse_full::<Expr>().unwrap_err();
        assert!(err.fatal);
        assert_eq!(err.spans, vec![0..3]);
    }

    #[test]
    fn empty_call() {
        let mut parser = Parser::new("cos()");
        assert!(parser.try_parse_full::<Expr>().is_err());
    }

    #[test]
    fn no_implicit_multiplication() {
        let mut parser = Parser::new("2x");
        assert!(parser.try_parse_full::<Expr>().is_err());

        let mut parser = Parser::new("x y");
        assert!(parser.try_parse_full::<Expr>().is_err());
    }

    #[test]
    fn dangling_operator() {
        let mut parser = Parser::new("x +");
        assert!(parser.try_parse_full::<Expr>().is_err());
    }

    #[test]
    fn lookahead_shares_tokens() {
        let parser = Parser::new("x + y * z");
        let ahead = parser.clone();
        assert!(Rc::ptr_eq(&parser.tokens, &ahead.tokens));
    }

    #[test]
    fn nesting_within_limit() {
        let source = format!("{}x{}", "(".repeat(MAX_DEPTH - 1), ")".repeat(MAX_DEPTH - 1));
        assert!(Parser::new(&source).try_parse_full::<Expr>().is_ok());

        let source = format!("{}x", "-".repeat(MAX_DEPTH - 1));
        assert!(Parser::new(&source).try_parse_full::<Expr>().is_ok());
    }

    #[test]
    fn nested_parens_too_deep() {
        let source = format!("{}x{}", "(".repeat(1000), ")".repeat(1000));
        let err = Parser::new(&source).try_parse_full::<Expr>().unwrap_err();
        assert!(err.fatal);
        assert!(format!("{:?}", err.kind).contains("NestedTooDeep"));
    }

    #[test]
    fn nested_calls_too_deep() {
        let source = format!("{}x{}", "sin(".repeat(1000), ")".repeat(1000));
        let err = Parser::new(&source).try_parse_full::<Expr>().unwrap_err();
        assert!(format!("{:?}", err.kind).contains("NestedTooDeep"));
    }

    #[test]
    fn negation_too_deep() {
        let source = format!("{}x", "-".repeat(1000));
        let err = Parser::new(&source).try_parse_full::<Expr>().unwrap_err();
        assert!(format!("{:?}", err.kind).contains("NestedTooDeep"));
    }

    #[test]
    fn exponent_chain_too_deep() {
        let source = vec!["x"; 1000].join("^");
        let err = Parser::new(&source).try_parse_full::<Expr>().unwrap_err();
        assert!(err.fatal);
    }

    #[test]
    fn operations_within_limit() {
        let source = vec!["x"; MAX_OPERATIONS + 1].join(" + ");
        assert!(Parser::new(&source).try_parse_full::<Expr>().is_ok());
    }

    #[test]
    fn too_many_operations() {
        let source = vec!["x"; 8000].join(" + ");
        let err = Parser::new(&source).try_parse_full::<Expr>().unwrap_err();
        assert!(err.fatal);
        assert!(format!("{:?}", err.kind).contains("TooManyOperations"));
    }
}
