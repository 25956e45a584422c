use ariadne::Fmt;
use natex_attrs::ErrorKind;
use natex_error::EXPR;
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of expression",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of expression",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = "operators between terms must be written out, as in `2*x` rather than `2x`",
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", self.expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", self.found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A character that is not part of the expression language was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown symbol `{}`", self.lexeme),
    labels = ["this symbol"],
    help = format!("expressions can only contain numbers, names, {}, and parentheses", "+ - * / ^".fg(EXPR)),
)]
pub struct UnknownToken {
    /// The text of the unknown token.
    pub lexeme: String,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if self.opening {
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

/// A built-in function name was used without an argument.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument to `{}`", self.name),
    labels = ["this function needs an argument"],
    help = format!("write the argument in parentheses, as in {}", format!("{}(x)", self.name).fg(EXPR)),
)]
pub struct MissingCallArgument {
    /// The name of the function.
    pub name: String,
}

/// Parentheses, function calls, or operators were nested too deeply.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is nested too deeply",
    labels = [format!("nesting goes past {} levels here", self.limit)],
    help = "split the expression into smaller parts",
)]
pub struct NestedTooDeep {
    /// The deepest nesting allowed.
    pub limit: usize,
}

/// An expression contained too many operations.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expression is too long",
    labels = [format!("this is past the limit of {} operations", self.limit)],
    help = "split the expression into smaller parts",
)]
pub struct TooManyOperations {
    /// The most operations allowed.
    pub limit: usize,
}
