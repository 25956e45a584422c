use std::{fmt, ops::Range};
use super::{
    error::{kind, Error},
    expr::Expr,
    fmt::Latex,
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression.
///
/// Parentheses have no effect on the value of the expression. They are kept in the tree so that
/// errors can point at them, and are dropped when rendering unless precedence requires them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this parenthesized expression was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// Parses the expression between an already-consumed opening parenthesis and its closing
/// parenthesis, returning the expression and the span of the closing parenthesis.
///
/// Once an opening parenthesis has been seen, nothing else can be parsed from these tokens, so
/// every error returned here is fatal.
pub(crate) fn parse_delimited(
    input: &mut Parser,
    open_paren: Range<usize>,
) -> Result<(Expr, Range<usize>), Error> {
    if let Ok(close_paren) = input.clone().try_parse::<CloseParen>() {
        return Err(Error::new_fatal(
            vec![open_paren.start..close_paren.span.end],
            kind::EmptyParenthesis,
        ));
    }

    let expr = input.nested(|input| input.try_parse::<Expr>())
        .map_err(Error::into_fatal)?;
    match input.try_parse::<CloseParen>() {
        Ok(close_paren) => Ok((expr, close_paren.span)),
        Err(err) if input.peek_token().is_some() => Err(err.into_fatal()),
        Err(_) => Err(Error::new_fatal(
            vec![open_paren],
            kind::UnclosedParenthesis { opening: true },
        )),
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;
        let (expr, close_paren) = parse_delimited(input, open_paren.span.clone())?;
        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_paren.end,
        })
    }
}

/// Parentheses are re-derived from precedence by the enclosing node, so a parenthesized
/// expression formats as its contents.
impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.expr.innermost().fmt(f)
    }
}

impl Latex for Paren {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.expr.innermost().fmt_latex(f)
    }
}
