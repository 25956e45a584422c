use std::{fmt, ops::Range};
use crate::{
    parser::{
        binary::Binary,
        expr::{Expr, Primary},
        error::Error,
        fmt::{neg_needs_parens, Latex, Style},
        token::op::UnaryOp,
        Parse,
        Parser,
    },
    try_parse_catch_fatal,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or lower precedence expressions.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let _ = try_parse_catch_fatal!(input.try_parse::<Self>().map(Expr::Unary));
        Primary::parse(input).map(Into::into)
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;

        // the operand absorbs every operator that binds tighter than negation, so `-x^2` is
        // `-(x^2)`
        let operand = input.nested(|input| {
            let lhs = Self::parse_or_lower(input)?;
            Binary::parse_expr(input, lhs, op.precedence())
        })?;

        Ok(Self {
            span: op.span.start..operand.span().end,
            operand: Box::new(operand),
            op,
        })
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.op)?;
        Style::Plain.fmt_operand(f, &self.operand, neg_needs_parens(&self.operand))
    }
}

impl Latex for Unary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.op)?;
        Style::Latex.fmt_operand(f, &self.operand, neg_needs_parens(&self.operand))
    }
}
