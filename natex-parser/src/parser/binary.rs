use std::{fmt, ops::Range};
use super::{
    expr::Expr,
    error::Error,
    fmt::{fmt_pow, needs_parens, Latex, Side, Style},
    token::op::{BinOp, BinOpKind},
    unary::Unary,
    Associativity,
    Parser,
    Precedence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    fn complete_rhs(input: &mut Parser, op: &BinOp, mut rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();

        loop {
            // before creating the `lhs op rhs` node, we should check the precedence of the
            // following operator, if any
            // this is because we can't parse an expression like `3 + 4 * 5`, as (3 + 4) * 5

            // clone the input stream to emulate peeking; the tokens are shared, so this is cheap
            let mut input_ahead = input.clone();
            let Ok(next_op) = input_ahead.try_parse::<BinOp>() else {
                break;
            };

            let binds_tighter = next_op.precedence() > precedence
                || (next_op.precedence() == precedence
                    && next_op.associativity() == Associativity::Right);
            if binds_tighter {
                // parse the expression of the following operator, starting with `rhs`
                rhs = input.nested(|input| Self::parse_expr(input, rhs, next_op.precedence()))?;
            } else {
                // this operator has lower precedence, or equal precedence and
                // left-associativity; this is in scenarios like:
                // `1 * 2 + 3` or `1 * 2 * 3`
                //
                // so just break out of the loop and let `lhs` become `1 * 2`
                // we will parse this operator on the next iteration of the outside loop
                break;
            }
        }

        Ok(rhs)
    }

    /// Parses a binary expression with the given left-hand-side, consuming every following
    /// operator whose precedence is at least `precedence`.
    pub fn parse_expr(
        input: &mut Parser,
        mut lhs: Expr,
        precedence: Precedence,
    ) -> Result<Expr, Error> {
        loop {
            let mut input_ahead = input.clone();
            let Ok(op) = input_ahead.try_parse::<BinOp>() else {
                break;
            };

            if op.precedence() < precedence {
                break;
            }

            // the operator is ours; commit to it
            input.set_cursor(&input_ahead);

            let rhs = Unary::parse_or_lower(input)?;
            let rhs = Self::complete_rhs(input, &op, rhs)?;

            let (start_span, end_span) = (lhs.span().start, rhs.span().end);
            input.add_operation(start_span..end_span)?;
            lhs = Expr::Binary(Self {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span: start_span..end_span,
            });
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = self.op.kind;
        Style::Plain.fmt_operand(f, &self.lhs, needs_parens(&self.lhs, op, Side::Left, Style::Plain))?;
        write!(f, "{}", self.op)?;
        Style::Plain.fmt_operand(f, &self.rhs, needs_parens(&self.rhs, op, Side::Right, Style::Plain))
    }
}

impl Latex for Binary {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let op = self.op.kind;
        match op {
            BinOpKind::Exp => fmt_pow(f, &self.lhs, &self.rhs),
            BinOpKind::Div => {
                write!(f, "\\frac{{")?;
                self.lhs.innermost().fmt_latex(f)?;
                write!(f, "}}{{")?;
                self.rhs.innermost().fmt_latex(f)?;
                write!(f, "}}")
            },
            BinOpKind::Mul => {
                let lhs = Style::Latex.render_operand(
                    &self.lhs,
                    needs_parens(&self.lhs, op, Side::Left, Style::Latex),
                );
                let rhs = Style::Latex.render_operand(
                    &self.rhs,
                    needs_parens(&self.rhs, op, Side::Right, Style::Latex),
                );

                // `2 3` would read as the number 23, and `x 2` as `x2`
                if rhs.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
                    write!(f, "{} \\cdot {}", lhs, rhs)
                } else {
                    write!(f, "{} {}", lhs, rhs)
                }
            },
            BinOpKind::Add | BinOpKind::Sub => {
                Style::Latex.fmt_operand(f, &self.lhs, needs_parens(&self.lhs, op, Side::Left, Style::Latex))?;
                write!(f, "{}", self.op)?;
                Style::Latex.fmt_operand(f, &self.rhs, needs_parens(&self.rhs, op, Side::Right, Style::Latex))
            },
        }
    }
}
