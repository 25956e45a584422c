use std::fmt::{Display, Formatter, Result};
use super::{
    call::LatexStyle,
    expr::Expr,
    token::op::BinOpKind,
    Associativity,
    Precedence,
};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// The output an expression is being formatted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Style {
    /// Plain infix text, such as `x^2 + 1`.
    Plain,

    /// LaTeX, such as `x^{2} + 1`.
    Latex,
}

impl Style {
    /// Formats the expression in this style, wrapped in parentheses if `parens` is true.
    pub(crate) fn fmt_operand(self, f: &mut Formatter, expr: &Expr, parens: bool) -> Result {
        let expr = expr.innermost();
        match (self, parens) {
            (Style::Plain, false) => write!(f, "{}", expr),
            (Style::Plain, true) => write!(f, "({})", expr),
            (Style::Latex, false) => expr.fmt_latex(f),
            (Style::Latex, true) => write!(f, "\\left({}\\right)", expr.as_display()),
        }
    }

    /// Renders the expression in this style to a string, wrapped in parentheses if `parens` is
    /// true.
    pub(crate) fn render_operand(self, expr: &Expr, parens: bool) -> String {
        OperandFormatter { style: self, expr, parens }.to_string()
    }
}

struct OperandFormatter<'a> {
    style: Style,
    expr: &'a Expr,
    parens: bool,
}

impl Display for OperandFormatter<'_> {
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.style.fmt_operand(f, self.expr, self.parens)
    }
}

/// The side of a binary operator an operand is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Returns true if the operand of a binary operator must be parenthesized to keep the meaning of
/// the expression.
///
/// Explicit parentheses in the source are ignored; only precedence and associativity decide.
pub(crate) fn needs_parens(operand: &Expr, op: BinOpKind, side: Side, style: Style) -> bool {
    let operand = operand.innermost();
    match operand {
        // `x + -y` is written `x + (-y)`, and `-x^2` already means `-(x^2)`
        Expr::Unary(_) => return side == Side::Right || op == BinOpKind::Exp,

        // fractions are self-delimiting
        Expr::Binary(binary) if style == Style::Latex && binary.op.kind == BinOpKind::Div => {
            return false;
        },
        _ => (),
    }

    let (operand_precedence, op_precedence) = (operand.precedence(), op.precedence());
    if operand_precedence != op_precedence {
        return operand_precedence < op_precedence;
    }

    match side {
        Side::Left => op.associativity() == Associativity::Right,
        Side::Right => {
            let same_associative_op = matches!(
                operand,
                Expr::Binary(binary) if binary.op.kind == op && op.is_associative()
            );
            op.associativity() == Associativity::Left && !same_associative_op
        },
    }
}

/// Returns true if the operand of a negation must be parenthesized.
pub(crate) fn neg_needs_parens(operand: &Expr) -> bool {
    let operand = operand.innermost();
    matches!(operand, Expr::Unary(_)) || operand.precedence() < Precedence::Factor
}

/// Helper to format powers.
pub fn fmt_pow(f: &mut Formatter, base: &Expr, exp: &Expr) -> Result {
    let base = base.innermost();
    let parens = match base {
        Expr::Call(call) if call.is_operator() => return call.fmt_latex_pow(f, exp),
        Expr::Call(call) => matches!(call.builtin(), Some(LatexStyle::Root(_) | LatexStyle::Exp)),
        Expr::Unary(_) | Expr::Binary(_) => true,
        Expr::Literal(_) | Expr::Paren(_) => false,
    };

    Style::Latex.fmt_operand(f, base, parens)?;
    write!(f, "^{{")?;
    exp.innermost().fmt_latex(f)?;
    write!(f, "}}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use crate::parser::Parser;

    fn parse(source: &str) -> Expr {
        Parser::new(source).try_parse_full::<Expr>().unwrap()
    }

    fn latex(source: &str) -> String {
        parse(source).as_display().to_string()
    }

    fn plain(source: &str) -> String {
        parse(source).to_string()
    }

    #[test]
    fn fmt_display() {
        assert_eq!(plain("x+y"), "x + y");
        assert_eq!(plain("1/x + x**2"), "1/x + x^2");
        assert_eq!(plain("2 * x - 3"), "2*x - 3");
    }

    #[test]
    fn fmt_display_parens() {
        assert_eq!(plain("((x))"), "x");
        assert_eq!(plain("(a+b)*c"), "(a + b)*c");
        assert_eq!(plain("a*(b+c)"), "a*(b + c)");
        assert_eq!(plain("a-(b-c)"), "a - (b - c)");
        assert_eq!(plain("(a-b)-c"), "a - b - c");
        assert_eq!(plain("a+(b+c)"), "a + b + c");
        assert_eq!(plain("(x^2)^3"), "(x^2)^3");
        assert_eq!(plain("x^(2^3)"), "x^2^3");
        assert_eq!(plain("(-x)^2"), "(-x)^2");
        assert_eq!(plain("-(x+1)"), "-(x + 1)");
        assert_eq!(plain("x + -y"), "x + (-y)");
    }

    #[test]
    fn fmt_display_calls() {
        assert_eq!(plain("sin((x))"), "sin(x)");
        assert_eq!(plain("f(x + 1)"), "f(x + 1)");
    }

    #[test]
    fn fmt_display_is_reparseable() {
        for source in ["(a+b)*c/(d-e)", "-(x^2)^y", "sqrt(x+1)^2 - f(2)"] {
            let printed = plain(source);
            assert_eq!(plain(&printed), printed);
        }
    }

    #[test]
    fn fmt_latex_basic() {
        assert_eq!(latex("x^2"), "x^{2}");
        assert_eq!(latex("1/x"), "\\frac{1}{x}");
        assert_eq!(latex("x+y"), "x + y");
        assert_eq!(latex("x - 3.50"), "x - 3.50");
        assert_eq!(latex("-x"), "-x");
    }

    #[test]
    fn fmt_latex_mul() {
        assert_eq!(latex("2*x"), "2 x");
        assert_eq!(latex("x*y*z"), "x y z");
        assert_eq!(latex("2*3"), "2 \\cdot 3");
        assert_eq!(latex("x*2"), "x \\cdot 2");
        assert_eq!(latex("(x+1)*2"), "\\left(x + 1\\right) \\cdot 2");
        assert_eq!(latex("x*.5"), "x \\cdot .5");
        assert_eq!(latex("(x+1)*(x-1)"), "\\left(x + 1\\right) \\left(x - 1\\right)");
        assert_eq!(latex("a*(b/c)"), "a \\frac{b}{c}");
    }

    #[test]
    fn fmt_latex_frac_drops_parens() {
        assert_eq!(latex("(x+1)/(x-1)"), "\\frac{x + 1}{x - 1}");
    }

    #[test]
    fn fmt_latex_pow() {
        assert_eq!(latex("(x+1)^2"), "\\left(x + 1\\right)^{2}");
        assert_eq!(latex("x^(y+1)"), "x^{y + 1}");
        assert_eq!(latex("(1/x)^2"), "\\left(\\frac{1}{x}\\right)^{2}");
        assert_eq!(latex("2^-x"), "2^{-x}");
        assert_eq!(latex("-x^2"), "-x^{2}");
        assert_eq!(latex("(-x)^2"), "\\left(-x\\right)^{2}");
    }

    #[test]
    fn fmt_latex_functions() {
        assert_eq!(latex("sin(x)"), "\\sin{(x)}");
        assert_eq!(latex("asin(x)"), "\\arcsin{(x)}");
        assert_eq!(latex("ln(x^2)"), "\\ln{(x^{2})}");
        assert_eq!(latex("sqrt(x)"), "\\sqrt{x}");
        assert_eq!(latex("cbrt(x)"), "\\sqrt[3]{x}");
        assert_eq!(latex("exp(x)"), "e^{x}");
        assert_eq!(latex("abs(x)"), "\\left|x\\right|");
        assert_eq!(latex("f(x)"), "f(x)");
        assert_eq!(latex("sin(cos(x))"), "\\sin{(\\cos{(x)})}");
    }

    #[test]
    fn fmt_latex_function_powers() {
        assert_eq!(latex("sin(x)^2"), "\\sin^{2}{(x)}");
        assert_eq!(latex("sqrt(x)^2"), "\\left(\\sqrt{x}\\right)^{2}");
        assert_eq!(latex("abs(x)^2"), "\\left|x\\right|^{2}");
        assert_eq!(latex("f(x)^2"), "f(x)^{2}");
    }
}
