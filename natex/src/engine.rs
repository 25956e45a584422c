//! Parses infix text and renders it as LaTeX and plain text.

use natex_parser::parser::{error::Error, expr::Expr, fmt::Latex, Parser};

/// Parses the given infix text into an expression.
///
/// Fails on unbalanced parentheses, unknown symbols, empty input, and anything else that is not a
/// complete expression.
pub fn parse(infix: &str) -> Result<Expr, Error> {
    Parser::new(infix).try_parse_full::<Expr>()
}

/// Renders the expression as LaTeX.
pub fn render_latex(expr: &Expr) -> String {
    expr.as_display().to_string()
}

/// Renders the expression as canonical infix text.
pub fn render_plain(expr: &Expr) -> String {
    expr.to_string()
}

/// An expression rendered both ways.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The LaTeX rendering.
    pub latex: String,

    /// The plain-text rendering.
    pub plain: String,
}

impl From<&Expr> for Rendered {
    fn from(expr: &Expr) -> Self {
        Self {
            latex: render_latex(expr),
            plain: render_plain(expr),
        }
    }
}

/// Parses the given infix text and renders it both ways.
pub fn render(infix: &str) -> Result<Rendered, Error> {
    parse(infix).map(|expr| Rendered::from(&expr))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn renders_both_ways() {
        let rendered = render("sin(x)^2 + 1/x").unwrap();
        assert_eq!(rendered.latex, "\\sin^{2}{(x)} + \\frac{1}{x}");
        assert_eq!(rendered.plain, "sin(x)^2 + 1/x");
    }

    #[test]
    fn keeps_structure() {
        // no simplification: `x + x` stays `x + x`
        assert_eq!(render("x + x").unwrap().plain, "x + x");
        assert_eq!(render("2*3").unwrap().latex, "2 \\cdot 3");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse("").is_err());
        assert!(parse("(x").is_err());
        assert!(parse("x)").is_err());
        assert!(parse("x # y").is_err());
        assert!(parse("sin").is_err());
    }
}
