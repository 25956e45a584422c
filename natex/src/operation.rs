//! Recognized operations and the templates they are rendered with.

use natex_parser::parser::error::Error;
use crate::{
    engine::{self, Rendered},
    preprocess::Preprocessor,
    result::OperationKind,
};

/// Words that mean the limit target is infinite.
const INFINITY: &[&str] = &["infinity", "inf", "∞"];

/// An operation extracted from a request, with its parts still in natural-language form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `\int expr \, dvar`.
    Integral { expr: String, var: String },

    /// `\frac{d}{dvar} expr`.
    Derivative { expr: String, var: String },

    /// `\frac{\partial}{\partial var} expr`.
    PartialDerivative { expr: String, var: String },

    /// `\sum_{var=start}^{end} expr`.
    Summation { expr: String, var: String, start: String, end: String },

    /// `\prod_{var=start}^{end} expr`.
    Product { expr: String, var: String, start: String, end: String },

    /// `\lim_{var \to approach} expr`.
    Limit { expr: String, var: String, approach: String },

    /// `\frac{numerator}{denominator}`.
    Fraction { numerator: String, denominator: String },

    /// An expression on its own.
    SimpleExpression { expr: String },
}

impl Operation {
    /// Returns the kind of this operation.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Integral { .. } => OperationKind::Integral,
            Self::Derivative { .. } => OperationKind::Derivative,
            Self::PartialDerivative { .. } => OperationKind::PartialDerivative,
            Self::Summation { .. } => OperationKind::Summation,
            Self::Product { .. } => OperationKind::Product,
            Self::Limit { .. } => OperationKind::Limit,
            Self::Fraction { .. } => OperationKind::Fraction,
            Self::SimpleExpression { .. } => OperationKind::SimpleExpression,
        }
    }

    /// Rewrites and parses every expression in the operation, then renders the whole operation.
    pub fn render(&self, preprocessor: &Preprocessor) -> Result<Rendered, Error> {
        let expr = |text: &str| engine::render(&preprocessor.rewrite(text));

        Ok(match self {
            Self::Integral { expr: body, var } => {
                let body = expr(body)?;
                Rendered {
                    latex: format!("\\int {} \\, d{}", body.latex, var),
                    plain: format!("Integral of {} with respect to {}", body.plain, var),
                }
            },
            Self::Derivative { expr: body, var } => {
                let body = expr(body)?;
                Rendered {
                    latex: format!("\\frac{{d}}{{d{}}} {}", var, body.latex),
                    plain: format!("Derivative of {} with respect to {}", body.plain, var),
                }
            },
            Self::PartialDerivative { expr: body, var } => {
                let body = expr(body)?;
                Rendered {
                    latex: format!("\\frac{{\\partial}}{{\\partial {}}} {}", var, body.latex),
                    plain: format!("Partial derivative of {} with respect to {}", body.plain, var),
                }
            },
            Self::Summation { expr: body, var, start, end } => {
                let body = expr(body)?;
                Rendered {
                    latex: format!("\\sum_{{{}={}}}^{{{}}} {}", var, start, end, body.latex),
                    plain: format!("Sum from {}={} to {} of {}", var, start, end, body.plain),
                }
            },
            Self::Product { expr: body, var, start, end } => {
                let body = expr(body)?;
                Rendered {
                    latex: format!("\\prod_{{{}={}}}^{{{}}} {}", var, start, end, body.latex),
                    plain: format!("Product from {}={} to {} of {}", var, start, end, body.plain),
                }
            },
            Self::Limit { expr: body, var, approach } => {
                let body = expr(body)?;
                let approach = if INFINITY.contains(&approach.trim()) {
                    Rendered {
                        latex: "\\infty".to_string(),
                        plain: "infinity".to_string(),
                    }
                } else {
                    expr(approach)?
                };
                Rendered {
                    latex: format!("\\lim_{{{} \\to {}}} {}", var, approach.latex, body.latex),
                    plain: format!("Limit as {} approaches {} of {}", var, approach.plain, body.plain),
                }
            },
            Self::Fraction { numerator, denominator } => {
                let (numerator, denominator) = (expr(numerator)?, expr(denominator)?);
                Rendered {
                    latex: format!("\\frac{{{}}}{{{}}}", numerator.latex, denominator.latex),
                    plain: format!("({}) / ({})", numerator.plain, denominator.plain),
                }
            },
            Self::SimpleExpression { expr: body } => expr(body)?,
        })
    }
}
