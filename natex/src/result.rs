//! The values produced by a successful parse.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The strategy that produced a [`ParseResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Method {
    /// The ordered rule table recognized the input.
    PatternMatching,

    /// The keyword heuristics recognized the input after every rule failed.
    Nlp,
}

impl Method {
    /// Returns the name of the method as it appears in results.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PatternMatching => "pattern_matching",
            Self::Nlp => "nlp",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of math operation that was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OperationKind {
    Integral,
    Derivative,
    PartialDerivative,
    Summation,
    Product,
    Limit,
    Fraction,
    SimpleExpression,
}

impl OperationKind {
    /// Returns a human-readable name for the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integral => "integral",
            Self::Derivative => "derivative",
            Self::PartialDerivative => "partial derivative",
            Self::Summation => "summation",
            Self::Product => "product",
            Self::Limit => "limit",
            Self::Fraction => "fraction",
            Self::SimpleExpression => "expression",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The result of recognizing and rendering a natural-language math request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ParseResult {
    /// The LaTeX rendering of the request.
    pub latex: String,

    /// A plain-text echo of what was understood.
    pub plain_text: String,

    /// The strategy that recognized the request.
    pub method_used: Method,

    /// How confident the strategy is in its reading, in `[0, 1]`. This is a fixed value per
    /// operation kind and strategy.
    pub confidence: f64,

    /// The kind of operation that was recognized.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub kind: OperationKind,
}
