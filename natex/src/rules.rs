//! The pattern tier: an ordered table of regular expressions for common phrasings.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, trace};
use crate::{
    lexicon::Lexicon,
    normalize::TextNormalizer,
    operation::Operation,
    preprocess::Preprocessor,
    result::{Method, OperationKind, ParseResult},
};

/// A phrasing the pattern tier recognizes.
pub struct Rule {
    /// The kind of operation this rule recognizes.
    pub kind: OperationKind,

    /// The confidence of a result produced by this rule.
    pub confidence: f64,

    /// The pattern, matched anywhere in normalized text.
    pub pattern: Regex,

    /// Builds the operation from the captures of the pattern.
    extract: fn(&Captures) -> Option<Operation>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("confidence", &self.confidence)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl Rule {
    fn new(
        kind: OperationKind,
        confidence: f64,
        pattern: &str,
        extract: fn(&Captures) -> Option<Operation>,
    ) -> Self {
        Self {
            kind,
            confidence,
            pattern: Regex::new(pattern).expect("rule patterns are valid"),
            extract,
        }
    }

    /// Extracts the operation if the pattern matches the text.
    pub fn extract(&self, text: &str) -> Option<Operation> {
        self.pattern.captures(text).and_then(|caps| (self.extract)(&caps))
    }
}

/// Returns the trimmed text of the given capture group.
fn group(caps: &Captures, index: usize) -> Option<String> {
    caps.get(index)
        .map(|m| m.as_str().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// `... X ... V`: the expression comes first.
fn integral(caps: &Captures) -> Option<Operation> {
    Some(Operation::Integral { expr: group(caps, 1)?, var: group(caps, 2)? })
}

fn derivative(caps: &Captures) -> Option<Operation> {
    Some(Operation::Derivative { expr: group(caps, 1)?, var: group(caps, 2)? })
}

/// `d/dV X`: the variable comes first.
fn derivative_short(caps: &Captures) -> Option<Operation> {
    Some(Operation::Derivative { expr: group(caps, 2)?, var: group(caps, 1)? })
}

fn partial(caps: &Captures) -> Option<Operation> {
    let expr = group(caps, 1)?;
    let expr = expr.strip_prefix("of ").map(str::to_string).unwrap_or(expr);
    Some(Operation::PartialDerivative { expr, var: group(caps, 2)? })
}

fn summation(caps: &Captures) -> Option<Operation> {
    Some(Operation::Summation {
        var: group(caps, 1)?,
        start: group(caps, 2)?,
        end: group(caps, 3)?,
        expr: group(caps, 4)?,
    })
}

fn product(caps: &Captures) -> Option<Operation> {
    Some(Operation::Product {
        var: group(caps, 1)?,
        start: group(caps, 2)?,
        end: group(caps, 3)?,
        expr: group(caps, 4)?,
    })
}

fn limit(caps: &Captures) -> Option<Operation> {
    Some(Operation::Limit {
        var: group(caps, 1)?,
        approach: group(caps, 2)?,
        expr: group(caps, 3)?,
    })
}

fn fraction(caps: &Captures) -> Option<Operation> {
    Some(Operation::Fraction { numerator: group(caps, 1)?, denominator: group(caps, 2)? })
}

/// The rules, in priority order.
///
/// Partial derivatives come before plain derivatives, whose patterns would otherwise claim
/// `partial derivative of ...`. Fractions come last, since `over` and `divided by` appear inside
/// the expressions of every other operation.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    use OperationKind::*;

    const RESPECT: &str = r"(?:with\s+respect\s+to|wrt)";
    let bounds = |keyword: &str| {
        format!(
            r"\b{}\s+(?:from|of)\s+([a-z])\s*(?:equals|=)\s*([a-z0-9]+)\s+to\s+([a-z0-9]+)\s+(?:of\s+)?(.+)",
            keyword,
        )
    };

    vec![
        Rule::new(
            Integral, 0.9,
            r"\bintegrate\s+(.+?)\s+(?:with\s+respect\s+to|wrt|w\.?r\.?t\.?)\s+([a-z])\b",
            integral,
        ),
        Rule::new(Integral, 0.9, r"\bintegral\s+of\s+(.+?)\s+(?:d|with\s+respect\s+to\s*)([a-z])\b", integral),
        Rule::new(Integral, 0.9, r"\bintegrate\s+(.+?)\s+d([a-z])\b", integral),
        // the default synonyms spell `int` out before matching; this rule reads it for
        // lexicons that do not
        Rule::new(Integral, 0.9, r"\bint\s+(.+?)\s+d([a-z])\b", integral),
        Rule::new(
            PartialDerivative, 0.85,
            &format!(r"\bpartial\s+derivative\s+of\s+(.+?)\s+{}\s+([a-z])\b", RESPECT),
            partial,
        ),
        Rule::new(
            PartialDerivative, 0.85,
            &format!(r"\bpartial\s+(.+?)\s+{}\s+([a-z])\b", RESPECT),
            partial,
        ),
        Rule::new(
            Derivative, 0.9,
            &format!(r"\bderivative\s+of\s+(.+?)\s+{}\s+([a-z])\b", RESPECT),
            derivative,
        ),
        Rule::new(
            Derivative, 0.9,
            &format!(r"\bdifferentiate\s+(.+?)\s+{}\s+([a-z])\b", RESPECT),
            derivative,
        ),
        Rule::new(
            Derivative, 0.9,
            &format!(r"\bderiv(?:ative)?\s+of\s+(.+?)\s+{}\s+([a-z])\b", RESPECT),
            derivative,
        ),
        Rule::new(Derivative, 0.85, r"\bd/d([a-z])\s+(?:of\s+)?(.+)", derivative_short),
        Rule::new(Summation, 0.9, &bounds("sum"), summation),
        Rule::new(Summation, 0.9, &bounds("summation"), summation),
        Rule::new(Summation, 0.9, &bounds("sigma"), summation),
        Rule::new(Product, 0.9, &bounds("product"), product),
        Rule::new(
            Limit, 0.85,
            r"\blimit\s+as\s+([a-z])\s+(?:approaches|goes\s+to|tends\s+to)\s+(.+?)\s+of\s+(.+)",
            limit,
        ),
        Rule::new(Limit, 0.85, r"\blim\s+([a-z])\s*->\s*(.+?)\s+(?:of\s+)?(.+)", limit),
        Rule::new(Fraction, 0.8, r"(.+?)\s+(?:divided\s+by|over)\s+(.+)", fraction),
    ]
});

/// Returns the rules of the pattern tier, in priority order.
pub fn rules() -> &'static [Rule] {
    &RULES
}

static SHARED: Lazy<RuleMatcher> = Lazy::new(|| RuleMatcher::new(Lexicon::shared()));

/// Matches normalized text against the rule table. The first rule whose pattern matches and whose
/// expressions parse wins.
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    normalizer: TextNormalizer,
    preprocessor: Preprocessor,
}

impl RuleMatcher {
    /// Creates a matcher that reads text with the tables of the given lexicon.
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            normalizer: TextNormalizer::new(lexicon),
            preprocessor: Preprocessor::new(lexicon),
        }
    }

    /// Returns the matcher for [`Lexicon::shared`].
    pub fn shared() -> &'static RuleMatcher {
        &SHARED
    }

    /// Normalizes the text and tries every rule in order.
    pub fn parse(&self, text: &str) -> Option<ParseResult> {
        let text = self.normalizer.normalize(text);

        for (index, rule) in rules().iter().enumerate() {
            let Some(operation) = rule.extract(&text) else {
                continue;
            };
            trace!(rule = index + 1, kind = %rule.kind, ?operation, "rule matched");

            match operation.render(&self.preprocessor) {
                Ok(rendered) => {
                    debug!(rule = index + 1, kind = %rule.kind, "pattern tier recognized input");
                    return Some(ParseResult {
                        latex: rendered.latex,
                        plain_text: rendered.plain,
                        method_used: Method::PatternMatching,
                        confidence: rule.confidence,
                        kind: rule.kind,
                    });
                },
                Err(err) => {
                    debug!(rule = index + 1, kind = %rule.kind, error = %err, "rule matched but expression did not parse");
                },
            }
        }

        None
    }
}
