//! The heuristic tier: keyword classification and loose extraction, for phrasings the rule
//! table does not know.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;
use crate::{
    lexicon::{any_word_regex, compile, word_regex, Lexicon},
    normalize::TextNormalizer,
    operation::Operation,
    preprocess::Preprocessor,
    result::{Method, OperationKind, ParseResult},
};

/// Words removed from an integral request.
const INTEGRAL_WORDS: &[&str] = &["integrate", "integral", "integration", "of", "with", "respect", "to", "wrt"];

/// Words removed from a derivative request.
const DERIVATIVE_WORDS: &[&str] = &["derivative", "differentiate", "diff", "derive", "of", "with", "respect", "to", "wrt"];

/// Words removed from a partial derivative request.
const PARTIAL_WORDS: &[&str] = &["partial", "derivative", "of", "with", "respect", "to", "wrt"];

/// Words removed from a summation request.
const SUMMATION_WORDS: &[&str] = &["sum", "summation", "sigma", "from", "of", "to", "equals"];

/// Words removed from a product request.
const PRODUCT_WORDS: &[&str] = &["product", "from", "of", "to", "equals"];

/// Returns the confidence of a heuristic result of the given kind, or [`None`] if the heuristic
/// tier never produces that kind.
pub fn confidence(kind: OperationKind) -> Option<f64> {
    match kind {
        OperationKind::Integral | OperationKind::Derivative | OperationKind::Limit => Some(0.7),
        OperationKind::PartialDerivative
            | OperationKind::Summation
            | OperationKind::Product => Some(0.65),
        OperationKind::SimpleExpression => Some(0.6),
        OperationKind::Fraction => None,
    }
}

static SHARED: Lazy<HeuristicExtractor> = Lazy::new(|| HeuristicExtractor::new(Lexicon::shared()));

/// Classifies a request by its keywords, then extracts the parts of the operation loosely.
#[derive(Debug, Clone)]
pub struct HeuristicExtractor {
    normalizer: TextNormalizer,
    preprocessor: Preprocessor,

    /// Operation keywords, in priority order.
    keywords: Vec<(Regex, OperationKind)>,

    /// Patterns that name the variable of an operation explicitly.
    variable_patterns: Vec<Regex>,

    /// Any single-letter word.
    letter: Regex,

    /// Filler words.
    fillers: Regex,

    /// Filler words, for telling letters apart from them.
    filler_words: Vec<String>,

    /// Variable names to prefer.
    preferred_variables: Vec<char>,

    /// `(from|of) V (equals|=) START to END`.
    bounds: Regex,

    /// `(lim|limit|as) V (approaches|goes to|tends to|->) TARGET [of] EXPR`.
    limit: Regex,

    /// Runs of whitespace.
    whitespace: Regex,
}

impl HeuristicExtractor {
    /// Creates an extractor that reads text with the tables of the given lexicon.
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            normalizer: TextNormalizer::new(lexicon),
            preprocessor: Preprocessor::new(lexicon),
            keywords: lexicon.operation_keywords.iter()
                .map(|(word, kind)| (word_regex(word), *kind))
                .collect(),
            variable_patterns: vec![
                compile(r"with\s+respect\s+to\s+([a-z])\b"),
                compile(r"\bwrt\s+([a-z])\b"),
                compile(r"\bw\.r\.t\.?\s+([a-z])\b"),
                compile(r"\bd([a-z])\b"),
            ],
            letter: compile(r"\b([a-z])\b"),
            fillers: any_word_regex(lexicon.filler_words.iter().map(String::as_str)),
            filler_words: lexicon.filler_words.clone(),
            preferred_variables: lexicon.preferred_variables.clone(),
            bounds: compile(
                r"\b(?:from|of)\s+([a-z])\s*(?:equals|=)\s*([a-z0-9]+)\s+to\s+([a-z0-9]+)\b",
            ),
            limit: compile(
                r"\b(?:lim|limit|as)\s+([a-z])(?:\s+(?:approaches|goes\s+to|tends\s+to)\s+|\s*->\s*)(-?[a-z0-9.]+|∞)\s+(?:of\s+)?(.+)",
            ),
            whitespace: compile(r"\s+"),
        }
    }

    /// Returns the extractor for [`Lexicon::shared`].
    pub fn shared() -> &'static HeuristicExtractor {
        &SHARED
    }

    /// Returns the kind of operation the text asks for: the first operation keyword (in table
    /// order) that appears in the text as a whole word, or [`OperationKind::SimpleExpression`].
    pub fn classify(&self, text: &str) -> OperationKind {
        self.keywords.iter()
            .find(|(keyword, _)| keyword.is_match(text))
            .map_or(OperationKind::SimpleExpression, |(_, kind)| *kind)
    }

    /// Returns the variable the text operates on.
    ///
    /// A variable named by `with respect to V`, `wrt V`, `w.r.t. V`, or `dV` wins. Otherwise, the
    /// preferred variable names are tried in order among the single-letter words of the text,
    /// then the first single-letter word. If there are none, the variable is `x`.
    pub fn extract_variable(&self, text: &str) -> String {
        if let Some(var) = self.variable_patterns.iter()
            .find_map(|pattern| pattern.captures(text))
            .and_then(|caps| caps.get(1))
        {
            return var.as_str().to_string();
        }

        let letters = self.letter.captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|letter| !self.filler_words.iter().any(|filler| filler == letter))
            .collect::<Vec<_>>();

        self.preferred_variables.iter()
            .map(|var| var.to_string())
            .find(|var| letters.contains(&var.as_str()))
            .or_else(|| letters.first().map(|letter| letter.to_string()))
            .unwrap_or_else(|| "x".to_string())
    }

    /// Normalizes the text, classifies it, and extracts the operation.
    pub fn parse(&self, text: &str) -> Option<ParseResult> {
        let text = self.normalizer.normalize(text);
        let kind = self.classify(&text);
        debug!(kind = %kind, "heuristic tier classified input");

        let operation = match kind {
            OperationKind::Integral => self.integral(&text),
            OperationKind::Derivative => self.derivative(&text),
            OperationKind::PartialDerivative => self.partial(&text),
            OperationKind::Summation => self.bounded(&text, SUMMATION_WORDS, |var, start, end, expr| {
                Operation::Summation { expr, var, start, end }
            }),
            OperationKind::Product => self.bounded(&text, PRODUCT_WORDS, |var, start, end, expr| {
                Operation::Product { expr, var, start, end }
            }),
            OperationKind::Limit => self.limit(&text),
            OperationKind::SimpleExpression | OperationKind::Fraction => self.simple(&text),
        }?;

        match operation.render(&self.preprocessor) {
            Ok(rendered) => Some(ParseResult {
                latex: rendered.latex,
                plain_text: rendered.plain,
                method_used: Method::Nlp,
                confidence: confidence(kind)?,
                kind,
            }),
            Err(err) => {
                debug!(kind = %kind, ?operation, error = %err, "extracted expression did not parse");
                None
            },
        }
    }

    /// Removes the given words and the filler words from the text, then collapses whitespace.
    ///
    /// Filler words listed in `keep` stay; a request that names `i` as its variable still needs
    /// `i` in the expression.
    fn strip(&self, text: &str, words: &[&str], keep: &[&str]) -> String {
        let text = any_word_regex(words.iter().copied()).replace_all(text, " ");
        let text = self.fillers.replace_all(&text, |caps: &Captures| {
            let filler = &caps[0];
            if keep.iter().any(|word| word.eq_ignore_ascii_case(filler)) {
                filler.to_string()
            } else {
                " ".to_string()
            }
        });
        self.whitespace.replace_all(&text, " ").trim().to_string()
    }

    /// Removes the phrase naming the variable (`with respect to V`, `dV`, ...), rewrites power
    /// phrases, then strips the operation words and filler words.
    ///
    /// Power phrases are rewritten before `to` and `the` are stripped as filler words.
    fn operand(&self, text: &str, var: &str, words: &[&str]) -> Option<String> {
        let escaped = regex::escape(var);
        let marker = compile(&format!(
            r"(?:\b(?:with\s+respect\s+to|wrt|w\.r\.t\.?)\s+{escaped}\b|\bd{escaped}\b)",
        ));
        let text = marker.replace_all(text, " ");
        let text = self.preprocessor.rewrite_powers(&text);
        let expr = self.strip(&text, words, &[var]);
        (!expr.is_empty()).then_some(expr)
    }

    fn integral(&self, text: &str) -> Option<Operation> {
        let var = self.extract_variable(text);
        let expr = self.operand(text, &var, INTEGRAL_WORDS)?;
        Some(Operation::Integral { expr, var })
    }

    fn derivative(&self, text: &str) -> Option<Operation> {
        let var = self.extract_variable(text);
        let expr = self.operand(text, &var, DERIVATIVE_WORDS)?;
        Some(Operation::Derivative { expr, var })
    }

    fn partial(&self, text: &str) -> Option<Operation> {
        let var = self.extract_variable(text);
        let expr = self.operand(text, &var, PARTIAL_WORDS)?;
        Some(Operation::PartialDerivative { expr, var })
    }

    /// Extracts a summation or product: the bound clause is required, and the rest of the text is
    /// the expression. An empty expression is the bound variable itself.
    fn bounded(
        &self,
        text: &str,
        words: &[&str],
        build: fn(String, String, String, String) -> Operation,
    ) -> Option<Operation> {
        let caps = self.bounds.captures(text)?;
        let [var, start, end] = [1, 2, 3].map(|i| group(&caps, i));
        let (var, start, end) = (var?, start?, end?);
        let clause = caps.get(0)?.range();

        let rest = format!("{} {}", &text[..clause.start], &text[clause.end..]);
        let rest = self.preprocessor.rewrite_powers(&rest);
        let expr = self.strip(&rest, words, &[var.as_str(), start.as_str(), end.as_str()]);
        let expr = if expr.is_empty() { var.clone() } else { expr };
        Some(build(var, start, end, expr))
    }

    fn limit(&self, text: &str) -> Option<Operation> {
        let caps = self.limit.captures(text)?;
        let var = group(&caps, 1)?;
        let approach = group(&caps, 2)?;
        let expr = self.preprocessor.rewrite_powers(&group(&caps, 3)?);
        let expr = self.strip(&expr, &[], &[var.as_str()]);
        (!expr.is_empty()).then_some(Operation::Limit { expr, var, approach })
    }

    fn simple(&self, text: &str) -> Option<Operation> {
        let text = self.preprocessor.rewrite_powers(text);
        let expr = self.strip(&text, &[], &[]);
        (!expr.is_empty()).then_some(Operation::SimpleExpression { expr })
    }
}

/// Returns the trimmed text of the given capture group.
fn group(caps: &Captures, index: usize) -> Option<String> {
    caps.get(index).map(|m| m.as_str().trim().to_string())
}
