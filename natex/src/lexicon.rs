//! The word tables that drive every stage of the pipeline.

use natex_parser::parser::call;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use crate::result::OperationKind;

/// Misspellings and their corrections.
const TYPOS: &[(&str, &str)] = &[
    ("square", "squared"),
    ("cube", "cubed"),
    ("sqaure", "squared"),
    ("sqared", "squared"),
    ("intergrate", "integrate"),
    ("integrat", "integrate"),
    ("derivate", "derivative"),
    ("diferentiate", "differentiate"),
    ("diferential", "differential"),
    ("summaton", "summation"),
    ("sumation", "summation"),
];

/// Alternate names of operations.
const SYNONYMS: &[(&str, &str)] = &[
    ("diff", "derivative"),
    ("deriv", "derivative"),
    ("d/dx", "derivative"),
    ("int", "integrate"),
    ("sigma", "sum"),
    ("σ", "sum"),
    ("ς", "sum"),
    ("∑", "sum"),
];

/// Abbreviations that are spelled out. Longer forms of the same abbreviation come first.
const SHORTHANDS: &[(&str, &str)] = &[
    ("wrt", "with respect to"),
    ("w.r.t.", "with respect to"),
    ("w.r.t", "with respect to"),
    ("rt", "with respect to"),
    ("^", " to the power of "),
];

/// Words and phrases that stand for an operator or a function name.
const OPERATOR_WORDS: &[(&str, &str)] = &[
    ("squared root", "sqrt"),
    ("square root", "sqrt"),
    ("cubed root", "cbrt"),
    ("cube root", "cbrt"),
    ("multiplied by", "*"),
    ("divided by", "/"),
    ("divide by", "/"),
    ("plus", "+"),
    ("minus", "-"),
    ("times", "*"),
    ("multiply", "*"),
    ("over", "/"),
];

/// Keywords that identify an operation. Earlier keywords win.
const OPERATION_KEYWORDS: &[(&str, OperationKind)] = &[
    ("integrate", OperationKind::Integral),
    ("integration", OperationKind::Integral),
    ("integral", OperationKind::Integral),
    ("derivative", OperationKind::Derivative),
    ("differentiate", OperationKind::Derivative),
    ("diff", OperationKind::Derivative),
    ("derive", OperationKind::Derivative),
    ("partial", OperationKind::PartialDerivative),
    ("sum", OperationKind::Summation),
    ("summation", OperationKind::Summation),
    ("sigma", OperationKind::Summation),
    ("product", OperationKind::Product),
    ("limit", OperationKind::Limit),
    ("lim", OperationKind::Limit),
];

/// Conversational words that carry no math.
const FILLER_WORDS: &[&str] = &[
    "i", "want", "to", "find", "the", "please", "can", "you", "calculate", "compute",
    "determine", "what", "is", "help", "me", "solve", "get", "give", "show",
];

/// Variable names to prefer, in order, when a request does not name its variable.
const PREFERRED_VARIABLES: &[char] = &['x', 'y', 'z', 't', 'n', 'i', 'j', 'k'];

static SHARED: Lazy<Lexicon> = Lazy::new(Lexicon::default);

/// Every word table used to read natural-language math.
///
/// [`Lexicon::default`] is the built-in set of tables. Components are built from a lexicon once
/// and compile its tables into the patterns they need; [`Lexicon::shared`] is the instance used by
/// the free functions of this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    /// Misspellings and their corrections, applied as whole words in order.
    pub typos: Vec<(String, String)>,

    /// Alternate operation names and their standard name, applied after typos.
    pub synonyms: Vec<(String, String)>,

    /// Abbreviations and their expansions, applied after synonyms.
    pub shorthands: Vec<(String, String)>,

    /// Words that stand for operators, such as `plus`, and their infix replacement.
    pub operator_words: Vec<(String, String)>,

    /// Names of the functions that can be applied without parentheses, as in `sin x`.
    pub functions: Vec<String>,

    /// Keywords that identify an operation, in priority order.
    pub operation_keywords: Vec<(String, OperationKind)>,

    /// Words that are removed before an expression is read.
    pub filler_words: Vec<String>,

    /// Variable names to prefer when a request does not name its variable.
    pub preferred_variables: Vec<char>,
}

fn owned_pairs<T: Clone>(pairs: &[(&str, T)]) -> Vec<(String, T)> {
    pairs.iter()
        .map(|(word, value)| (word.to_string(), value.clone()))
        .collect()
}

fn owned_replacements(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter()
        .map(|(word, replacement)| (word.to_string(), replacement.to_string()))
        .collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            typos: owned_replacements(TYPOS),
            synonyms: owned_replacements(SYNONYMS),
            shorthands: owned_replacements(SHORTHANDS),
            operator_words: owned_replacements(OPERATOR_WORDS),
            functions: call::names().map(String::from).collect(),
            operation_keywords: owned_pairs(OPERATION_KEYWORDS),
            filler_words: FILLER_WORDS.iter().map(|word| word.to_string()).collect(),
            preferred_variables: PREFERRED_VARIABLES.to_vec(),
        }
    }
}

impl Lexicon {
    /// Returns the process-wide lexicon, built from [`Lexicon::default`] on first use.
    pub fn shared() -> &'static Lexicon {
        &SHARED
    }

    /// Returns true if the word is a filler word.
    pub fn is_filler(&self, word: &str) -> bool {
        self.filler_words.iter().any(|filler| filler == word)
    }
}

/// Returns a pattern that matches the given word or phrase literally, but only as a whole word.
/// Spaces in a phrase match any run of whitespace.
pub(crate) fn word_pattern(word: &str) -> String {
    let body = word.split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");

    // `\b` only makes sense next to a word character: `w.r.t.` must not require one after it
    let is_word_char = |c: Option<char>| c.map_or(false, |c| c.is_alphanumeric() || c == '_');
    let start = if is_word_char(word.trim().chars().next()) { r"\b" } else { "" };
    let end = if is_word_char(word.trim().chars().last()) { r"\b" } else { "" };
    format!("{}{}{}", start, body, end)
}

/// Compiles a pattern built from escaped words, matching case-insensitively.
pub(crate) fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("patterns built from escaped words are valid")
}

/// Compiles a regex that matches the given word or phrase as a whole word.
pub(crate) fn word_regex(word: &str) -> Regex {
    compile(&word_pattern(word))
}

/// Compiles a regex that matches any of the given words as a whole word.
pub(crate) fn any_word_regex<'a>(words: impl IntoIterator<Item = &'a str>) -> Regex {
    let alternatives = words.into_iter()
        .filter(|word| !word.trim().is_empty())
        .map(word_pattern)
        .collect::<Vec<_>>();
    if alternatives.is_empty() {
        // matches nothing
        return compile(r"\b\B");
    }
    compile(&format!("(?:{})", alternatives.join("|")))
}
