//! Cleans up raw input before anything tries to read it.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::{fmt, ops::Deref};
use crate::lexicon::{compile, word_regex, Lexicon};

static SHARED: Lazy<TextNormalizer> = Lazy::new(|| TextNormalizer::new(Lexicon::shared()));

/// Text that has been lowercased, trimmed, typo-corrected, synonym-expanded, and had its
/// whitespace collapsed.
///
/// The only way to obtain one is through [`TextNormalizer::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Normalized(String);

impl Normalized {
    /// Returns the normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the normalized text as an owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Normalized {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Normalized {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A compiled table of whole-word substitutions.
type Substitutions = Vec<(Regex, String)>;

fn substitutions(table: &[(String, String)]) -> Substitutions {
    table.iter()
        .map(|(word, replacement)| (word_regex(word), replacement.clone()))
        .collect()
}

fn apply(table: &Substitutions, text: String) -> String {
    table.iter().fold(text, |text, (pattern, replacement)| {
        pattern.replace_all(&text, NoExpand(replacement)).into_owned()
    })
}

/// Corrects typos, expands synonyms and shorthands, and collapses whitespace.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    typos: Substitutions,
    synonyms: Substitutions,
    shorthands: Substitutions,
    whitespace: Regex,
}

impl TextNormalizer {
    /// Compiles a normalizer from the tables of the given lexicon.
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            typos: substitutions(&lexicon.typos),
            synonyms: substitutions(&lexicon.synonyms),
            shorthands: substitutions(&lexicon.shorthands),
            whitespace: compile(r"\s+"),
        }
    }

    /// Returns the normalizer for [`Lexicon::shared`].
    pub fn shared() -> &'static TextNormalizer {
        &SHARED
    }

    /// Normalizes the given text. Normalizing already-normalized text does nothing.
    pub fn normalize(&self, text: &str) -> Normalized {
        let text = text.trim().to_lowercase();

        // typos are fixed first so that a corrected word can still be replaced by its synonym
        let text = apply(&self.typos, text);
        let text = apply(&self.synonyms, text);
        let text = apply(&self.shorthands, text);

        let text = self.whitespace.replace_all(&text, " ");
        Normalized(text.trim().to_string())
    }
}

/// Normalizes the given text using the shared lexicon.
pub fn normalize(text: &str) -> Normalized {
    TextNormalizer::shared().normalize(text)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn lowercases_and_collapses() {
        assert_eq!(normalize("  Integrate   X\tdx ").as_str(), "integrate x dx");
    }

    #[test]
    fn fixes_typos() {
        assert_eq!(normalize("intergrate x sqaure").as_str(), "integrate x squared");
        assert_eq!(normalize("x square").as_str(), "x squared");
        assert_eq!(normalize("y cube").as_str(), "y cubed");
        assert_eq!(normalize("sumation of i").as_str(), "summation of i");
    }

    #[test]
    fn typos_only_match_whole_words() {
        assert_eq!(normalize("x squared").as_str(), "x squared");
        assert_eq!(normalize("integrate x").as_str(), "integrate x");
    }

    #[test]
    fn expands_synonyms() {
        assert_eq!(normalize("diff x squared").as_str(), "derivative x squared");
        assert_eq!(normalize("int x dx").as_str(), "integrate x dx");
        assert_eq!(normalize("d/dx sin x").as_str(), "derivative sin x");
        assert_eq!(normalize("sigma from i=1 to n of i").as_str(), "sum from i=1 to n of i");
        assert_eq!(normalize("Σ from i=1 to n of i").as_str(), "sum from i=1 to n of i");
        assert_eq!(normalize("∑ from i=1 to n of i").as_str(), "sum from i=1 to n of i");
    }

    #[test]
    fn expands_shorthands() {
        assert_eq!(normalize("x wrt x").as_str(), "x with respect to x");
        assert_eq!(normalize("x w.r.t. y").as_str(), "x with respect to y");
        assert_eq!(normalize("x w.r.t y").as_str(), "x with respect to y");
        assert_eq!(normalize("x rt t").as_str(), "x with respect to t");
        assert_eq!(normalize("x^2").as_str(), "x to the power of 2");
    }

    #[test]
    fn idempotent() {
        for text in [
            "Intergrate x^2 W.R.T. y",
            "  diff  sin x wrt x",
            "sigma from i = 1 to n of i square",
            "limit as x approaches ∞ of 1/x",
            "",
        ] {
            let once = normalize(text);
            let twice = normalize(&once);
            assert_eq!(once, twice);
        }
    }
}
