//! "Did you mean" hints for requests that could not be read.

use levenshtein::levenshtein;
use crate::lexicon::Lexicon;

/// A word in a request that is probably a misspelled operation keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The word as it was written.
    pub word: String,

    /// The keyword it is closest to.
    pub keyword: String,
}

/// Finds the first word of the text that is within two edits of an operation keyword, without
/// being one.
///
/// Words of three letters or fewer are skipped; too many of them are within two edits of `sum`
/// or `lim`.
pub fn suggest(lexicon: &Lexicon, text: &str) -> Option<Suggestion> {
    let text = text.to_lowercase();
    text.split(|c: char| !c.is_alphabetic())
        .filter(|word| word.chars().count() > 3)
        .filter(|word| !lexicon.operation_keywords.iter().any(|(keyword, _)| keyword == word))
        .find_map(|word| {
            lexicon.operation_keywords.iter()
                .map(|(keyword, _)| (levenshtein(word, keyword), keyword))
                .filter(|(distance, _)| (1..=2).contains(distance))
                .min_by_key(|(distance, _)| *distance)
                .map(|(_, keyword)| Suggestion {
                    word: word.to_string(),
                    keyword: keyword.clone(),
                })
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn suggestion(text: &str) -> Option<(String, String)> {
        suggest(Lexicon::shared(), text).map(|s| (s.word, s.keyword))
    }

    #[test]
    fn misspelled_keyword() {
        assert_eq!(suggestion("limmit x to 0"), Some(("limmit".to_string(), "limit".to_string())));
        assert_eq!(suggestion("Prodct of k"), Some(("prodct".to_string(), "product".to_string())));
    }

    #[test]
    fn nothing_close() {
        assert_eq!(suggestion("what a lovely day"), None);
        assert_eq!(suggestion("integral of banana"), None);
    }

    #[test]
    fn short_words_skipped() {
        assert_eq!(suggestion("sam of x"), None);
    }
}
