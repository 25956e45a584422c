//! Rewrites natural-language math fragments into infix notation the expression parser accepts.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use tracing::trace;
use crate::lexicon::{compile, word_regex, Lexicon};

static SHARED: Lazy<Preprocessor> = Lazy::new(|| Preprocessor::new(Lexicon::shared()));

/// Rewrites fragments such as `sin x squared plus 2x` into `sin(x)^2 + 2*x`.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    /// Operator words and their replacements, such as `plus` and `+`.
    operator_words: Vec<(Regex, String)>,

    /// `<atom> squared`.
    squared: Regex,

    /// `<atom> cubed`.
    cubed: Regex,

    /// `<atom> to the [power of] <exponent>`.
    power: Regex,

    /// A function name followed by whitespace and an optional `of`.
    call_head: Regex,

    /// The names of the functions that can be applied without parentheses.
    functions: Vec<String>,

    /// A digit followed by a letter.
    digit_letter: Regex,

    /// Two single-letter factors separated by whitespace.
    letter_pair: Regex,
}

impl Preprocessor {
    /// Compiles a preprocessor from the tables of the given lexicon.
    pub fn new(lexicon: &Lexicon) -> Self {
        let mut functions = lexicon.functions.clone();

        // `sinh` must be tried before `sin`
        functions.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let names = functions.iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");

        Self {
            operator_words: lexicon.operator_words.iter()
                .map(|(word, symbol)| (word_regex(word), format!(" {} ", symbol)))
                .collect(),
            squared: compile(r"([a-z0-9.]+|\))\s+(?:squared|square)\b"),
            cubed: compile(r"([a-z0-9.]+|\))\s+(?:cubed|cube)\b"),
            power: compile(
                r"([a-z0-9.]+|\))\s+to\s+the\s+(?:power\s+of\s+)?(\d+|[a-z])(?:st|nd|rd|th)?\b",
            ),
            call_head: compile(&format!(r"\b({})\s+(?:of\s+)?", names)),
            functions,
            digit_letter: compile(r"(\d)\s*([a-z])"),
            letter_pair: compile(r"\b([a-z](?:\^(?:\d+|[a-z]))?)\s+([a-z])\b"),
        }
    }

    /// Returns the preprocessor for [`Lexicon::shared`].
    pub fn shared() -> &'static Preprocessor {
        &SHARED
    }

    /// Rewrites the fragment into infix notation.
    ///
    /// The passes run in order: operator words, power phrases, function calls, and finally
    /// implicit multiplication.
    pub fn rewrite(&self, fragment: &str) -> String {
        let text = self.rewrite_words(fragment.trim());
        let text = self.rewrite_powers(&text);
        let text = self.insert_calls(&text);
        let text = self.insert_products(&text);
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        trace!(fragment, infix = %text, "rewrote fragment");
        text
    }

    /// Replaces operator words with their symbols.
    pub fn rewrite_words(&self, text: &str) -> String {
        self.operator_words.iter().fold(text.to_string(), |text, (pattern, symbol)| {
            pattern.replace_all(&text, NoExpand(symbol)).into_owned()
        })
    }

    /// Replaces power phrases with `^`.
    pub fn rewrite_powers(&self, text: &str) -> String {
        let text = self.squared.replace_all(text, "${1}^2");
        let text = self.cubed.replace_all(&text, "${1}^3");
        self.power.replace_all(&text, "${1}^${2}").into_owned()
    }

    /// Wraps the operand of every function name that is not followed by parentheses, so
    /// `sin cos x` becomes `sin(cos(x))`.
    pub fn insert_calls(&self, text: &str) -> String {
        let heads = self.call_head.captures_iter(text)
            .filter_map(|caps| Some((caps.get(0)?.range(), caps.get(1)?.as_str().to_string())))
            .collect::<Vec<_>>();

        // the innermost call is the rightmost one; wrapping right to left lets an outer call take
        // an already-wrapped call as its operand, and keeps the offsets of earlier heads valid
        let mut out = text.to_string();
        for (head, name) in heads.into_iter().rev() {
            let Some(len) = operand_len(&out[head.end..]) else {
                continue;
            };
            let operand = &out[head.end..head.end + len];
            if self.is_function(operand) {
                continue;
            }

            let call = format!("{}({})", name, operand);
            out.replace_range(head.start..head.end + len, &call);
        }
        out
    }

    /// Inserts `*` between implicitly multiplied factors, such as `2x` and `x y`.
    pub fn insert_products(&self, text: &str) -> String {
        let mut text = self.digit_letter.replace_all(text, "${1}*${2}").into_owned();

        // matches cannot overlap, so `x y z` takes two passes
        loop {
            let next = self.letter_pair.replace_all(&text, "${1}*${2}").into_owned();
            if next == text {
                return text;
            }
            text = next;
        }
    }

    /// Returns true if the word is one of the function names.
    fn is_function(&self, word: &str) -> bool {
        self.functions.iter().any(|name| name.eq_ignore_ascii_case(word))
    }
}

/// Returns the length of the operand at the start of the text: a run of letters, digits and
/// decimal points, optionally followed by a parenthesized group (making it a call), or a
/// parenthesized group on its own.
fn operand_len(text: &str) -> Option<usize> {
    let word = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '_'))
        .unwrap_or(text.len());

    if !text[word..].starts_with('(') {
        return (word > 0).then_some(word);
    }

    let mut depth = 0usize;
    for (i, c) in text[word..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(word + i + 1);
                }
            },
            _ => (),
        }
    }

    // unbalanced; leave it for the parser to report
    (word > 0).then_some(word)
}

/// Rewrites the fragment using the shared lexicon.
pub fn rewrite(fragment: &str) -> String {
    Preprocessor::shared().rewrite(fragment)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn operator_words() {
        assert_eq!(rewrite("x plus y"), "x + y");
        assert_eq!(rewrite("a minus b times c"), "a - b * c");
        assert_eq!(rewrite("x divided by y"), "x / y");
        assert_eq!(rewrite("1 over x"), "1 / x");
        assert_eq!(rewrite("x multiplied by y"), "x * y");
    }

    #[test]
    fn roots() {
        assert_eq!(rewrite("square root of x"), "sqrt(x)");
        assert_eq!(rewrite("squared root x"), "sqrt(x)");
        assert_eq!(rewrite("cube root of 8"), "cbrt(8)");
    }

    #[test]
    fn powers() {
        assert_eq!(rewrite("x squared"), "x^2");
        assert_eq!(rewrite("y cubed"), "y^3");
        assert_eq!(rewrite("x to the power of 5"), "x^5");
        assert_eq!(rewrite("x to the 4th"), "x^4");
        assert_eq!(rewrite("e to the x"), "e^x");
        assert_eq!(rewrite("x to the power of n"), "x^n");
        assert_eq!(rewrite("(x plus 1) squared"), "(x + 1)^2");
    }

    #[test]
    fn calls() {
        assert_eq!(rewrite("sin x"), "sin(x)");
        assert_eq!(rewrite("log of y"), "log(y)");
        assert_eq!(rewrite("arcsin x"), "arcsin(x)");
        assert_eq!(rewrite("sinh t"), "sinh(t)");
        assert_eq!(rewrite("sin cos x"), "sin(cos(x))");
        assert_eq!(rewrite("sin x squared"), "sin(x)^2");
        assert_eq!(rewrite("sin(x)"), "sin(x)");
        assert_eq!(rewrite("ln (x + 1)"), "ln((x + 1))");
    }

    #[test]
    fn calls_need_an_operand() {
        assert_eq!(rewrite("sin + 1"), "sin + 1");
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(rewrite("2x"), "2*x");
        assert_eq!(rewrite("3 y"), "3*y");
        assert_eq!(rewrite("x y z"), "x*y*z");
        assert_eq!(rewrite("x squared y"), "x^2*y");
        assert_eq!(rewrite("2 sin x"), "2*sin(x)");
    }

    #[test]
    fn operand_lengths() {
        assert_eq!(operand_len("x + 1"), Some(1));
        assert_eq!(operand_len("cos(tan(x)) y"), Some(11));
        assert_eq!(operand_len("(x)"), Some(3));
        assert_eq!(operand_len("+ 1"), None);
        assert_eq!(operand_len("f(x"), Some(1));
    }
}
