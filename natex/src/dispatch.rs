//! Runs the tiers in order and reports the first result.

use once_cell::sync::Lazy;
use tracing::debug;
use crate::{
    heuristic::HeuristicExtractor,
    lexicon::Lexicon,
    result::ParseResult,
    rules::RuleMatcher,
};

/// Which tiers to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Only the ordered rule table.
    Pattern,

    /// Only the keyword heuristics.
    Heuristic,

    /// The rule table, then the keyword heuristics if no rule produced a result.
    #[default]
    All,
}

impl Tier {
    fn runs_pattern(self) -> bool {
        matches!(self, Self::Pattern | Self::All)
    }

    fn runs_heuristic(self) -> bool {
        matches!(self, Self::Heuristic | Self::All)
    }
}

static SHARED: Lazy<Dispatcher> = Lazy::new(|| Dispatcher::new(Lexicon::shared()));

/// Tries the rule table first, then the keyword heuristics.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    matcher: RuleMatcher,
    extractor: HeuristicExtractor,
}

impl Dispatcher {
    /// Creates a dispatcher whose tiers read text with the tables of the given lexicon.
    pub fn new(lexicon: &Lexicon) -> Self {
        Self {
            matcher: RuleMatcher::new(lexicon),
            extractor: HeuristicExtractor::new(lexicon),
        }
    }

    /// Returns the dispatcher for [`Lexicon::shared`].
    pub fn shared() -> &'static Dispatcher {
        &SHARED
    }

    /// Converts the request with every tier.
    ///
    /// Returns [`None`] if the request is empty or no tier could read it.
    pub fn parse(&self, text: &str) -> Option<ParseResult> {
        self.parse_with(text, Tier::All)
    }

    /// Converts the request with the given tiers only.
    pub fn parse_with(&self, text: &str, tier: Tier) -> Option<ParseResult> {
        let text = text.trim();
        if text.is_empty() {
            debug!("empty input");
            return None;
        }

        if tier.runs_pattern() {
            if let Some(result) = self.matcher.parse(text) {
                return Some(result);
            }
            debug!(input = text, "no rule matched");
        }

        if tier.runs_heuristic() {
            if let Some(result) = self.extractor.parse(text) {
                return Some(result);
            }
            debug!(input = text, "heuristics found nothing");
        }

        None
    }
}

/// Converts the request with the shared dispatcher.
pub fn parse(text: &str) -> Option<ParseResult> {
    Dispatcher::shared().parse(text)
}

/// Converts the request with the shared dispatcher, running only the given tiers.
pub fn parse_with(text: &str, tier: Tier) -> Option<ParseResult> {
    Dispatcher::shared().parse_with(text, tier)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::result::Method;
    use super::*;

    #[test]
    fn empty() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("  \t\n "), None);
    }

    #[test]
    fn pattern_tier_first() {
        let result = parse("integrate x squared with respect to y").unwrap();
        assert_eq!(result.method_used, Method::PatternMatching);
    }

    #[test]
    fn heuristic_fallback() {
        let result = parse("x plus y").unwrap();
        assert_eq!(result.method_used, Method::Nlp);
    }

    #[test]
    fn single_tier() {
        assert_eq!(parse_with("x plus y", Tier::Pattern), None);

        let result = parse_with("integrate x squared with respect to y", Tier::Heuristic).unwrap();
        assert_eq!(result.method_used, Method::Nlp);
        assert_eq!(result.latex, "\\int x^{2} \\, dy");
    }

    #[test]
    fn unreadable() {
        assert_eq!(parse("what a lovely day"), None);
    }
}
