//! Converts natural-language descriptions of math into LaTeX.
//!
//! A request is read by two tiers. The first is an ordered table of patterns for common
//! phrasings, such as `integrate X with respect to V`. If no pattern produces a result, keyword
//! heuristics classify the request and extract its parts more loosely. Either way, the
//! mathematical fragments are rewritten into infix notation, parsed with [`natex_parser`], and
//! rendered into a LaTeX template for the recognized operation.
//!
//! ```
//! use natex::{parse, Method};
//!
//! let result = parse("integrate x squared with respect to y").unwrap();
//! assert_eq!(result.latex, "\\int x^{2} \\, dy");
//! assert_eq!(result.method_used, Method::PatternMatching);
//!
//! assert!(parse("   ").is_none());
//! ```

pub mod dispatch;
pub mod engine;
pub mod heuristic;
pub mod lexicon;
pub mod normalize;
pub mod operation;
pub mod preprocess;
pub mod result;
pub mod rules;
pub mod suggest;

pub use dispatch::{parse, parse_with, Dispatcher, Tier};
pub use lexicon::Lexicon;
pub use result::{Method, OperationKind, ParseResult};
