//! Parser and renderer for the small infix math language that natex rewrites natural-language
//! input into.
//!
//! The language has numbers, symbols, the binary operators `+ - * / ^` (with `**` accepted as
//! `^`), unary minus, parentheses, and single-argument function calls such as `sin(x)`.
//!
//! ```
//! use natex_parser::parser::{expr::Expr, fmt::Latex, Parser};
//!
//! let expr = Parser::new("1/x + x^2").try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "1/x + x^2");
//! assert_eq!(expr.as_display().to_string(), "\\frac{1}{x} + x^{2}");
//! ```

pub mod parser;
pub mod tokenizer;
