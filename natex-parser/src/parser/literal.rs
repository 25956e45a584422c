use std::{fmt, ops::Range};
use super::{
    call,
    error::{kind, Error},
    fmt::Latex,
    token::{Name, Number},
    Parse,
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number literal. Integers and decimals are both supported, and are kept exactly as they were
/// written so that `3.50` renders as `3.50`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The source text of the number literal.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let num = input.try_parse::<Number>()?;
        Ok(Self {
            value: num.lexeme,
            span: num.span,
        })
    }
}

/// A symbol / identifier literal. Symbols are used to represent variables.
///
/// The names of built-in functions, such as `sin`, are not symbols; they must be followed by a
/// parenthesized argument.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Name>()?;
        if call::is_builtin(&token.lexeme) {
            return Err(Error::new_fatal(
                vec![token.span],
                kind::MissingCallArgument { name: token.lexeme },
            ));
        }

        Ok(Self {
            name: token.lexeme,
            span: token.span,
        })
    }
}

/// Represents a literal value.
///
/// A literal is any value that is written directly into the source code, such as the number `2`
/// or the variable `x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A symbol / identifier literal.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(name) => name.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        match input.try_parse::<LitNum>() {
            Ok(num) => Ok(Literal::Number(num)),
            Err(_) => input.try_parse::<LitSym>().map(Literal::Symbol),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => write!(f, "{}", num.value),
            Literal::Symbol(sym) => write!(f, "{}", sym.name),
        }
    }
}

impl Latex for Literal {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => write!(f, "{}", num.value),
            Literal::Symbol(sym) => write!(f, "{}", sym.name),
        }
    }
}
