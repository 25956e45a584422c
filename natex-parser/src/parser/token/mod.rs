pub mod op;

use crate::{
    parser::{error::{kind, Error}, Parser, Parse},
    tokenizer::{Token, TokenKind},
};
use std::ops::Range;

/// Takes the next token if it is one of the expected kinds.
fn expect<'source>(
    input: &mut Parser<'source>,
    expected: &'static [TokenKind],
) -> Result<Token<'source>, Error> {
    let token = input.next_token()?;
    if expected.contains(&token.kind) {
        Ok(token)
    } else {
        Err(Error::new(vec![token.span], kind::UnexpectedToken {
            expected,
            found: token.kind,
        }))
    }
}

/// Generates a struct and a [`Parse`] implementation for each token whose text matters, such as
/// a name or a number. A struct can accept several token kinds.
macro_rules! text_tokens {
    ($($name:ident => [$($kind:ident),+]),* $(,)?) => {
        $(
            #[derive(Clone, Debug, PartialEq)]
            pub(crate) struct $name {
                pub(crate) lexeme: String,
                pub(crate) span: Range<usize>,
            }

            impl Parse for $name {
                fn parse(input: &mut Parser) -> Result<Self, Error> {
                    let token = expect(input, &[$(TokenKind::$kind),+])?;
                    Ok(Self {
                        lexeme: token.lexeme.to_owned(),
                        span: token.span,
                    })
                }
            }
        )*
    };
}

/// Generates a struct and a [`Parse`] implementation for each delimiter token. Only the position
/// of a delimiter is kept.
macro_rules! delimiter_tokens {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Clone, Debug, PartialEq)]
            pub(crate) struct $name {
                pub(crate) span: Range<usize>,
            }

            impl Parse for $name {
                fn parse(input: &mut Parser) -> Result<Self, Error> {
                    let token = expect(input, &[TokenKind::$name])?;
                    Ok(Self { span: token.span })
                }
            }
        )*
    };
}

text_tokens! {
    Name => [Name],
    Number => [Int, Float],
}

delimiter_tokens!(OpenParen, CloseParen);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn number_accepts_ints_and_floats() {
        let mut parser = Parser::new("12 .5 3.25");
        let lexemes = (0..3)
            .map(|_| parser.try_parse::<Number>().unwrap().lexeme)
            .collect::<Vec<_>>();
        assert_eq!(lexemes, vec!["12", ".5", "3.25"]);
    }

    #[test]
    fn wrong_kind_leaves_cursor() {
        let mut parser = Parser::new("x)");
        assert!(parser.try_parse::<Number>().is_err());
        assert!(parser.try_parse::<OpenParen>().is_err());
        assert_eq!(parser.try_parse::<Name>().unwrap().span, 0..1);
        assert_eq!(parser.try_parse::<CloseParen>().unwrap().span, 1..2);
    }
}
