use ariadne::Source;
use natex::suggest::Suggestion;
use natex_parser::parser::error::Error as ParseError;

/// Utility enum to package the ways a request can fail to convert.
pub enum Error {
    /// Neither tier could read the request.
    Unprocessable {
        /// A keyword the request may have misspelled.
        suggestion: Option<Suggestion>,
    },

    /// The request is written as an infix expression, but the expression does not parse.
    Syntax(natex_error::Error),
}

impl Error {
    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type actually does not have a `Display` implementation, so
    /// we can only use its `eprint` method to print to stderr.
    ///
    /// [`Report`]: https://docs.rs/ariadne/latest/ariadne/struct.Report.html
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::Unprocessable { suggestion } => {
                eprintln!("error: could not read `{}` as math", input.trim());
                if let Some(suggestion) = suggestion {
                    eprintln!("help: did you mean `{}` instead of `{}`?", suggestion.keyword, suggestion.word);
                }
            },
            Self::Syntax(err) => {
                let report = err.build_report("input");
                if report.eprint(("input", Source::from(input))).is_err() {
                    eprintln!("error: {}", err);
                }
            },
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Syntax(err.into())
    }
}
