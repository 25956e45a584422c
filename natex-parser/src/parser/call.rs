use std::{fmt, ops::Range};
use super::{
    error::Error,
    expr::Expr,
    fmt::Latex,
    literal::LitSym,
    paren,
    token::{Name, OpenParen},
    Parse,
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a built-in function is written in LaTeX.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatexStyle {
    /// A named operator, written as `\sin{(x)}`.
    Operator(&'static str),

    /// A root of the given degree (square root if [`None`]), written as `\sqrt{x}` or
    /// `\sqrt[3]{x}`.
    Root(Option<u8>),

    /// The natural exponential, written as `e^{x}`.
    Exp,

    /// Absolute value, written as `\left|x\right|`.
    Abs,
}

/// The built-in functions, in the order they are listed to users.
const BUILTINS: &[(&str, LatexStyle)] = &[
    ("sin", LatexStyle::Operator("sin")),
    ("cos", LatexStyle::Operator("cos")),
    ("tan", LatexStyle::Operator("tan")),
    ("sec", LatexStyle::Operator("sec")),
    ("csc", LatexStyle::Operator("csc")),
    ("cot", LatexStyle::Operator("cot")),
    ("sinh", LatexStyle::Operator("sinh")),
    ("cosh", LatexStyle::Operator("cosh")),
    ("tanh", LatexStyle::Operator("tanh")),
    ("arcsin", LatexStyle::Operator("arcsin")),
    ("arccos", LatexStyle::Operator("arccos")),
    ("arctan", LatexStyle::Operator("arctan")),
    ("asin", LatexStyle::Operator("arcsin")),
    ("acos", LatexStyle::Operator("arccos")),
    ("atan", LatexStyle::Operator("arctan")),
    ("log", LatexStyle::Operator("log")),
    ("ln", LatexStyle::Operator("ln")),
    ("exp", LatexStyle::Exp),
    ("sqrt", LatexStyle::Root(None)),
    ("cbrt", LatexStyle::Root(Some(3))),
    ("abs", LatexStyle::Abs),
];

/// Returns the LaTeX style of the built-in function with the given name.
pub fn builtin(name: &str) -> Option<LatexStyle> {
    BUILTINS.iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, style)| *style)
}

/// Returns true if the given name is a built-in function.
pub fn is_builtin(name: &str) -> bool {
    builtin(name).is_some()
}

/// Returns the names of all built-in functions.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

/// A function call, such as `sin(x)` or `f(x + 1)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The argument to the function.
    pub arg: Box<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the argument.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the LaTeX style of the function, if it is a built-in function.
    pub fn builtin(&self) -> Option<LatexStyle> {
        builtin(&self.name.name)
    }

    /// Returns true if the function is written as a named operator, such as `\sin`.
    pub fn is_operator(&self) -> bool {
        matches!(self.builtin(), Some(LatexStyle::Operator(_)))
    }

    /// Formats the call raised to the given exponent the way named operators are, such as
    /// `\sin^{2}{(x)}`. Only meaningful if [`Call::is_operator`] is true.
    pub(crate) fn fmt_latex_pow(&self, f: &mut fmt::Formatter, exp: &Expr) -> fmt::Result {
        let op = match self.builtin() {
            Some(LatexStyle::Operator(op)) => op,
            _ => self.name.name.as_str(),
        };

        write!(f, "\\{}^{{", op)?;
        exp.innermost().fmt_latex(f)?;
        write!(f, "}}{{(")?;
        self.arg.innermost().fmt_latex(f)?;
        write!(f, ")}}")
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        // the name is read as a raw token: built-in names are rejected as symbols
        let name = input.try_parse::<Name>()?;
        let open_paren = input.try_parse::<OpenParen>()?;
        let (arg, close_paren) = paren::parse_delimited(input, open_paren.span.clone())?;

        Ok(Self {
            span: name.span.start..close_paren.end,
            name: LitSym { name: name.lexeme, span: name.span },
            arg: Box::new(arg),
            paren_span: open_paren.span.start..close_paren.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.name.name, self.arg.innermost())
    }
}

impl Latex for Call {
    fn fmt_latex(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let arg = self.arg.innermost();
        match self.builtin() {
            Some(LatexStyle::Operator(op)) => {
                write!(f, "\\{}{{(", op)?;
                arg.fmt_latex(f)?;
                write!(f, ")}}")
            },
            Some(LatexStyle::Root(degree)) => {
                match degree {
                    Some(degree) => write!(f, "\\sqrt[{}]{{", degree)?,
                    None => write!(f, "\\sqrt{{")?,
                }
                arg.fmt_latex(f)?;
                write!(f, "}}")
            },
            Some(LatexStyle::Exp) => {
                write!(f, "e^{{")?;
                arg.fmt_latex(f)?;
                write!(f, "}}")
            },
            Some(LatexStyle::Abs) => {
                write!(f, "\\left|")?;
                arg.fmt_latex(f)?;
                write!(f, "\\right|")
            },
            None => {
                write!(f, "{}(", self.name.name)?;
                arg.fmt_latex(f)?;
                write!(f, ")")
            },
        }
    }
}
