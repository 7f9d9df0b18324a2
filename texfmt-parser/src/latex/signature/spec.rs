//! Parsed signature types

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgSpecKind {
    /// `m`
    Mandatory,
    /// `o`, `O{default}`
    Optional { default: Option<String> },
    /// `s`
    OptionalStar,
    /// `t<token>`
    OptionalToken { token: char },
    /// `r`, `R`, `d`, `D` with custom delimiters
    Delimited {
        required: bool,
        default: Option<String>,
    },
}

/// One argument descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    pub kind: ArgSpecKind,
    pub open_mark: String,
    pub close_mark: String,
    pub no_leading_whitespace: bool,
    pub long: bool,
}

impl ArgSpec {
    fn new(kind: ArgSpecKind, open_mark: &str, close_mark: &str) -> Self {
        ArgSpec {
            kind,
            open_mark: open_mark.to_string(),
            close_mark: close_mark.to_string(),
            no_leading_whitespace: false,
            long: false,
        }
    }

    pub fn mandatory() -> Self {
        ArgSpec::new(ArgSpecKind::Mandatory, "{", "}")
    }

    pub fn optional(default: Option<String>) -> Self {
        ArgSpec::new(ArgSpecKind::Optional { default }, "[", "]")
    }

    pub fn star() -> Self {
        ArgSpec::new(ArgSpecKind::OptionalStar, "", "")
    }

    pub fn token(token: char) -> Self {
        ArgSpec::new(ArgSpecKind::OptionalToken { token }, "", "")
    }

    pub fn delimited(required: bool, open: char, close: char, default: Option<String>) -> Self {
        ArgSpec::new(
            ArgSpecKind::Delimited { required, default },
            &open.to_string(),
            &close.to_string(),
        )
    }

    pub fn with_prefixes(mut self, no_leading_whitespace: bool, long: bool) -> Self {
        self.no_leading_whitespace = no_leading_whitespace;
        self.long = long;
        self
    }
}

impl fmt::Display for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.no_leading_whitespace {
            f.write_str("!")?;
        }
        if self.long {
            f.write_str("+")?;
        }
        match &self.kind {
            ArgSpecKind::Mandatory => f.write_str("m"),
            ArgSpecKind::Optional { default: None } => f.write_str("o"),
            ArgSpecKind::Optional {
                default: Some(default),
            } => write!(f, "O{{{}}}", default),
            ArgSpecKind::OptionalStar => f.write_str("s"),
            ArgSpecKind::OptionalToken { token } => write!(f, "t{}", token),
            ArgSpecKind::Delimited { required, default } => {
                let letter = match (required, default.is_some()) {
                    (true, false) => 'r',
                    (true, true) => 'R',
                    (false, false) => 'd',
                    (false, true) => 'D',
                };
                write!(f, "{}{}{}", letter, self.open_mark, self.close_mark)?;
                match default {
                    Some(default) => write!(f, "{{{}}}", default),
                    None => Ok(()),
                }
            }
        }
    }
}

/// A character the signature grammar does not know, skipped during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureDiagnostic {
    /// Character index in the signature string
    pub offset: usize,
    pub found: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub args: Vec<ArgSpec>,
    pub diagnostics: Vec<SignatureDiagnostic>,
}

impl Signature {
    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", arg)?;
        }
        Ok(())
    }
}
