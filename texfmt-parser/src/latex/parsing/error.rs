//! Parse errors

use std::fmt;

/// Structural errors in the source. Offsets are byte positions of the construct that
/// could not be completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnclosedGroup {
        offset: usize,
    },
    UnexpectedCloseBrace {
        offset: usize,
    },
    UnterminatedMath {
        opening: &'static str,
        offset: usize,
    },
    UnclosedEnvironment {
        name: String,
        offset: usize,
    },
    MismatchedEnvironment {
        expected: String,
        found: String,
        offset: usize,
    },
    UnexpectedEnd {
        name: String,
        offset: usize,
    },
    UnterminatedVerbatim {
        name: String,
        offset: usize,
    },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnclosedGroup { offset }
            | ParseError::UnexpectedCloseBrace { offset }
            | ParseError::UnterminatedMath { offset, .. }
            | ParseError::UnclosedEnvironment { offset, .. }
            | ParseError::MismatchedEnvironment { offset, .. }
            | ParseError::UnexpectedEnd { offset, .. }
            | ParseError::UnterminatedVerbatim { offset, .. } => *offset,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnclosedGroup { offset } => {
                write!(f, "Group opened at byte {} is never closed", offset)
            }
            ParseError::UnexpectedCloseBrace { offset } => {
                write!(f, "Unexpected '}}' at byte {}", offset)
            }
            ParseError::UnterminatedMath { opening, offset } => {
                write!(f, "Math opened with '{}' at byte {} is never closed", opening, offset)
            }
            ParseError::UnclosedEnvironment { name, offset } => {
                write!(f, "Environment '{}' begun at byte {} is never ended", name, offset)
            }
            ParseError::MismatchedEnvironment {
                expected,
                found,
                offset,
            } => write!(
                f,
                "Expected \\end{{{}}} but found \\end{{{}}} at byte {}",
                expected, found, offset
            ),
            ParseError::UnexpectedEnd { name, offset } => {
                write!(f, "\\end{{{}}} at byte {} has no matching \\begin", name, offset)
            }
            ParseError::UnterminatedVerbatim { name, offset } => {
                write!(f, "Verbatim '{}' at byte {} is never terminated", name, offset)
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_names() {
        let err = ParseError::MismatchedEnvironment {
            expected: "itemize".into(),
            found: "enumerate".into(),
            offset: 12,
        };
        assert_eq!(
            err.to_string(),
            r"Expected \end{itemize} but found \end{enumerate} at byte 12"
        );
        assert_eq!(err.offset(), 12);
    }
}
