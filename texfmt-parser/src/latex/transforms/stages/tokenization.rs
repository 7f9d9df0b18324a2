//! Tokenization stage

use crate::latex::lexing::{tokenize, Token};
use crate::latex::transforms::{Runnable, TransformError};
use std::ops::Range;

/// Source text to the flat logos token stream.
pub struct Tokenization;

impl Tokenization {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Tokenization {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, Vec<(Token, Range<usize>)>> for Tokenization {
    fn run(&self, input: String) -> Result<Vec<(Token, Range<usize>)>, TransformError> {
        let tokens = tokenize(&input);
        tracing::debug!(tokens = tokens.len(), "tokenized");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_cover_source() {
        let source = r"\emph{x} y".to_string();
        let tokens = Tokenization::new().run(source.clone()).unwrap();
        assert_eq!(tokens.first().map(|(t, _)| *t), Some(Token::ControlWord));
        assert_eq!(tokens.last().map(|(_, span)| span.end), Some(source.len()));
    }
}
