//! Tokenizer
//!
//! A flat logos tokenizer plus a [`Lexer`] cursor that supports one-token lookahead,
//! pushing tokens back, and re-seating at an arbitrary byte offset. The parser uses the
//! latter to skip over verbatim islands, which must be read from the raw source.

use logos::Logos;
use serde::Serialize;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Token {
    /// `\` followed by letters
    #[regex(r"\\[a-zA-Z]+")]
    ControlWord,

    /// `\` followed by a single non-letter
    #[regex(r"\\[^a-zA-Z]")]
    ControlSymbol,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[token("$$")]
    DoubleDollar,

    #[token("$")]
    Dollar,

    #[token("^")]
    Caret,

    #[token("_")]
    Underscore,

    /// `%` up to, not including, the line break
    #[regex(r"%[^\r\n]*")]
    Comment,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"[a-zA-Z0-9\x{80}-\x{10FFFF}]+")]
    Word,

    /// Any other single character
    #[regex(r"[^a-zA-Z0-9 \t\r\n\\{}$%^_\x{80}-\x{10FFFF}]")]
    Punct,
}

impl Token {
    /// Whether a whitespace lexeme spans a paragraph break.
    pub fn is_paragraph_break(text: &str) -> bool {
        text.matches('\n').count() >= 2
    }
}

/// A token together with its text and byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<'s> {
    pub token: Token,
    pub text: &'s str,
    pub span: Range<usize>,
}

/// Cursor over the token stream of a source string.
pub struct Lexer<'s> {
    source: &'s str,
    inner: logos::Lexer<'s, Token>,
    base: usize,
    pending: Vec<Lexeme<'s>>,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str) -> Self {
        Lexer {
            source,
            inner: Token::lexer(source),
            base: 0,
            pending: Vec::new(),
        }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Restart tokenization at `offset`, discarding any lookahead.
    pub fn seek(&mut self, offset: usize) {
        let offset = offset.min(self.source.len());
        self.pending.clear();
        self.inner = Token::lexer(&self.source[offset..]);
        self.base = offset;
    }

    pub fn push_back(&mut self, lexeme: Lexeme<'s>) {
        self.pending.push(lexeme);
    }

    pub fn peek(&mut self) -> Option<&Lexeme<'s>> {
        if self.pending.is_empty() {
            let lexeme = self.next()?;
            self.pending.push(lexeme);
        }
        self.pending.last()
    }

    /// Byte offset of the next unread lexeme.
    pub fn offset(&self) -> usize {
        match self.pending.last() {
            Some(lexeme) => lexeme.span.start,
            None => self.base + self.inner.span().end,
        }
    }
}

impl<'s> Iterator for Lexer<'s> {
    type Item = Lexeme<'s>;

    fn next(&mut self) -> Option<Lexeme<'s>> {
        if let Some(lexeme) = self.pending.pop() {
            return Some(lexeme);
        }
        let result = self.inner.next()?;
        let local = self.inner.span();
        let span = (local.start + self.base)..(local.end + self.base);
        // Only a lone trailing backslash fails to match; treat it as punctuation.
        let token = result.unwrap_or(Token::Punct);
        Some(Lexeme {
            token,
            text: &self.source[span.clone()],
            span,
        })
    }
}

/// Tokenize a whole string into `(Token, span)` pairs.
pub fn tokenize(source: &str) -> Vec<(Token, Range<usize>)> {
    Lexer::new(source)
        .map(|lexeme| (lexeme.token, lexeme.span))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<(Token, &str)> {
        Lexer::new(source).map(|l| (l.token, l.text)).collect()
    }

    #[test]
    fn test_control_sequences() {
        assert_eq!(
            tokens(r"\emph{x}\\\%"),
            vec![
                (Token::ControlWord, r"\emph"),
                (Token::OpenBrace, "{"),
                (Token::Word, "x"),
                (Token::CloseBrace, "}"),
                (Token::ControlSymbol, r"\\"),
                (Token::ControlSymbol, r"\%"),
            ]
        );
    }

    #[test]
    fn test_dollars_prefer_longest() {
        assert_eq!(
            tokens("$$$"),
            vec![(Token::DoubleDollar, "$$"), (Token::Dollar, "$")]
        );
    }

    #[test]
    fn test_comment_stops_before_newline() {
        assert_eq!(
            tokens("a %c\nb"),
            vec![
                (Token::Word, "a"),
                (Token::Whitespace, " "),
                (Token::Comment, "%c"),
                (Token::Whitespace, "\n"),
                (Token::Word, "b"),
            ]
        );
    }

    #[test]
    fn test_punctuation_is_single_char() {
        assert_eq!(
            tokens("a,&[b]"),
            vec![
                (Token::Word, "a"),
                (Token::Punct, ","),
                (Token::Punct, "&"),
                (Token::Punct, "["),
                (Token::Word, "b"),
                (Token::Punct, "]"),
            ]
        );
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(tokens("café"), vec![(Token::Word, "café")]);
    }

    #[test]
    fn test_trailing_backslash() {
        assert_eq!(tokens("a\\"), vec![(Token::Word, "a"), (Token::Punct, "\\")]);
    }

    #[test]
    fn test_seek_and_push_back() {
        let mut lexer = Lexer::new("ab cd ef");
        let first = lexer.next().unwrap();
        assert_eq!(first.text, "ab");
        lexer.push_back(first);
        assert_eq!(lexer.peek().map(|l| l.text), Some("ab"));
        lexer.seek(6);
        assert_eq!(lexer.next().map(|l| (l.text, l.span)), Some(("ef", 6..8)));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_paragraph_break_detection() {
        assert!(Token::is_paragraph_break("\n \n"));
        assert!(!Token::is_paragraph_break(" \n  "));
    }
}
