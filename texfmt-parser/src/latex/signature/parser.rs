//! Signature string parser
//!
//! Built from chumsky combinators over characters. Every character ends up in exactly
//! one item: a descriptor, a separator, or an unknown character, so the parser is total.

use super::spec::{ArgSpec, Signature, SignatureDiagnostic};
use chumsky::prelude::*;
use std::ops::Range;

type ParserError = Simple<char>;

#[derive(Debug, Clone)]
enum Item {
    Spec(ArgSpec),
    Separator,
    Unknown(usize, char),
}

/// A single non-blank delimiter character.
fn mark() -> impl Parser<char, char, Error = ParserError> + Clone {
    filter::<char, _, ParserError>(|c: &char| !c.is_whitespace())
}

/// `{...}` with balanced inner braces; yields the inner text.
fn braced_text() -> impl Parser<char, String, Error = ParserError> {
    let balanced = recursive(|nested| {
        choice((
            none_of::<char, _, ParserError>("{}").map(String::from),
            nested
                .delimited_by(just('{'), just('}'))
                .map(|inner: String| format!("{{{}}}", inner)),
        ))
        .repeated()
        .map(|parts: Vec<String>| parts.concat())
    });
    balanced.delimited_by(just('{'), just('}'))
}

fn arg_spec() -> impl Parser<char, ArgSpec, Error = ParserError> {
    let kind = choice((
        just('m').to(ArgSpec::mandatory()),
        just('o').to(ArgSpec::optional(None)),
        just('O')
            .ignore_then(braced_text())
            .map(|default| ArgSpec::optional(Some(default))),
        just('s').to(ArgSpec::star()),
        just('t').ignore_then(mark()).map(ArgSpec::token),
        just('r')
            .ignore_then(mark().then(mark()))
            .map(|(open, close)| ArgSpec::delimited(true, open, close, None)),
        just('R')
            .ignore_then(mark().then(mark()))
            .then(braced_text())
            .map(|((open, close), default)| ArgSpec::delimited(true, open, close, Some(default))),
        just('d')
            .ignore_then(mark().then(mark()))
            .map(|(open, close)| ArgSpec::delimited(false, open, close, None)),
        just('D')
            .ignore_then(mark().then(mark()))
            .then(braced_text())
            .map(|((open, close), default)| {
                ArgSpec::delimited(false, open, close, Some(default))
            }),
    ));

    just('!')
        .or_not()
        .then(just('+').or_not())
        .then(kind)
        .map(|((bang, plus), spec)| spec.with_prefixes(bang.is_some(), plus.is_some()))
}

fn signature_parser() -> impl Parser<char, Vec<Item>, Error = ParserError> {
    let item = choice((
        arg_spec().map(Item::Spec),
        filter::<char, _, ParserError>(|c: &char| c.is_whitespace()).to(Item::Separator),
        any::<char, ParserError>().map_with_span(|c, span: Range<usize>| Item::Unknown(span.start, c)),
    ));
    item.repeated().then_ignore(end())
}

/// Parse a signature string without consulting the cache.
pub fn parse_signature_uncached(input: &str) -> Signature {
    let items = match signature_parser().parse(input) {
        Ok(items) => items,
        Err(errors) => {
            tracing::warn!(signature = input, ?errors, "signature could not be parsed");
            return Signature::default();
        }
    };

    let mut signature = Signature::default();
    for item in items {
        match item {
            Item::Spec(spec) => signature.args.push(spec),
            Item::Separator => {}
            Item::Unknown(offset, found) => signature
                .diagnostics
                .push(SignatureDiagnostic { offset, found }),
        }
    }
    signature
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::signature::spec::ArgSpecKind;

    #[test]
    fn test_basic_descriptors() {
        let sig = parse_signature_uncached("s o m");
        assert_eq!(
            sig.args,
            vec![ArgSpec::star(), ArgSpec::optional(None), ArgSpec::mandatory()]
        );
        assert!(sig.diagnostics.is_empty());
    }

    #[test]
    fn test_prefixes() {
        let sig = parse_signature_uncached("!o +m !+d()");
        assert!(sig.args[0].no_leading_whitespace);
        assert!(!sig.args[0].long);
        assert!(sig.args[1].long);
        assert!(sig.args[2].no_leading_whitespace && sig.args[2].long);
        assert_eq!(sig.args[2].open_mark, "(");
        assert_eq!(sig.args[2].close_mark, ")");
    }

    #[test]
    fn test_defaults_keep_nested_braces() {
        let sig = parse_signature_uncached(r"O{\textbf{x}} D<>{y}");
        assert_eq!(
            sig.args[0].kind,
            ArgSpecKind::Optional {
                default: Some(r"\textbf{x}".to_string())
            }
        );
        assert_eq!(
            sig.args[1].kind,
            ArgSpecKind::Delimited {
                required: false,
                default: Some("y".to_string())
            }
        );
    }

    #[test]
    fn test_unknown_characters_are_reported_not_fatal() {
        let sig = parse_signature_uncached("m q o");
        assert_eq!(sig.args, vec![ArgSpec::mandatory(), ArgSpec::optional(None)]);
        assert_eq!(
            sig.diagnostics,
            vec![SignatureDiagnostic {
                offset: 2,
                found: 'q'
            }]
        );
    }

    #[test]
    fn test_incomplete_descriptor_degrades() {
        let sig = parse_signature_uncached("m r");
        assert_eq!(sig.args, vec![ArgSpec::mandatory()]);
        assert_eq!(sig.diagnostics.len(), 1);
    }

    #[test]
    fn test_empty_signature() {
        let sig = parse_signature_uncached("");
        assert!(sig.is_empty());
        assert!(sig.diagnostics.is_empty());
    }
}
