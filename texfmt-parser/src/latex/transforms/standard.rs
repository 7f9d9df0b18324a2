//! Standard transform definitions
//!
//! Pre-built pipelines over the built-in catalog, as `once_cell::sync::Lazy` statics.
//! Pipelines that depend on options or a custom catalog are built by the functions at
//! the bottom.

use crate::latex::ast::{Node, Root};
use crate::latex::catalog::Catalog;
use crate::latex::lexing::Token;
use crate::latex::parsing::ParseOptions;
use crate::latex::printer::FormatOptions;
use crate::latex::transforms::stages::{
    AnnotateRenderInfo, AttachArguments, Formatting, MathParsing, ProcessEnvironmentContent,
    RawParsing, RawPrinting, Tokenization, TrimBoundaries,
};
use crate::latex::transforms::Transform;
use once_cell::sync::Lazy;
use std::ops::Range;
use std::sync::Arc;

/// Type alias for token stream (to satisfy clippy::type_complexity)
pub type TokenStream = Vec<(Token, Range<usize>)>;

pub type TreeTransform = Transform<String, Root>;

pub type TextTransform = Transform<String, String>;

/// String → tokens
pub static TOKENIZATION: Lazy<Transform<String, TokenStream>> =
    Lazy::new(|| Transform::from_fn(Ok).then(Tokenization::new()));

/// String → raw tree, no passes run
pub static RAW_PARSING: Lazy<TreeTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(RawParsing::new()));

/// String → assembled tree
///
/// 1. Raw parsing
/// 2. Argument attachment
/// 3. Render info annotation
/// 4. Environment content processing
/// 5. Boundary trimming
pub static PARSING: Lazy<TreeTransform> = Lazy::new(|| {
    Transform::from_fn(Ok)
        .then(RawParsing::new())
        .then(AttachArguments::new())
        .then(AnnotateRenderInfo::new())
        .then(ProcessEnvironmentContent::new())
        .then(TrimBoundaries::new())
});

/// String → assembled math nodes
pub static MATH_PARSING: Lazy<Transform<String, Vec<Node>>> =
    Lazy::new(|| Transform::from_fn(Ok).then(MathParsing::new()));

/// String → assembled tree → raw source
pub static RAW_ROUND_TRIP: Lazy<TextTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then_transform(&PARSING).then(RawPrinting::new()));

/// String → assembled tree for a custom catalog.
pub fn parsing_with(catalog: Arc<Catalog>) -> TreeTransform {
    Transform::from_fn(Ok)
        .then(RawParsing::with_options(ParseOptions::from_catalog(&catalog)))
        .then(AttachArguments::with_catalog(Arc::clone(&catalog)))
        .then(AnnotateRenderInfo::with_catalog(Arc::clone(&catalog)))
        .then(ProcessEnvironmentContent::with_catalog(catalog))
        .then(TrimBoundaries::new())
}

/// String → formatted source with the built-in catalog.
pub fn formatting(options: FormatOptions) -> TextTransform {
    Transform::from_fn(Ok)
        .then_transform(&PARSING)
        .then(Formatting::new(options))
}

/// String → formatted source with a custom catalog.
pub fn formatting_with(catalog: Arc<Catalog>, options: FormatOptions) -> TextTransform {
    parsing_with(catalog).then(Formatting::new(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::parsing::{parse, parse_math};

    #[test]
    fn test_tokenization() {
        let tokens = TOKENIZATION.run("a b".to_string()).unwrap();
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_parsing_matches_parse() {
        let source = r"\begin{itemize}\item a \textbf{b}\end{itemize}";
        assert_eq!(
            PARSING.run(source.to_string()).unwrap(),
            parse(source).unwrap()
        );
    }

    #[test]
    fn test_raw_parsing_differs_from_parsing() {
        let source = r"\section{A}".to_string();
        assert_ne!(
            RAW_PARSING.run(source.clone()).unwrap(),
            PARSING.run(source).unwrap()
        );
    }

    #[test]
    fn test_math_parsing_matches_parse_math() {
        let source = r"\sqrt[3]{x}^2";
        assert_eq!(
            MATH_PARSING.run(source.to_string()).unwrap(),
            parse_math(source).unwrap()
        );
    }

    #[test]
    fn test_raw_round_trip() {
        assert_eq!(
            RAW_ROUND_TRIP.run(r"\frac 1 2".to_string()).unwrap(),
            r"\frac{1}{2}"
        );
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = Arc::new(Catalog::latex2e().with_macro("mycmd", "m m"));
        let root = parsing_with(catalog).run(r"\mycmd a b".to_string()).unwrap();
        assert_eq!(root.content.len(), 1);
    }

    #[test]
    fn test_formatting() {
        let pipeline = formatting(FormatOptions::default());
        assert_eq!(pipeline.run("a   b".to_string()).unwrap(), "a b");
        assert!(pipeline.run("{".to_string()).is_err());
    }

    #[test]
    fn test_transforms_are_reusable() {
        let first = PARSING.run("a".to_string()).unwrap();
        let second = PARSING.run("b".to_string()).unwrap();
        assert_ne!(first, second);
    }
}
