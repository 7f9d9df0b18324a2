//! Pretty printing
//!
//!     Root ──construct──▶ Doc ──resolve(width, indentation)──▶ String
//!
//! Construction ([`construct`]) decides where lines may or must break and is width
//! agnostic. Resolution ([`resolve`]) measures the document against the print width and
//! commits to the breaks.

pub mod construct;
pub mod doc;
pub mod options;
pub mod reference_map;
pub mod resolve;

pub use construct::DocBuilder;
pub use doc::{Doc, FillBuilder, LineKind};
pub use options::FormatOptions;
pub use resolve::{print_doc, Indentation};

use crate::latex::ast::Root;
use crate::latex::catalog::Catalog;
use crate::latex::parsing::{parse_with, ParseError};

/// Build the layout document for an assembled tree.
pub fn build_doc(root: &Root, options: &FormatOptions) -> Doc {
    let mut builder = DocBuilder::new(root, options.align_padding);
    let doc = builder.build(root);
    tracing::debug!(nodes = builder.node_count(), "built layout document");
    doc
}

/// Format an already assembled tree.
pub fn format_tree(root: &Root, options: &FormatOptions) -> String {
    print_doc(
        build_doc(root, options),
        options.print_width,
        options.indentation(),
    )
}

/// Parse `source` with the built-in catalog and format it.
pub fn format_source(source: &str, options: &FormatOptions) -> Result<String, ParseError> {
    format_source_with(source, options, &crate::latex::catalog::LATEX2E)
}

pub fn format_source_with(
    source: &str,
    options: &FormatOptions,
    catalog: &Catalog,
) -> Result<String, ParseError> {
    let root = parse_with(source, catalog)?;
    Ok(format_tree(&root, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(source: &str) -> String {
        format_source(source, &FormatOptions::default()).unwrap()
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(format("Hello world."), "Hello world.");
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(format("a   b\n c"), "a b c");
    }

    #[test]
    fn test_paragraphs_kept() {
        assert_eq!(format("a\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_environment_is_indented() {
        assert_eq!(
            format(r"x \begin{center}y\end{center} z"),
            "x\n\\begin{center}\n  y\n\\end{center}\nz"
        );
    }

    #[test]
    fn test_empty_environment() {
        assert_eq!(
            format(r"\begin{center}\end{center}"),
            "\\begin{center}\n\\end{center}"
        );
    }

    #[test]
    fn test_display_math() {
        assert_eq!(format(r"\[ x+y \]"), "\\[\n  x+y\n\\]");
    }

    #[test]
    fn test_inline_math_unchanged() {
        assert_eq!(format("$x^{21}$"), "$x^{21}$");
        assert_eq!(format("$a_1 + b$"), "$a_1 + b$");
    }

    #[test]
    fn test_trailing_comment() {
        assert_eq!(format("a %comment\n"), "a %comment\n");
    }

    #[test]
    fn test_group_holding_comment_ends_its_line() {
        assert_eq!(format("{a %c\n} b"), "{a %c\n}\nb");
        assert_eq!(format("{a b} c"), "{a b} c");
    }

    #[test]
    fn test_own_line_comment() {
        assert_eq!(format("a\n% note\nb"), "a\n% note\nb");
    }

    #[test]
    fn test_section_breaks() {
        assert_eq!(
            format(r"text \section{Intro} more"),
            "text\n\\section{Intro}\nmore"
        );
    }

    #[test]
    fn test_closing_brace_counts_toward_width() {
        let options = FormatOptions::default().with_print_width(10);
        assert_eq!(
            format_source("aaaa {bbbb cccc}", &options).unwrap(),
            "aaaa\n{bbbb\ncccc}"
        );
    }

    #[test]
    fn test_width_wraps_words() {
        let options = FormatOptions::default().with_print_width(10);
        assert_eq!(
            format_source("aaa bbb ccc ddd", &options).unwrap(),
            "aaa bbb\nccc ddd"
        );
    }
}
