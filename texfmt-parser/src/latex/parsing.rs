//! Parsing
//!
//! [`parse_minimal`] builds the raw tree: macros without arguments, environments with
//! their bodies, math, comments, verbatim islands. [`parse`] additionally runs the
//! assembling passes (argument attachment, render info, environment content hooks,
//! boundary trimming) against the built-in catalog.
//!
//! Whitespace rules of the raw tree:
//! - a blank run with at most one line break is a single `whitespace` node
//! - two or more line breaks make a `parbreak`
//! - a comment swallows the blanks before it and the line break after it; blanks that
//!   start the next line are dropped

pub mod error;
pub mod parser;

pub use error::ParseError;
pub use parser::{Mode, Parser};

use crate::latex::assembling::assemble;
use crate::latex::ast::{Node, Root};
use crate::latex::catalog::{Catalog, LATEX2E};
use std::collections::HashSet;

/// Environment sets the raw parser needs to know up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Bodies are parsed in math mode
    pub math_environments: HashSet<String>,
    /// Bodies are captured as opaque text
    pub verbatim_environments: HashSet<String>,
}

impl ParseOptions {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        ParseOptions {
            math_environments: catalog.math_environments(),
            verbatim_environments: catalog.verbatim_environments(),
        }
    }

    pub fn is_math(&self, name: &str) -> bool {
        self.math_environments.contains(name)
    }

    pub fn is_verbatim(&self, name: &str) -> bool {
        self.verbatim_environments.contains(name)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions::from_catalog(&LATEX2E)
    }
}

/// Parse without attaching arguments or running any other pass.
pub fn parse_minimal(source: &str, options: &ParseOptions) -> Result<Root, ParseError> {
    let content = Parser::new(source, options).parse(Mode::Text)?;
    Ok(Root::new(content))
}

/// Parse and assemble with the built-in catalog.
pub fn parse(source: &str) -> Result<Root, ParseError> {
    parse_with(source, &LATEX2E)
}

/// Parse and assemble with a custom catalog.
pub fn parse_with(source: &str, catalog: &Catalog) -> Result<Root, ParseError> {
    let root = parse_minimal(source, &ParseOptions::from_catalog(catalog))?;
    Ok(assemble(root, catalog))
}

/// Parse in an implicit math-mode context. The result is not wrapped in a root.
pub fn parse_math(source: &str) -> Result<Vec<Node>, ParseError> {
    parse_math_with(source, &LATEX2E)
}

pub fn parse_math_with(source: &str, catalog: &Catalog) -> Result<Vec<Node>, ParseError> {
    let content = Parser::new(source, &ParseOptions::from_catalog(catalog)).parse(Mode::Math)?;
    // Assemble inside a display-math wrapper so every pass sees math mode
    let root = assemble(Root::new(vec![Node::display_math(content)]), catalog);
    Ok(root
        .content
        .into_iter()
        .next()
        .and_then(|node| match node {
            Node::Math(math) => Some(math.content),
            _ => None,
        })
        .unwrap_or_default())
}
