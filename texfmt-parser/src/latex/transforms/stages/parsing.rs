//! Raw parsing stages

use crate::latex::ast::{Node, Root};
use crate::latex::catalog::{Catalog, LATEX2E};
use crate::latex::parsing::{parse_math_with, parse_minimal, ParseOptions};
use crate::latex::transforms::{Runnable, TransformError};
use std::sync::Arc;

/// Source text to the raw tree: no arguments attached, no passes run.
pub struct RawParsing {
    options: ParseOptions,
}

impl RawParsing {
    pub fn new() -> Self {
        RawParsing {
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(options: ParseOptions) -> Self {
        RawParsing { options }
    }
}

impl Default for RawParsing {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, Root> for RawParsing {
    fn run(&self, input: String) -> Result<Root, TransformError> {
        let root = parse_minimal(&input, &self.options)?;
        tracing::debug!(bytes = input.len(), nodes = root.content.len(), "parsed raw tree");
        Ok(root)
    }
}

/// Source text parsed as math and fully assembled.
pub struct MathParsing {
    catalog: Arc<Catalog>,
}

impl MathParsing {
    pub fn new() -> Self {
        MathParsing {
            catalog: Arc::clone(&LATEX2E),
        }
    }

    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        MathParsing { catalog }
    }
}

impl Default for MathParsing {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<String, Vec<Node>> for MathParsing {
    fn run(&self, input: String) -> Result<Vec<Node>, TransformError> {
        let nodes = parse_math_with(&input, &self.catalog)?;
        tracing::debug!(nodes = nodes.len(), "parsed math");
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::parsing::ParseError;

    #[test]
    fn test_raw_parsing_leaves_arguments_alone() {
        let root = RawParsing::new().run(r"\textbf{x}".to_string()).unwrap();
        assert_eq!(root.content.len(), 2);
        assert!(root.content[0].as_macro().unwrap().args.is_none());
    }

    #[test]
    fn test_parse_errors_convert() {
        let err = RawParsing::new().run("{".to_string()).unwrap_err();
        assert_eq!(
            err,
            TransformError::Parse(ParseError::UnclosedGroup { offset: 0 })
        );
    }

    #[test]
    fn test_math_parsing_attaches() {
        let nodes = MathParsing::new().run(r"\frac12".to_string()).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].as_macro().unwrap().args.as_ref().map(Vec::len), Some(2));
    }
}
