//! Printing stages

use crate::latex::ast::Root;
use crate::latex::formats::raw::print_raw;
use crate::latex::printer::{format_tree, FormatOptions};
use crate::latex::transforms::{Runnable, TransformError};

/// Assembled tree to formatted source.
#[derive(Default)]
pub struct Formatting {
    options: FormatOptions,
}

impl Formatting {
    pub fn new(options: FormatOptions) -> Self {
        Formatting { options }
    }
}

impl Runnable<Root, String> for Formatting {
    fn run(&self, input: Root) -> Result<String, TransformError> {
        if self.options.print_width == 0 {
            return Err(TransformError::StageFailed {
                stage: "Formatting".to_string(),
                message: "print width must be positive".to_string(),
            });
        }
        let formatted = format_tree(&input, &self.options);
        tracing::debug!(
            width = self.options.print_width,
            lines = formatted.lines().count(),
            "formatted"
        );
        Ok(formatted)
    }
}

/// Tree back to source text, losslessly up to whitespace normalization.
#[derive(Default)]
pub struct RawPrinting;

impl RawPrinting {
    pub fn new() -> Self {
        Self
    }
}

impl Runnable<Root, String> for RawPrinting {
    fn run(&self, input: Root) -> Result<String, TransformError> {
        let printed = print_raw(&input.content);
        tracing::debug!(bytes = printed.len(), "raw printed");
        Ok(printed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::parsing::parse;

    #[test]
    fn test_zero_width_is_rejected() {
        let stage = Formatting::new(FormatOptions::default().with_print_width(0));
        let err = stage.run(parse("a").unwrap()).unwrap_err();
        assert!(err.to_string().contains("print width"));
    }

    #[test]
    fn test_raw_printing() {
        let root = parse("a  b").unwrap();
        assert_eq!(RawPrinting::new().run(root).unwrap(), "a b");
    }
}
