//! Assembling module
//!
//!     The raw parser leaves every macro without arguments: `\frac{a}{b}` comes out as a
//!     macro followed by two sibling groups. The assembling passes turn that flat tree
//!     into the one the printer expects, using the [`Catalog`] for everything that
//!     depends on names.
//!
//! Stages, in the order [`assemble`] runs them:
//!
//!     - `attach_arguments`: moves sibling nodes into the arguments of known macros and
//!       environments, following their signatures.
//!     - `render_info`: copies render metadata from the catalog onto nodes.
//!     - `environment_content`: runs per-environment body processors (list bodies,
//!       whitespace trimming).
//!     - `trim_boundaries`: drops whitespace at the edges of the root, environment
//!       bodies and math.
//!
//!     Every stage is idempotent, so assembling an already assembled tree is a no-op.

pub mod stages;

pub use stages::{AnnotateRenderInfo, AttachArguments, ProcessEnvironmentContent, TrimBoundaries};

use crate::latex::ast::Root;
use crate::latex::catalog::Catalog;

/// Run all assembling passes over a raw tree.
pub fn assemble(mut root: Root, catalog: &Catalog) -> Root {
    stages::attach_arguments::attach_arguments(
        &mut root,
        &catalog.macro_signatures(),
        &catalog.environment_signatures(),
    );
    stages::render_info::annotate_render_info(&mut root, catalog);
    stages::environment_content::process_environment_content(&mut root, catalog);
    stages::trim_boundaries::trim_boundaries(&mut root);
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::parsing::{parse, parse_minimal, ParseOptions};

    #[test]
    fn test_assemble_is_idempotent() {
        let source = "\\begin{itemize}\n\\item[a] one \\textbf{two}\n\\item three\n\\end{itemize}\n";
        let once = parse(source).unwrap();
        let twice = assemble(once.clone(), &Catalog::latex2e());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_assemble_matches_parse() {
        let source = r"\section{A} $x^{2}$ \emph{b}";
        let raw = parse_minimal(source, &ParseOptions::default()).unwrap();
        assert_eq!(assemble(raw, &Catalog::latex2e()), parse(source).unwrap());
    }
}
