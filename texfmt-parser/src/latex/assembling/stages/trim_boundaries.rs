//! Boundary trimming
//!
//! Whitespace and paragraph breaks at the start and end of the document, of every
//! environment body and of every math node carry no meaning. They are dropped so the
//! printer decides the layout at those edges.

use crate::latex::ast::{trim, Node, Root};
use crate::latex::transforms::{Runnable, TransformError};
use crate::latex::walker::{walk_root, TriggerTime, WalkContext, WalkVisitor};

struct Trimmer {
    removed: usize,
}

impl WalkVisitor for Trimmer {
    fn visit_node(&mut self, node: &mut Node, _context: WalkContext) {
        self.removed += match node {
            Node::Environment(env) => trim(&mut env.content),
            Node::Math(math) => trim(&mut math.content),
            _ => 0,
        };
    }
}

pub fn trim_boundaries(root: &mut Root) {
    let mut trimmer = Trimmer {
        removed: trim(&mut root.content),
    };
    walk_root(root, &mut trimmer, TriggerTime::Late, WalkContext::text());
    tracing::debug!(removed = trimmer.removed, "trimmed boundaries");
}

#[derive(Default)]
pub struct TrimBoundaries;

impl TrimBoundaries {
    pub fn new() -> Self {
        Self
    }
}

impl Runnable<Root, Root> for TrimBoundaries {
    fn run(&self, mut root: Root) -> Result<Root, TransformError> {
        trim_boundaries(&mut root);
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::parsing::{parse_minimal, ParseOptions};

    #[test]
    fn test_trims_root_environments_and_math() {
        let mut root = parse_minimal(
            "\n\n \\begin{quote} a \\[ x \\] \\end{quote} \n",
            &ParseOptions::default(),
        )
        .unwrap();
        trim_boundaries(&mut root);
        assert_eq!(root.content.len(), 1);
        let quote = root.content[0].as_environment().unwrap();
        assert!(quote.content[0].is_string("a"));
        assert_eq!(quote.content.len(), 3);
        let Node::Math(math) = &quote.content[2] else {
            panic!("expected math, got {:?}", quote.content[2]);
        };
        assert_eq!(math.content, vec![Node::string("x")]);
    }

    #[test]
    fn test_inner_whitespace_is_kept() {
        let mut root = parse_minimal("a  b", &ParseOptions::default()).unwrap();
        trim_boundaries(&mut root);
        assert_eq!(root.content.len(), 3);
    }
}
