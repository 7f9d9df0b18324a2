//! Render info annotation
//!
//! Copies the catalog's render metadata onto every known macro and environment. The
//! metadata already on a node is kept and the catalog's entry is merged over it.

use crate::latex::ast::{Node, Root};
use crate::latex::catalog::{Catalog, LATEX2E};
use crate::latex::transforms::{Runnable, TransformError};
use crate::latex::walker::{walk_root, TriggerTime, WalkContext, WalkVisitor};
use std::sync::Arc;

struct Annotator<'a> {
    catalog: &'a Catalog,
    annotated: usize,
}

impl WalkVisitor for Annotator<'_> {
    fn visit_node(&mut self, node: &mut Node, _context: WalkContext) {
        match node {
            Node::Macro(m) => {
                if let Some(info) = self.catalog.macro_info(&m.name) {
                    m.render_info.merge(&info.render_info);
                    self.annotated += 1;
                }
            }
            Node::Environment(env) => {
                if let Some(info) = self.catalog.environment_info(&env.name()) {
                    env.render_info.merge(&info.render_info);
                    self.annotated += 1;
                }
            }
            _ => {}
        }
    }
}

pub fn annotate_render_info(root: &mut Root, catalog: &Catalog) {
    let mut annotator = Annotator {
        catalog,
        annotated: 0,
    };
    walk_root(root, &mut annotator, TriggerTime::Early, WalkContext::text());
    tracing::debug!(nodes = annotator.annotated, "annotated render info");
}

pub struct AnnotateRenderInfo {
    catalog: Arc<Catalog>,
}

impl AnnotateRenderInfo {
    pub fn new() -> Self {
        Self::with_catalog(Arc::clone(&LATEX2E))
    }

    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        AnnotateRenderInfo { catalog }
    }
}

impl Default for AnnotateRenderInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Root, Root> for AnnotateRenderInfo {
    fn run(&self, mut root: Root) -> Result<Root, TransformError> {
        annotate_render_info(&mut root, &self.catalog);
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::ast::Environment;
    use crate::latex::catalog::MacroInfo;

    #[test]
    fn test_macros_and_environments_are_annotated() {
        let mut root = Root::new(vec![
            Node::macro_named("section"),
            Node::Environment(Environment::new("align", vec![Node::macro_named("text")])),
            Node::macro_named("unknown"),
        ]);
        annotate_render_info(&mut root, &Catalog::latex2e());

        let section = root.content[0].as_macro().unwrap();
        assert!(section.render_info.break_before && section.render_info.break_after);
        let align = root.content[1].as_environment().unwrap();
        assert!(align.render_info.aligned_content);
        assert_eq!(align.render_info.in_math_mode, Some(true));
        let text = align.content[0].as_macro().unwrap();
        assert_eq!(text.render_info.in_math_mode, Some(false));
        assert!(root.content[2].as_macro().unwrap().render_info.is_empty());
    }

    #[test]
    fn test_custom_catalog_through_stage() {
        let mut catalog = Catalog::new();
        catalog.define_macro("note", MacroInfo::default().break_after());
        let stage = AnnotateRenderInfo::with_catalog(Arc::new(catalog));
        let root = stage.run(Root::new(vec![Node::macro_named("note")])).unwrap();
        assert!(root.content[0].as_macro().unwrap().render_info.break_after);
    }
}
