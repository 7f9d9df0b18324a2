//! Environment body processors
//!
//! Runs the [`ContentProcessor`] the catalog declares for an environment.
//!
//! List bodies are restructured so each item owns its text:
//!
//! ```text
//! \begin{itemize}             itemize
//!   intro                     ├── "intro"
//!   \item[a] one              ├── parbreak
//!   \item two                 ├── \item [a] { one }
//! \end{itemize}               ├── parbreak
//!                             └── \item { two }
//! ```
//!
//! The item body is appended as an extra argument with empty marks, so raw printing
//! still reproduces the source text, and restructured items are marked `in_par_mode`.
//! An environment whose body was processed carries `body_processed`, so running the
//! pass again leaves it alone.

use crate::latex::ast::{trim, trim_end, Argument, Comment, Macro, Node, Root};
use crate::latex::catalog::{Catalog, ContentProcessor, LATEX2E};
use crate::latex::transforms::{Runnable, TransformError};
use crate::latex::walker::{walk_root, TriggerTime, WalkContext, WalkVisitor};
use std::sync::Arc;

/// Give each `item_name` macro the text up to the next item as its last argument.
pub fn clean_list_body(content: &mut Vec<Node>, item_name: &str) {
    let mut items: Vec<Macro> = Vec::new();
    let mut segments: Vec<Vec<Node>> = vec![Vec::new()];
    for node in std::mem::take(content) {
        match node {
            Node::Macro(m) if m.name == item_name => {
                items.push(m);
                segments.push(Vec::new());
            }
            other => {
                if let Some(segment) = segments.last_mut() {
                    segment.push(other);
                }
            }
        }
    }

    let mut segments = segments.into_iter();
    let mut body = segments.next().unwrap_or_default();
    if items.is_empty() {
        *content = body;
        return;
    }

    trim_end(&mut body);
    let has_preamble = !body.is_empty();
    for (index, (mut item, mut segment)) in items.into_iter().zip(segments).enumerate() {
        trim(&mut segment);
        let trailing_comments = pop_trailing_comments(&mut segment);
        if segment.first().is_some_and(|n| !n.is_comment()) {
            segment.insert(0, Node::Whitespace);
        }
        item.args
            .get_or_insert_with(Vec::new)
            .push(Argument::new("", "", segment));
        item.render_info.in_par_mode = true;

        if index > 0 || has_preamble {
            body.push(Node::Parbreak);
        }
        body.push(Node::Macro(item));
        body.extend(trailing_comments);
    }

    fix_comment_parbreaks(&mut body);
    *content = body;
}

/// Own-line comments at the end of an item belong after it, not inside it.
fn pop_trailing_comments(segment: &mut Vec<Node>) -> Vec<Node> {
    let count = segment
        .iter()
        .rev()
        .take_while(|n| matches!(n, Node::Comment(Comment { sameline: false, .. })))
        .count();
    let comments = segment.split_off(segment.len() - count);
    if count > 0 {
        trim_end(segment);
    }
    comments
}

/// A comment's `suffix_parbreak` must agree with what now follows it.
fn fix_comment_parbreaks(nodes: &mut [Node]) {
    for index in 0..nodes.len() {
        let next_is_parbreak = nodes.get(index + 1).is_some_and(Node::is_parbreak);
        if let Node::Comment(comment) = &mut nodes[index] {
            comment.suffix_parbreak = next_is_parbreak;
        }
    }
}

struct ContentProcessing<'a> {
    catalog: &'a Catalog,
    processed: usize,
}

impl WalkVisitor for ContentProcessing<'_> {
    fn visit_node(&mut self, node: &mut Node, _context: WalkContext) {
        let Node::Environment(env) = node else {
            return;
        };
        if env.render_info.body_processed {
            return;
        }
        let Some(info) = self.catalog.environment_info(&env.name()) else {
            return;
        };
        match &info.processor {
            ContentProcessor::None => return,
            ContentProcessor::TrimWhitespace => {
                trim(&mut env.content);
            }
            ContentProcessor::ListBody { item } => clean_list_body(&mut env.content, item),
        }
        env.render_info.body_processed = true;
        self.processed += 1;
    }
}

/// Run the body processor of every environment that declares one. Outer environments
/// are processed before the ones nested in them.
pub fn process_environment_content(root: &mut Root, catalog: &Catalog) {
    let mut processing = ContentProcessing {
        catalog,
        processed: 0,
    };
    walk_root(root, &mut processing, TriggerTime::Early, WalkContext::text());
    tracing::debug!(
        environments = processing.processed,
        "processed environment bodies"
    );
}

pub struct ProcessEnvironmentContent {
    catalog: Arc<Catalog>,
}

impl ProcessEnvironmentContent {
    pub fn new() -> Self {
        Self::with_catalog(Arc::clone(&LATEX2E))
    }

    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        ProcessEnvironmentContent { catalog }
    }
}

impl Default for ProcessEnvironmentContent {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Root, Root> for ProcessEnvironmentContent {
    fn run(&self, mut root: Root) -> Result<Root, TransformError> {
        process_environment_content(&mut root, &self.catalog);
        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::catalog::MacroInfo;
    use crate::latex::formats::raw::print_raw;
    use crate::latex::parsing::{parse, parse_with};

    fn list_content(source: &str) -> Vec<Node> {
        let root = parse(source).unwrap();
        root.content[0].as_environment().unwrap().content.clone()
    }

    fn item_body(node: &Node) -> String {
        let m = node.as_macro().unwrap();
        print_raw(&m.args.as_ref().unwrap().last().unwrap().content)
    }

    #[test]
    fn test_items_own_their_text() {
        let content = list_content("\\begin{itemize}\n\\item a b\n\\item c\n\\end{itemize}");
        assert_eq!(content.len(), 3);
        assert_eq!(item_body(&content[0]), " a b");
        assert!(content[1].is_parbreak());
        assert_eq!(item_body(&content[2]), " c");
        assert!(content[2].as_macro().unwrap().render_info.in_par_mode);
    }

    #[test]
    fn test_optional_label_stays_first_argument() {
        let content = list_content("\\begin{description}\\item[x] y\\end{description}");
        let item = content[0].as_macro().unwrap();
        let args = item.args.as_ref().unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(print_raw(&args[0].content), "x");
        assert_eq!(item_body(&content[0]), " y");
    }

    #[test]
    fn test_preamble_is_separated_by_parbreak() {
        let content = list_content("\\begin{itemize} intro \\item a\\end{itemize}");
        assert!(content[0].is_string("intro"));
        assert!(content[1].is_parbreak());
        assert!(content[2].is_macro("item"));
    }

    #[test]
    fn test_empty_item_and_trailing_comment() {
        let content =
            list_content("\\begin{enumerate}\n\\item a\n% note\n\\item\n\\end{enumerate}");
        assert_eq!(item_body(&content[0]), " a");
        let comment = content[1].as_comment().unwrap();
        assert_eq!(comment.content, " note");
        assert!(comment.suffix_parbreak);
        assert!(content[2].is_parbreak());
        assert_eq!(item_body(&content[3]), "");
    }

    #[test]
    fn test_list_without_items_is_untouched() {
        let content = list_content("\\begin{itemize}text\\end{itemize}");
        assert_eq!(content, vec![Node::string("text")]);
    }

    #[test]
    fn test_item_declared_in_paragraph_mode_is_still_restructured() {
        let mut catalog = Catalog::latex2e();
        catalog.define_macro("item", MacroInfo::new("o").in_par_mode());
        let root = parse_with("\\begin{itemize}\\item a\\item b\\end{itemize}", &catalog).unwrap();
        let env = root.content[0].as_environment().unwrap();
        assert!(env.render_info.body_processed);
        assert_eq!(env.content.len(), 3);
        assert_eq!(item_body(&env.content[0]), " a");
        assert_eq!(item_body(&env.content[2]), " b");
    }

    #[test]
    fn test_second_run_leaves_processed_lists_alone() {
        let mut root = parse("\\begin{itemize}\\item a\\item b\\end{itemize}").unwrap();
        let once = root.clone();
        process_environment_content(&mut root, &Catalog::latex2e());
        assert_eq!(root, once);
    }

    #[test]
    fn test_trim_whitespace_processor() {
        let root = parse("\\begin{center}\n\n x \n\\end{center}").unwrap();
        let env = root.content[0].as_environment().unwrap();
        assert_eq!(env.content, vec![Node::string("x")]);
    }
}
