//! Document construction
//!
//! Sibling lists become fills: printable nodes are contents, whitespace becomes a
//! breakable separator. On top of that:
//!
//! - block nodes (environments, display math, verbatim environments, macros declaring
//!   `break_before`) start on a new line unless they open the list or follow a
//!   paragraph break or comment; whitespace next to them collapses into that break
//! - nodes declaring `break_after` end their line
//! - comments are line suffixes, so nothing printed after them can land on their line
//! - braced groups, arguments and inline math are groups; one holding a comment is
//!   broken, and so is the separator that follows it
//! - macros in paragraph mode have their argument parts spliced into the enclosing
//!   fill, and hanging-indent macros wrap as `indent(fill(..))`
//! - a verbatim environment keeps its content, but its `\end` line follows the indentation
//! - aligned environments print their rows through the alignment engine, unless a
//!   cell cannot be printed on one line

use super::doc::{Doc, FillBuilder};
use super::reference_map::ReferenceMap;
use crate::latex::alignment::{align_rows, split_rows, Padding, Row, Separators};
use crate::latex::ast::{
    Argument, Comment, Environment, Macro, Math, MathKind, Node, Root, Verbatim, VerbatimKind,
};
use crate::latex::formats::raw::print_raw_node;

fn is_block(node: &Node) -> bool {
    match node {
        Node::Environment(_) => true,
        Node::Verbatim(verbatim) => verbatim.kind == VerbatimKind::Environment,
        Node::Math(math) => math.kind == MathKind::Display,
        _ => false,
    }
}

fn breaks_before(node: &Node) -> bool {
    is_block(node) || node.as_macro().is_some_and(|m| m.render_info.break_before)
}

fn breaks_after(node: &Node) -> bool {
    is_block(node) || node.as_macro().is_some_and(|m| m.render_info.break_after)
}

fn is_script(node: &Node) -> bool {
    matches!(node, Node::Subscript(_) | Node::Superscript(_))
}

fn ends_with_comment(nodes: &[Node]) -> bool {
    nodes.last().is_some_and(Node::is_comment)
}

fn comment_doc(comment: &Comment) -> Doc {
    let mut parts = Vec::with_capacity(3);
    if comment.sameline && comment.leading_whitespace {
        parts.push(Doc::text(" "));
    }
    parts.push(Doc::line_suffix(Doc::text(format!("%{}", comment.content))));
    parts.push(Doc::BreakParent);
    Doc::concat(parts)
}

/// A verbatim environment whose last line holds only blanks before `\end`: the content up
/// to that line as is, then `\end` on a line at the current indentation. `None` when the
/// content has to be printed whole.
fn verbatim_doc(verbatim: &Verbatim) -> Option<Doc> {
    if verbatim.kind != VerbatimKind::Environment {
        return None;
    }
    let (body, last_line) = verbatim.content.rsplit_once('\n')?;
    if !last_line.chars().all(|c| c == ' ' || c == '\t') {
        return None;
    }
    // Line breaks trim trailing blanks, which would change the content
    if body.ends_with([' ', '\t']) {
        return None;
    }
    Some(Doc::concat(vec![
        Doc::text(format!("\\begin{{{}}}{}", verbatim.env, body)),
        Doc::hardline(),
        Doc::text(format!("\\end{{{}}}", verbatim.env)),
    ]))
}

pub struct DocBuilder<'a> {
    refs: ReferenceMap<'a>,
    padding: Padding,
    separators: Separators,
}

impl<'a> DocBuilder<'a> {
    pub fn new(root: &'a Root, padding: Padding) -> Self {
        DocBuilder {
            refs: ReferenceMap::new(root),
            padding,
            separators: Separators::default(),
        }
    }

    /// Nodes indexed by the reference map.
    pub fn node_count(&self) -> usize {
        self.refs.len()
    }

    pub fn build(&mut self, root: &'a Root) -> Doc {
        let mut parts = vec![Doc::fill(self.list_parts(&root.content))];
        if ends_with_comment(&root.content) {
            parts.push(Doc::hardline());
        }
        Doc::concat(parts)
    }

    /// Fill parts for a sibling list.
    fn list_parts(&mut self, nodes: &'a [Node]) -> Vec<Doc> {
        let mut fill = FillBuilder::new();
        for node in nodes {
            let previous = self.refs.previous(node);
            let next = self.refs.next(node);
            match node {
                Node::Whitespace => {
                    // The block breaks the line itself
                    if next.is_some_and(breaks_before) {
                        continue;
                    }
                    if previous.is_some_and(breaks_after) {
                        fill.push_separator(Doc::hardline());
                    } else if !(self.refs.context(node).in_math_mode && next.is_some_and(is_script))
                    {
                        fill.push_separator(Doc::line());
                    }
                }
                Node::Parbreak => {
                    fill.push_separator(Doc::concat(vec![Doc::hardline(), Doc::hardline()]))
                }
                Node::Comment(comment) => {
                    let own_line = !comment.sameline
                        && previous.is_some_and(|p| !p.is_comment() && !p.is_parbreak());
                    if own_line {
                        fill.push_separator(Doc::hardline());
                    }
                    fill.push_content(comment_doc(comment));
                    if next.is_some() && !comment.suffix_parbreak {
                        fill.push_separator(Doc::hardline());
                    }
                }
                _ => {
                    let needs_break = breaks_before(node)
                        && previous.is_some_and(|p| {
                            !p.is_parbreak() && !p.is_comment() && !breaks_after(p)
                        });
                    if needs_break {
                        fill.push_separator(Doc::hardline());
                    }

                    match node {
                        Node::Macro(m)
                            if m.render_info.in_par_mode && !m.render_info.hanging_indent =>
                        {
                            fill.extend_parts(self.macro_parts(node, m))
                        }
                        _ => fill.push_content(self.print_node(node)),
                    }

                    if breaks_after(node) && next.is_some_and(|n| !n.is_space() && !n.is_comment())
                    {
                        fill.push_separator(Doc::hardline());
                    }
                }
            }
        }
        fill.finish()
    }

    fn print_node(&mut self, node: &'a Node) -> Doc {
        match node {
            Node::String { content } => Doc::text(content.as_str()),
            Node::Whitespace => Doc::line(),
            Node::Parbreak => Doc::concat(vec![Doc::hardline(), Doc::hardline()]),
            Node::Comment(comment) => comment_doc(comment),
            Node::Group { content } => self.delimited("{", content, "}"),
            Node::Macro(m) => self.macro_doc(node, m),
            Node::Environment(env) => self.environment_doc(env),
            Node::Verbatim(verbatim) => {
                verbatim_doc(verbatim).unwrap_or_else(|| Doc::text(print_raw_node(node)))
            }
            Node::Math(math) => self.math_doc(math),
            Node::Subscript(script) => {
                Doc::concat(vec![Doc::text("_"), self.print_node(&script.content)])
            }
            Node::Superscript(script) => {
                Doc::concat(vec![Doc::text("^"), self.print_node(&script.content)])
            }
            Node::Argument(arg) => self.argument_doc(arg),
        }
    }

    /// `open`, the list, `close` as one grouped fill. The marks stick to the first and
    /// last contents so they are measured with them. A trailing comment gets its line
    /// ended before the closing text.
    fn delimited(&mut self, open: &str, content: &'a [Node], close: &str) -> Doc {
        let mut fill = FillBuilder::new();
        fill.push_content(Doc::text(open));
        fill.extend_parts(self.list_parts(content));
        if ends_with_comment(content) && !close.is_empty() {
            fill.push_separator(Doc::hardline());
        }
        fill.push_content(Doc::text(close));
        Doc::group(Doc::fill(fill.finish()))
    }

    fn argument_doc(&mut self, arg: &'a Argument) -> Doc {
        self.delimited(&arg.open_mark, &arg.content, &arg.close_mark)
    }

    /// The macro head followed by its arguments, as fill parts. Cached per node.
    fn macro_parts(&mut self, node: &'a Node, m: &'a Macro) -> Vec<Doc> {
        if let Some(parts) = self.refs.rendered(node) {
            return parts.to_vec();
        }
        let mut fill = FillBuilder::new();
        fill.push_content(Doc::text(format!("{}{}", m.escape_token, m.name)));
        for arg in m.args.iter().flatten().filter(|arg| !arg.is_absent()) {
            fill.push_content(Doc::text(arg.open_mark.as_str()));
            fill.extend_parts(self.list_parts(&arg.content));
            if ends_with_comment(&arg.content) && !arg.close_mark.is_empty() {
                fill.push_separator(Doc::hardline());
            }
            fill.push_content(Doc::text(arg.close_mark.as_str()));
        }
        let parts = fill.finish();
        self.refs.store_rendered(node, parts.clone());
        parts
    }

    fn macro_doc(&mut self, node: &'a Node, m: &'a Macro) -> Doc {
        if m.render_info.hanging_indent {
            return Doc::indent(Doc::fill(self.macro_parts(node, m)));
        }
        if m.render_info.in_par_mode {
            return Doc::fill(self.macro_parts(node, m));
        }
        let mut parts = vec![Doc::text(format!("{}{}", m.escape_token, m.name))];
        for arg in m.args.iter().flatten().filter(|arg| !arg.is_absent()) {
            parts.push(self.argument_doc(arg));
        }
        Doc::concat(parts)
    }

    fn math_doc(&mut self, math: &'a Math) -> Doc {
        match math.kind {
            MathKind::Inline if math.content.is_empty() => Doc::text("$ $"),
            MathKind::Inline => self.delimited("$", &math.content, "$"),
            MathKind::Display => self.block(Doc::text("\\["), &math.content, Doc::text("\\]")),
        }
    }

    /// `start`, the indented body on its own lines, `end`.
    fn block(&mut self, start: Doc, content: &'a [Node], end: Doc) -> Doc {
        if content.is_empty() {
            return Doc::concat(vec![start, Doc::hardline(), end]);
        }
        let mut body = Vec::with_capacity(2);
        // A comment on the opening line stays there
        if !matches!(content.first(), Some(Node::Comment(c)) if c.sameline) {
            body.push(Doc::hardline());
        }
        body.push(Doc::fill(self.list_parts(content)));
        Doc::concat(vec![
            start,
            Doc::indent(Doc::concat(body)),
            Doc::hardline(),
            end,
        ])
    }

    fn environment_doc(&mut self, env: &'a Environment) -> Doc {
        let name = env.name();
        let mut start = vec![Doc::text(format!("\\begin{{{}}}", name))];
        for arg in env.args.iter().flatten().filter(|arg| !arg.is_absent()) {
            start.push(self.argument_doc(arg));
        }
        let start = Doc::concat(start);
        let end = Doc::text(format!("\\end{{{}}}", name));

        if !env.render_info.aligned_content {
            return self.block(start, &env.content, end);
        }

        let (opening_comment, rows_content) = match env.content.split_first() {
            Some((Node::Comment(comment), rest)) if comment.sameline => (Some(comment), rest),
            _ => (None, &env.content[..]),
        };
        let rows = split_rows(rows_content, &self.separators);
        if rows.iter().any(Row::spans_lines) {
            return self.block(start, &env.content, end);
        }

        let mut parts = vec![start];
        parts.extend(opening_comment.map(comment_doc));
        let lines = align_rows(&rows, self.padding);
        if !lines.is_empty() {
            let rows = Doc::join(Doc::hardline(), lines.into_iter().map(Doc::text).collect());
            parts.push(Doc::indent(Doc::concat(vec![Doc::hardline(), rows])));
        }
        parts.push(Doc::hardline());
        parts.push(end);
        Doc::concat(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::parsing::parse;

    fn doc_for(source: &str) -> Doc {
        let root = parse(source).unwrap();
        DocBuilder::new(&root, Padding::Right).build(&root)
    }

    #[test]
    fn test_words_become_fill() {
        assert_eq!(
            doc_for("a b"),
            Doc::concat(vec![Doc::fill(vec![
                Doc::text("a"),
                Doc::line(),
                Doc::text("b"),
            ])])
        );
    }

    #[test]
    fn test_paragraph_mode_macro_is_spliced() {
        let Doc::Concat(root) = doc_for(r"x \textbf{a b} y") else {
            panic!("expected concat");
        };
        let Doc::Fill(parts) = &root[0] else {
            panic!("expected fill");
        };
        // x, line, \textbf{a, line, b}, line, y
        assert_eq!(parts.len(), 7);
    }

    #[test]
    fn test_trailing_comment_adds_final_break() {
        let Doc::Concat(root) = doc_for("a %c\n") else {
            panic!("expected concat");
        };
        assert_eq!(root.last(), Some(&Doc::hardline()));
    }

    #[test]
    fn test_inline_math_is_a_group() {
        let Doc::Concat(root) = doc_for("$x$") else {
            panic!("expected concat");
        };
        let Doc::Fill(parts) = &root[0] else {
            panic!("expected fill");
        };
        assert!(matches!(
            &parts[0],
            Doc::Group { should_break: false, .. }
        ));
    }

    #[test]
    fn test_reference_map_covers_arguments() {
        let root = parse(r"\frac{a}{b}").unwrap();
        let builder = DocBuilder::new(&root, Padding::Right);
        assert_eq!(builder.node_count(), 3);
    }
}
