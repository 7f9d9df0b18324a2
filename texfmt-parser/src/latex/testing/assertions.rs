//! Fluent assertions over the tree
//!
//! Every assertion carries a context string describing its path from the root, so a
//! failure deep inside an argument reads like `root[2].arg[1][0]: Expected macro,
//! found string`.

use crate::latex::ast::{Argument, Comment, Environment, Macro, Math, MathKind, Node, Root};
use crate::latex::formats::raw::print_raw;

/// Expectation on raw-printed text.
#[derive(Debug, Clone)]
pub enum RawMatch {
    Exact(String),
    Contains(String),
    /// Equal once every whitespace run on both sides is one space, so an expectation
    /// can be written without caring where the source had line breaks
    Collapsed(String),
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl RawMatch {
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            RawMatch::Exact(expected) => actual == expected,
            RawMatch::Contains(part) => actual.contains(part.as_str()),
            RawMatch::Collapsed(expected) => collapse(actual) == collapse(expected),
        }
    }

    pub fn assert(&self, actual: &str, context: &str) {
        match self {
            RawMatch::Exact(expected) => assert_eq!(
                actual, expected,
                "{}: Expected raw text {:?}, found {:?}",
                context, expected, actual
            ),
            RawMatch::Contains(part) => assert!(
                self.matches(actual),
                "{}: Expected raw text containing {:?}, found {:?}",
                context,
                part,
                actual
            ),
            RawMatch::Collapsed(expected) => assert!(
                self.matches(actual),
                "{}: Expected raw text {:?} up to whitespace, found {:?}",
                context,
                expected,
                actual
            ),
        }
    }
}

/// Create an assertion builder for a root
pub fn assert_tree(root: &Root) -> NodesAssertion<'_> {
    NodesAssertion {
        nodes: &root.content,
        context: "root".to_string(),
    }
}

/// Create an assertion builder for a bare node list, as returned by `parse_math`
pub fn assert_nodes(nodes: &[Node]) -> NodesAssertion<'_> {
    NodesAssertion {
        nodes,
        context: "nodes".to_string(),
    }
}

pub struct NodesAssertion<'a> {
    nodes: &'a [Node],
    context: String,
}

impl<'a> NodesAssertion<'a> {
    pub fn node_count(self, expected: usize) -> Self {
        assert_eq!(
            self.nodes.len(),
            expected,
            "{}: Expected {} nodes, found {}: {:?}",
            self.context,
            expected,
            self.nodes.len(),
            self.node_types()
        );
        self
    }

    /// The `type` tag of every node, in order.
    pub fn types(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.node_types(),
            expected,
            "{}: Unexpected node types",
            self.context
        );
        self
    }

    pub fn node<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let Some(node) = self.nodes.get(index) else {
            panic!(
                "{}: Node index {} out of bounds ({} nodes)",
                self.context,
                index,
                self.nodes.len()
            );
        };
        assertion(NodeAssertion {
            node,
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Raw-printed text of the whole list.
    pub fn raw(self, expected: &str) -> Self {
        self.raw_matches(RawMatch::Exact(expected.to_string()))
    }

    pub fn raw_matches(self, matcher: RawMatch) -> Self {
        matcher.assert(&print_raw(self.nodes), &self.context);
        self
    }

    fn node_types(&self) -> Vec<&'static str> {
        self.nodes.iter().map(Node::node_type).collect()
    }
}

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    fn mismatch(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.node.node_type()
        )
    }

    pub fn assert_string(self, expected: &str) {
        match self.node {
            Node::String { content } => assert_eq!(
                content, expected,
                "{}: Expected string '{}', found '{}'",
                self.context, expected, content
            ),
            _ => self.mismatch("string"),
        }
    }

    pub fn assert_whitespace(self) {
        if !self.node.is_whitespace() {
            self.mismatch("whitespace")
        }
    }

    pub fn assert_parbreak(self) {
        if !self.node.is_parbreak() {
            self.mismatch("parbreak")
        }
    }

    pub fn assert_group(self) -> NodesAssertion<'a> {
        match self.node {
            Node::Group { content } => NodesAssertion {
                nodes: content,
                context: format!("{}.group", self.context),
            },
            _ => self.mismatch("group"),
        }
    }

    pub fn assert_macro(self) -> MacroAssertion<'a> {
        match self.node {
            Node::Macro(m) => MacroAssertion {
                m,
                context: self.context,
            },
            _ => self.mismatch("macro"),
        }
    }

    pub fn assert_environment(self) -> EnvironmentAssertion<'a> {
        match self.node {
            Node::Environment(env) => EnvironmentAssertion {
                env,
                context: self.context,
            },
            _ => self.mismatch("environment"),
        }
    }

    pub fn assert_comment(self) -> CommentAssertion<'a> {
        match self.node {
            Node::Comment(comment) => CommentAssertion {
                comment,
                context: self.context,
            },
            _ => self.mismatch("comment"),
        }
    }

    pub fn assert_math(self) -> MathAssertion<'a> {
        match self.node {
            Node::Math(math) => MathAssertion {
                math,
                context: self.context,
            },
            _ => self.mismatch("math"),
        }
    }

    /// Superscript or subscript; returns the operand.
    pub fn assert_script(self, marker: char) -> NodeAssertion<'a> {
        match (self.node, marker) {
            (Node::Superscript(script), '^') | (Node::Subscript(script), '_') => NodeAssertion {
                node: &script.content,
                context: format!("{}{}", self.context, marker),
            },
            _ => self.mismatch(if marker == '^' { "superscript" } else { "subscript" }),
        }
    }

    pub fn raw(self, expected: &str) {
        RawMatch::Exact(expected.to_string())
            .assert(&print_raw(std::slice::from_ref(self.node)), &self.context);
    }
}

pub struct MacroAssertion<'a> {
    m: &'a Macro,
    context: String,
}

impl<'a> MacroAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.m.name, expected,
            "{}: Expected macro '{}', found '{}'",
            self.context, expected, self.m.name
        );
        self
    }

    /// No signature was applied.
    pub fn unattached(self) -> Self {
        assert!(
            self.m.args.is_none(),
            "{}: Expected no attached arguments on \\{}",
            self.context,
            self.m.name
        );
        self
    }

    pub fn arg_count(self, expected: usize) -> Self {
        let found = self.m.args.as_ref().map_or(0, Vec::len);
        assert_eq!(
            found, expected,
            "{}: Expected {} arguments on \\{}, found {}",
            self.context, expected, self.m.name, found
        );
        self
    }

    pub fn arg<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ArgumentAssertion<'a>),
    {
        let Some(arg) = self.m.arg(index) else {
            panic!(
                "{}: \\{} has no argument {}",
                self.context, self.m.name, index
            );
        };
        assertion(ArgumentAssertion {
            arg,
            context: format!("{}.arg[{}]", self.context, index),
        });
        self
    }

    pub fn hanging_indent(self, expected: bool) -> Self {
        assert_eq!(
            self.m.render_info.hanging_indent, expected,
            "{}: hanging_indent on \\{}",
            self.context, self.m.name
        );
        self
    }

    pub fn in_par_mode(self, expected: bool) -> Self {
        assert_eq!(
            self.m.render_info.in_par_mode, expected,
            "{}: in_par_mode on \\{}",
            self.context, self.m.name
        );
        self
    }
}

pub struct ArgumentAssertion<'a> {
    arg: &'a Argument,
    context: String,
}

impl<'a> ArgumentAssertion<'a> {
    pub fn marks(self, open: &str, close: &str) -> Self {
        assert_eq!(
            (self.arg.open_mark.as_str(), self.arg.close_mark.as_str()),
            (open, close),
            "{}: Unexpected argument delimiters",
            self.context
        );
        self
    }

    pub fn absent(self) -> Self {
        assert!(
            self.arg.is_absent(),
            "{}: Expected an absent argument, found {:?}",
            self.context,
            print_raw(&self.arg.content)
        );
        self
    }

    /// Raw-printed content, without the delimiters.
    pub fn raw(self, expected: &str) -> Self {
        RawMatch::Exact(expected.to_string()).assert(&print_raw(&self.arg.content), &self.context);
        self
    }

    pub fn content<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a>),
    {
        assertion(NodesAssertion {
            nodes: &self.arg.content,
            context: self.context.clone(),
        });
        self
    }
}

pub struct EnvironmentAssertion<'a> {
    env: &'a Environment,
    context: String,
}

impl<'a> EnvironmentAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.env.name(),
            expected,
            "{}: Unexpected environment name",
            self.context
        );
        self
    }

    pub fn aligned(self, expected: bool) -> Self {
        assert_eq!(
            self.env.render_info.aligned_content, expected,
            "{}: aligned_content on {}",
            self.context,
            self.env.name()
        );
        self
    }

    pub fn arg<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ArgumentAssertion<'a>),
    {
        let Some(arg) = self.env.args.as_ref().and_then(|args| args.get(index)) else {
            panic!(
                "{}: environment {} has no argument {}",
                self.context,
                self.env.name(),
                index
            );
        };
        assertion(ArgumentAssertion {
            arg,
            context: format!("{}.arg[{}]", self.context, index),
        });
        self
    }

    pub fn content<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a>),
    {
        assertion(NodesAssertion {
            nodes: &self.env.content,
            context: format!("{}.{}", self.context, self.env.name()),
        });
        self
    }
}

pub struct CommentAssertion<'a> {
    comment: &'a Comment,
    context: String,
}

impl CommentAssertion<'_> {
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.comment.content, expected,
            "{}: Unexpected comment text",
            self.context
        );
        self
    }

    pub fn sameline(self, expected: bool) -> Self {
        assert_eq!(self.comment.sameline, expected, "{}: sameline", self.context);
        self
    }

    pub fn suffix_parbreak(self, expected: bool) -> Self {
        assert_eq!(
            self.comment.suffix_parbreak, expected,
            "{}: suffix_parbreak",
            self.context
        );
        self
    }

    pub fn leading_whitespace(self, expected: bool) -> Self {
        assert_eq!(
            self.comment.leading_whitespace, expected,
            "{}: leading_whitespace",
            self.context
        );
        self
    }
}

pub struct MathAssertion<'a> {
    math: &'a Math,
    context: String,
}

impl<'a> MathAssertion<'a> {
    pub fn display(self, expected: bool) -> Self {
        assert_eq!(
            self.math.kind == MathKind::Display,
            expected,
            "{}: display math",
            self.context
        );
        self
    }

    pub fn content<F>(self, assertion: F) -> Self
    where
        F: FnOnce(NodesAssertion<'a>),
    {
        assertion(NodesAssertion {
            nodes: &self.math.content,
            context: format!("{}.math", self.context),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::parsing::parse;

    #[test]
    fn test_fluent_macro_assertions() {
        let root = parse(r"\frac{1}{2} \item x").unwrap();
        assert_tree(&root).node(0, |node| {
            node.assert_macro()
                .name("frac")
                .arg_count(2)
                .arg(0, |arg| {
                    arg.marks("{", "}").raw("1");
                })
                .arg(1, |arg| {
                    arg.content(|nodes| {
                        nodes.node_count(1).node(0, |n| n.assert_string("2"));
                    });
                });
        });
    }

    #[test]
    #[should_panic(expected = "root[0]: Expected macro, found string")]
    fn test_mismatch_reports_path() {
        let root = parse("a").unwrap();
        assert_tree(&root).node(0, |node| {
            node.assert_macro();
        });
    }

    #[test]
    fn test_raw_matchers() {
        let root = parse("\\begin{center}\n  a\n  b\n\\end{center}").unwrap();
        assert_tree(&root)
            .raw_matches(RawMatch::Collapsed(r"\begin{center}a b\end{center}".to_string()))
            .raw_matches(RawMatch::Contains("a b".to_string()));
        assert!(!RawMatch::Collapsed("ab".to_string()).matches("a b"));
    }

    #[test]
    fn test_types() {
        let root = parse("a %c\n\n$x^2$").unwrap();
        assert_tree(&root)
            .types(&["string", "comment", "parbreak", "math"])
            .node(3, |node| {
                node.assert_math().display(false).content(|nodes| {
                    nodes.node(1, |n| n.assert_script('^').assert_string("2"));
                });
            });
    }
}
