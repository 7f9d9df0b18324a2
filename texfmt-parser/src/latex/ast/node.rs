//! Node types

use super::render_info::{EnvironmentRenderInfo, MacroRenderInfo};
use serde::{Deserialize, Serialize};

/// The document root.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename = "root")]
pub struct Root {
    pub content: Vec<Node>,
}

impl Root {
    pub fn new(content: Vec<Node>) -> Self {
        Root { content }
    }
}

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Node {
    /// A run of ordinary characters
    String { content: String },
    /// Inter-word space; at most one line break in the source
    Whitespace,
    /// Paragraph break; two or more line breaks in the source
    Parbreak,
    Comment(Comment),
    Group { content: Vec<Node> },
    Macro(Macro),
    Environment(Environment),
    /// Verbatim environments and `\verb`; content is never parsed
    Verbatim(Verbatim),
    Math(Math),
    Subscript(Script),
    Superscript(Script),
    Argument(Argument),
}

/// A `%` comment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Text after the `%`, without the line break
    pub content: String,
    /// Whether the comment shares its line with preceding content
    pub sameline: bool,
    /// Whether a paragraph break follows the comment
    pub suffix_parbreak: bool,
    /// Whether blanks separated the comment from preceding content
    pub leading_whitespace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Macro {
    pub name: String,
    pub escape_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<Argument>>,
    #[serde(default, skip_serializing_if = "MacroRenderInfo::is_empty")]
    pub render_info: MacroRenderInfo,
}

impl Macro {
    pub fn new(name: impl Into<String>) -> Self {
        Macro {
            name: name.into(),
            escape_token: "\\".to_string(),
            args: None,
            render_info: MacroRenderInfo::default(),
        }
    }

    pub fn with_args(mut self, args: Vec<Argument>) -> Self {
        self.args = Some(args);
        self
    }

    /// The `n`th argument (zero based), if attached and present.
    pub fn arg(&self, n: usize) -> Option<&Argument> {
        self.args
            .as_ref()
            .and_then(|args| args.get(n))
            .filter(|arg| !arg.is_absent())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvironmentKind {
    #[default]
    Normal,
    /// Body is typeset in math mode (`align`, `equation`, ...)
    Math,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub kind: EnvironmentKind,
    /// The name as written between the braces of `\begin{...}`
    pub env_name: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<Argument>>,
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "EnvironmentRenderInfo::is_empty")]
    pub render_info: EnvironmentRenderInfo,
}

impl Environment {
    pub fn new(name: &str, content: Vec<Node>) -> Self {
        Environment {
            kind: EnvironmentKind::Normal,
            env_name: vec![Node::string(name)],
            args: None,
            content,
            render_info: EnvironmentRenderInfo::default(),
        }
    }

    /// The environment name as plain text.
    pub fn name(&self) -> String {
        crate::latex::formats::raw::print_raw(&self.env_name)
    }

    pub fn is_math(&self) -> bool {
        self.kind == EnvironmentKind::Math
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "camelCase")]
pub enum VerbatimKind {
    /// `\begin{env}...\end{env}`
    Environment,
    /// `\verb|...|`
    Inline { delimiter: char },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verbatim {
    /// Environment name, or the macro name (`verb`, `verb*`) for inline verbatim
    pub env: String,
    pub kind: VerbatimKind,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MathKind {
    Inline,
    Display,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Math {
    pub kind: MathKind,
    pub content: Vec<Node>,
}

/// The operand of `^` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub content: Box<Node>,
}

/// An argument attached to a macro or environment.
///
/// Absent optional arguments have empty marks and empty content, so positional lookup
/// stays stable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    pub open_mark: String,
    pub close_mark: String,
    pub content: Vec<Node>,
}

impl Argument {
    pub fn new(open_mark: &str, close_mark: &str, content: Vec<Node>) -> Self {
        Argument {
            open_mark: open_mark.to_string(),
            close_mark: close_mark.to_string(),
            content,
        }
    }

    pub fn absent() -> Self {
        Argument::default()
    }

    pub fn is_absent(&self) -> bool {
        self.open_mark.is_empty() && self.close_mark.is_empty() && self.content.is_empty()
    }
}

impl Node {
    pub fn string(content: impl Into<String>) -> Self {
        Node::String {
            content: content.into(),
        }
    }

    pub fn group(content: Vec<Node>) -> Self {
        Node::Group { content }
    }

    pub fn macro_named(name: impl Into<String>) -> Self {
        Node::Macro(Macro::new(name))
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Node::Comment(Comment {
            content: content.into(),
            ..Comment::default()
        })
    }

    pub fn inline_math(content: Vec<Node>) -> Self {
        Node::Math(Math {
            kind: MathKind::Inline,
            content,
        })
    }

    pub fn display_math(content: Vec<Node>) -> Self {
        Node::Math(Math {
            kind: MathKind::Display,
            content,
        })
    }

    /// Name of the variant, matching the serialized `type` tag.
    pub fn node_type(&self) -> &'static str {
        match self {
            Node::String { .. } => "string",
            Node::Whitespace => "whitespace",
            Node::Parbreak => "parbreak",
            Node::Comment(_) => "comment",
            Node::Group { .. } => "group",
            Node::Macro(_) => "macro",
            Node::Environment(_) => "environment",
            Node::Verbatim(_) => "verbatim",
            Node::Math(_) => "math",
            Node::Subscript(_) => "subscript",
            Node::Superscript(_) => "superscript",
            Node::Argument(_) => "argument",
        }
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Node::Whitespace)
    }

    pub fn is_parbreak(&self) -> bool {
        matches!(self, Node::Parbreak)
    }

    /// Whitespace or paragraph break.
    pub fn is_space(&self) -> bool {
        matches!(self, Node::Whitespace | Node::Parbreak)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Node::Comment(_))
    }

    pub fn is_string(&self, text: &str) -> bool {
        matches!(self, Node::String { content } if content == text)
    }

    pub fn is_macro(&self, name: &str) -> bool {
        matches!(self, Node::Macro(m) if m.name == name)
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Node::String { content } => Some(content),
            _ => None,
        }
    }

    pub fn as_macro(&self) -> Option<&Macro> {
        match self {
            Node::Macro(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_macro_mut(&mut self) -> Option<&mut Macro> {
        match self {
            Node::Macro(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Node::Comment(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_environment(&self) -> Option<&Environment> {
        match self {
            Node::Environment(e) => Some(e),
            _ => None,
        }
    }

    /// The child list of nodes that own one.
    pub fn content(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Group { content } => Some(content),
            Node::Environment(e) => Some(&e.content),
            Node::Math(m) => Some(&m.content),
            Node::Argument(a) => Some(&a.content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_argument() {
        assert!(Argument::absent().is_absent());
        assert!(!Argument::new("", "", vec![Node::string("x")]).is_absent());
        assert!(!Argument::new("[", "]", vec![]).is_absent());
    }

    #[test]
    fn test_macro_positional_lookup_skips_absent() {
        let m = Macro::new("xxx").with_args(vec![
            Argument::absent(),
            Argument::new("{", "}", vec![Node::string("a")]),
        ]);
        assert!(m.arg(0).is_none());
        assert_eq!(m.arg(1).map(|a| a.content.len()), Some(1));
        assert!(m.arg(2).is_none());
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let node = Node::Macro(Macro::new("emph").with_args(vec![Argument::new(
            "{",
            "}",
            vec![Node::string("x")],
        )]));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "macro");
        assert_eq!(json["escapeToken"], "\\");
        assert_eq!(json["args"][0]["openMark"], "{");
        assert_eq!(json["args"][0]["content"][0]["type"], "string");
    }

    #[test]
    fn test_deserializes_round_trip() {
        let root = Root::new(vec![
            Node::string("a"),
            Node::Whitespace,
            Node::Comment(Comment {
                content: "note".into(),
                sameline: true,
                suffix_parbreak: false,
                leading_whitespace: true,
            }),
            Node::Subscript(Script {
                content: Box::new(Node::string("2")),
            }),
        ]);
        let json = serde_json::to_string(&root).unwrap();
        assert!(json.starts_with(r#"{"type":"root""#));
        let back: Root = serde_json::from_str(&json).unwrap();
        assert_eq!(back, root);
    }
}
