//! Document model
//!
//! Width-agnostic layout directives. Construction builds a [`Doc`] from the tree and
//! [`print_doc`](super::resolve::print_doc) resolves it into text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Nothing when flat, a line break when broken
    Soft,
    /// A space when flat, a line break when broken
    Normal,
    /// Always a line break; breaks every enclosing group
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Doc {
    Text(String),
    Concat(Vec<Doc>),
    /// Alternating content and separator parts, wrapped greedily
    Fill(Vec<Doc>),
    /// Printed fully flat if it fits in the remaining width, fully broken otherwise
    Group {
        contents: Box<Doc>,
        should_break: bool,
    },
    /// Adds one indentation unit after every line break inside
    Indent(Box<Doc>),
    Line(LineKind),
    /// Deferred until just before the next line break
    LineSuffix(Box<Doc>),
    /// Forces the enclosing groups to break
    BreakParent,
}

impl Doc {
    pub fn text(text: impl Into<String>) -> Doc {
        Doc::Text(text.into())
    }

    pub fn concat(parts: Vec<Doc>) -> Doc {
        Doc::Concat(parts)
    }

    pub fn fill(parts: Vec<Doc>) -> Doc {
        Doc::Fill(parts)
    }

    pub fn group(contents: Doc) -> Doc {
        Doc::Group {
            contents: Box::new(contents),
            should_break: false,
        }
    }

    pub fn indent(contents: Doc) -> Doc {
        Doc::Indent(Box::new(contents))
    }

    pub fn line() -> Doc {
        Doc::Line(LineKind::Normal)
    }

    pub fn softline() -> Doc {
        Doc::Line(LineKind::Soft)
    }

    pub fn hardline() -> Doc {
        Doc::Line(LineKind::Hard)
    }

    pub fn line_suffix(contents: Doc) -> Doc {
        Doc::LineSuffix(Box::new(contents))
    }

    /// `docs` separated by `separator`.
    pub fn join(separator: Doc, docs: Vec<Doc>) -> Doc {
        let mut parts = Vec::with_capacity(docs.len() * 2);
        for (index, doc) in docs.into_iter().enumerate() {
            if index > 0 {
                parts.push(separator.clone());
            }
            parts.push(doc);
        }
        Doc::Concat(parts)
    }
}

/// Builds well-formed [`Doc::Fill`] parts: contents at even positions, separators at
/// odd ones. Adjacent contents are merged and adjacent separators get an empty content
/// between them.
#[derive(Debug, Default)]
pub struct FillBuilder {
    parts: Vec<Doc>,
}

impl FillBuilder {
    pub fn new() -> Self {
        FillBuilder::default()
    }

    fn expects_content(&self) -> bool {
        self.parts.len() % 2 == 0
    }

    pub fn push_content(&mut self, doc: Doc) {
        if self.expects_content() {
            self.parts.push(doc);
            return;
        }
        if let Some(last) = self.parts.last_mut() {
            let previous = std::mem::replace(last, Doc::Text(String::new()));
            *last = match previous {
                Doc::Concat(mut docs) => {
                    docs.push(doc);
                    Doc::Concat(docs)
                }
                other => Doc::Concat(vec![other, doc]),
            };
        }
    }

    pub fn push_separator(&mut self, doc: Doc) {
        if self.expects_content() {
            self.parts.push(Doc::text(""));
        }
        self.parts.push(doc);
    }

    /// Append parts produced by another builder.
    pub fn extend_parts(&mut self, parts: Vec<Doc>) {
        for (index, part) in parts.into_iter().enumerate() {
            if index % 2 == 0 {
                self.push_content(part);
            } else {
                self.push_separator(part);
            }
        }
    }

    pub fn ends_with_separator(&self) -> bool {
        !self.parts.is_empty() && self.expects_content()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn finish(self) -> Vec<Doc> {
        self.parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_contents_merge() {
        let mut fill = FillBuilder::new();
        fill.push_content(Doc::text("a"));
        fill.push_content(Doc::text("b"));
        fill.push_separator(Doc::line());
        fill.push_content(Doc::text("c"));
        assert_eq!(
            fill.finish(),
            vec![
                Doc::concat(vec![Doc::text("a"), Doc::text("b")]),
                Doc::line(),
                Doc::text("c"),
            ]
        );
    }

    #[test]
    fn test_adjacent_separators_get_empty_content() {
        let mut fill = FillBuilder::new();
        fill.push_separator(Doc::line());
        fill.push_separator(Doc::hardline());
        assert_eq!(
            fill.finish(),
            vec![Doc::text(""), Doc::line(), Doc::text(""), Doc::hardline()]
        );
    }

    #[test]
    fn test_extend_keeps_alternation() {
        let mut inner = FillBuilder::new();
        inner.push_content(Doc::text("x"));
        inner.push_separator(Doc::line());
        inner.push_content(Doc::text("y"));

        let mut outer = FillBuilder::new();
        outer.push_content(Doc::text("{"));
        outer.extend_parts(inner.finish());
        outer.push_content(Doc::text("}"));
        assert_eq!(
            outer.finish(),
            vec![
                Doc::concat(vec![Doc::text("{"), Doc::text("x")]),
                Doc::line(),
                Doc::concat(vec![Doc::text("y"), Doc::text("}")]),
            ]
        );
    }

    #[test]
    fn test_join() {
        assert_eq!(
            Doc::join(Doc::hardline(), vec![Doc::text("a"), Doc::text("b")]),
            Doc::concat(vec![Doc::text("a"), Doc::hardline(), Doc::text("b")])
        );
    }
}
