//! Raw printing
//!
//! Width-unaware serialization of a tree back to source. Re-parsing the output yields
//! the same tree, and printing a freshly parsed source reproduces it up to these
//! normalizations:
//! - every whitespace run prints as one space, every paragraph break as one blank line
//! - blanks before a same-line comment become one space; blanks starting the line after
//!   a comment are dropped, and a comment always ends with a line break
//! - `\(...\)` prints as `$...$` and `$$...$$` as `\[...\]`
//! - blanks between a math-mode `^`/`_` and its operand are dropped
//! - attached arguments print with their marks, so a bare mandatory argument gains braces

use crate::latex::ast::{Argument, Math, MathKind, Node, VerbatimKind};

/// Print a sibling list.
pub fn print_raw(nodes: &[Node]) -> String {
    let mut out = String::new();
    write_list(&mut out, nodes);
    out
}

/// Print a single node as if it had no siblings.
pub fn print_raw_node(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, None);
    out
}

fn write_list(out: &mut String, nodes: &[Node]) {
    let mut previous = None;
    for node in nodes {
        write_node(out, node, previous);
        previous = Some(node);
    }
}

fn write_node(out: &mut String, node: &Node, previous: Option<&Node>) {
    match node {
        Node::String { content } => out.push_str(content),
        Node::Whitespace => out.push(' '),
        Node::Parbreak => out.push_str("\n\n"),
        Node::Comment(comment) => {
            let starts_line = matches!(previous, Some(Node::Parbreak) | Some(Node::Comment(_)));
            if !comment.sameline && !starts_line {
                out.push('\n');
            } else if comment.sameline && comment.leading_whitespace {
                out.push(' ');
            }
            out.push('%');
            out.push_str(&comment.content);
            if !comment.suffix_parbreak {
                out.push('\n');
            }
        }
        Node::Group { content } => {
            out.push('{');
            write_list(out, content);
            out.push('}');
        }
        Node::Macro(m) => {
            out.push_str(&m.escape_token);
            out.push_str(&m.name);
            for arg in m.args.iter().flatten() {
                write_argument(out, arg);
            }
        }
        Node::Environment(env) => {
            out.push_str("\\begin{");
            write_list(out, &env.env_name);
            out.push('}');
            for arg in env.args.iter().flatten() {
                write_argument(out, arg);
            }
            write_list(out, &env.content);
            out.push_str("\\end{");
            write_list(out, &env.env_name);
            out.push('}');
        }
        Node::Verbatim(verbatim) => match verbatim.kind {
            VerbatimKind::Environment => {
                out.push_str("\\begin{");
                out.push_str(&verbatim.env);
                out.push('}');
                out.push_str(&verbatim.content);
                out.push_str("\\end{");
                out.push_str(&verbatim.env);
                out.push('}');
            }
            VerbatimKind::Inline { delimiter } => {
                out.push('\\');
                out.push_str(&verbatim.env);
                out.push(delimiter);
                out.push_str(&verbatim.content);
                out.push(delimiter);
            }
        },
        Node::Math(Math {
            kind: MathKind::Inline,
            content,
        }) if content.is_empty() => out.push_str("$ $"),
        Node::Math(Math { kind, content }) => {
            let (open, close) = match kind {
                MathKind::Inline => ("$", "$"),
                MathKind::Display => ("\\[", "\\]"),
            };
            out.push_str(open);
            write_list(out, content);
            out.push_str(close);
        }
        Node::Subscript(script) => {
            out.push('_');
            write_node(out, &script.content, None);
        }
        Node::Superscript(script) => {
            out.push('^');
            write_node(out, &script.content, None);
        }
        Node::Argument(arg) => write_argument(out, arg),
    }
}

fn write_argument(out: &mut String, arg: &Argument) {
    out.push_str(&arg.open_mark);
    write_list(out, &arg.content);
    out.push_str(&arg.close_mark);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::parsing::{parse, parse_minimal, ParseOptions};

    fn minimal(source: &str) -> String {
        print_raw(&parse_minimal(source, &ParseOptions::default()).unwrap().content)
    }

    #[test]
    fn test_identity_on_canonical_source() {
        for source in [
            r"\section{Intro} text with $x^{2}_i$ math",
            "a %comment\nb",
            "a\n%own line\nb",
            "para one\n\npara two",
            "\\begin{itemize}\\item one\\end{itemize}",
            r"\verb|{x| and \[ y \]",
            "{\n%inside\n}",
        ] {
            assert_eq!(minimal(source), source);
        }
    }

    #[test]
    fn test_normalizations() {
        assert_eq!(minimal("a   b"), "a b");
        assert_eq!(minimal("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(minimal("{\n\n\n}"), minimal("{\n\n}"));
        assert_eq!(minimal(r"\(x\)"), "$x$");
        assert_eq!(minimal("$$x$$"), r"\[x\]");
        assert_eq!(minimal("a    %c\n    b"), "a %c\nb");
    }

    #[test]
    fn test_attached_arguments_print_with_marks() {
        let root = parse(r"\frac 1 2 \sqrt[3]{x}").unwrap();
        assert_eq!(print_raw(&root.content), r"\frac{1}{2} \sqrt[3]{x}");
    }
}
