//! Context walker
//!
//! Structural recursion over the tree with a [`WalkContext`] that is copied into every
//! recursive call, so mode changes made for one subtree never leak to its siblings.
//!
//! Which children are visited depends on the node kind:
//! - macros: only their attached arguments (never the trailing siblings)
//! - environments: their content, then their arguments (never the name)
//! - math, groups, arguments: their content
//! - scripts: their single operand
//! - strings, whitespace, paragraph breaks, comments, verbatim: nothing
//!
//! Math mode is entered by math nodes and math environments, and set explicitly by
//! macros or environments whose render info declares `in_math_mode`.

use crate::latex::ast::{Node, Root};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkContext {
    pub in_math_mode: bool,
}

impl WalkContext {
    pub fn text() -> Self {
        WalkContext::default()
    }

    pub fn math() -> Self {
        WalkContext { in_math_mode: true }
    }

    fn with_math_mode(self, in_math_mode: bool) -> Self {
        WalkContext { in_math_mode }
    }

    /// The context the children of `node` are visited in.
    pub fn for_children_of(self, node: &Node) -> Self {
        match node {
            Node::Math(_) => self.with_math_mode(true),
            Node::Macro(m) => match m.render_info.in_math_mode {
                Some(math) => self.with_math_mode(math),
                None => self,
            },
            Node::Environment(env) => match env.render_info.in_math_mode {
                Some(math) => self.with_math_mode(math),
                None if env.is_math() => self.with_math_mode(true),
                None => self,
            },
            _ => self,
        }
    }
}

/// When a visitor is called relative to visiting the children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerTime {
    /// Before recursing; the visitor may restructure what is about to be visited
    Early,
    /// After recursing
    Late,
}

/// Callbacks for [`walk`]. Both methods default to doing nothing.
pub trait WalkVisitor {
    fn visit_node(&mut self, _node: &mut Node, _context: WalkContext) {}

    fn visit_list(&mut self, _nodes: &mut Vec<Node>, _context: WalkContext) {}
}

pub fn walk_root<V: WalkVisitor + ?Sized>(
    root: &mut Root,
    visitor: &mut V,
    trigger: TriggerTime,
    context: WalkContext,
) {
    walk_list(&mut root.content, visitor, trigger, context);
}

pub fn walk_list<V: WalkVisitor + ?Sized>(
    nodes: &mut Vec<Node>,
    visitor: &mut V,
    trigger: TriggerTime,
    context: WalkContext,
) {
    if trigger == TriggerTime::Early {
        visitor.visit_list(nodes, context);
    }
    for node in nodes.iter_mut() {
        walk(node, visitor, trigger, context);
    }
    if trigger == TriggerTime::Late {
        visitor.visit_list(nodes, context);
    }
}

pub fn walk<V: WalkVisitor + ?Sized>(
    node: &mut Node,
    visitor: &mut V,
    trigger: TriggerTime,
    context: WalkContext,
) {
    if trigger == TriggerTime::Early {
        visitor.visit_node(node, context);
    }

    let child_context = context.for_children_of(node);
    match node {
        Node::Macro(m) => {
            for arg in m.args.iter_mut().flatten() {
                walk_list(&mut arg.content, visitor, trigger, child_context);
            }
        }
        Node::Environment(env) => {
            walk_list(&mut env.content, visitor, trigger, child_context);
            for arg in env.args.iter_mut().flatten() {
                walk_list(&mut arg.content, visitor, trigger, child_context);
            }
        }
        Node::Math(math) => walk_list(&mut math.content, visitor, trigger, child_context),
        Node::Group { content } => walk_list(content, visitor, trigger, child_context),
        Node::Argument(arg) => walk_list(&mut arg.content, visitor, trigger, child_context),
        Node::Subscript(script) | Node::Superscript(script) => {
            walk(&mut script.content, visitor, trigger, child_context)
        }
        Node::String { .. }
        | Node::Whitespace
        | Node::Parbreak
        | Node::Comment(_)
        | Node::Verbatim(_) => {}
    }

    if trigger == TriggerTime::Late {
        visitor.visit_node(node, context);
    }
}

/// Visitor that applies `callback` to every node accepted by `matcher`.
pub struct MatchVisitor<M, C> {
    matcher: M,
    callback: C,
}

impl<M, C> WalkVisitor for MatchVisitor<M, C>
where
    M: Fn(&Node, WalkContext) -> bool,
    C: FnMut(&mut Node, WalkContext),
{
    fn visit_node(&mut self, node: &mut Node, context: WalkContext) {
        if (self.matcher)(node, context) {
            (self.callback)(node, context);
        }
    }
}

/// Apply `callback` to each node matching `matcher`, early or late relative to its
/// children.
pub fn walk_matching<M, C>(
    root: &mut Root,
    matcher: M,
    callback: C,
    trigger: TriggerTime,
    context: WalkContext,
) where
    M: Fn(&Node, WalkContext) -> bool,
    C: FnMut(&mut Node, WalkContext),
{
    let mut visitor = MatchVisitor { matcher, callback };
    walk_root(root, &mut visitor, trigger, context);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::ast::{Argument, Environment, EnvironmentKind, Macro, Script};

    /// Records the math flag every string was visited with.
    #[derive(Default)]
    struct Modes(Vec<(String, bool)>);

    impl WalkVisitor for Modes {
        fn visit_node(&mut self, node: &mut Node, context: WalkContext) {
            if let Node::String { content } = node {
                self.0.push((content.clone(), context.in_math_mode));
            }
        }
    }

    fn modes(root: &mut Root) -> Vec<(String, bool)> {
        let mut visitor = Modes::default();
        walk_root(root, &mut visitor, TriggerTime::Early, WalkContext::text());
        visitor.0
    }

    #[test]
    fn test_math_mode_is_scoped_to_subtree() {
        let mut root = Root::new(vec![
            Node::string("a"),
            Node::inline_math(vec![Node::string("x")]),
            Node::string("b"),
        ]);
        assert_eq!(
            modes(&mut root),
            vec![
                ("a".into(), false),
                ("x".into(), true),
                ("b".into(), false)
            ]
        );
    }

    #[test]
    fn test_render_info_overrides_math_mode() {
        let mut text = Macro::new("text").with_args(vec![Argument::new(
            "{",
            "}",
            vec![Node::string("words")],
        )]);
        text.render_info.in_math_mode = Some(false);
        let mut root = Root::new(vec![Node::inline_math(vec![
            Node::Macro(text),
            Node::Superscript(Script {
                content: Box::new(Node::string("2")),
            }),
        ])]);
        assert_eq!(
            modes(&mut root),
            vec![("words".into(), false), ("2".into(), true)]
        );
    }

    #[test]
    fn test_environment_name_is_not_visited() {
        let mut env = Environment::new("align", vec![Node::string("x")]);
        env.kind = EnvironmentKind::Math;
        let mut root = Root::new(vec![Node::Environment(env)]);
        assert_eq!(modes(&mut root), vec![("x".into(), true)]);
    }

    #[test]
    fn test_unattached_macro_siblings_stay_at_parent_level() {
        let mut root = Root::new(vec![Node::macro_named("foo"), Node::group(vec![Node::string("g")])]);
        let mut count = 0;
        walk_matching(
            &mut root,
            |node, _| node.is_string("g"),
            |_, context| {
                assert!(!context.in_math_mode);
                count += 1;
            },
            TriggerTime::Late,
            WalkContext::text(),
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_late_trigger_sees_processed_children() {
        struct Upper;
        impl WalkVisitor for Upper {
            fn visit_node(&mut self, node: &mut Node, _: WalkContext) {
                if let Node::String { content } = node {
                    *content = content.to_uppercase();
                }
            }
            fn visit_list(&mut self, nodes: &mut Vec<Node>, _: WalkContext) {
                assert!(nodes
                    .iter()
                    .all(|n| n.as_string().map_or(true, |s| s == s.to_uppercase())));
            }
        }
        let mut root = Root::new(vec![Node::group(vec![Node::string("a")])]);
        walk_root(&mut root, &mut Upper, TriggerTime::Late, WalkContext::text());
        assert_eq!(root.content[0], Node::group(vec![Node::string("A")]));
    }
}
