//! Argument attachment
//!
//! Macros in a sibling list are handled right to left. By the time a macro gobbles its
//! arguments, every macro after it already owns its own, so `\frac\alpha\beta` takes
//! `\alpha` and `\beta` as whole units.
//!
//! Gobbling rules for one descriptor, starting after the previous argument:
//! - whitespace is skipped unless the descriptor carries `!`
//! - a comment or paragraph break ends gobbling for the macro
//! - `m` takes a group (its content becomes the argument) or any single node
//! - `s` and `t` take a string equal to `*` or to the token
//! - `o`, `O`, `r`, `R`, `d`, `D` take everything between a string equal to the open mark
//!   and the matching close mark, counting nesting when the marks differ; with brace
//!   marks they take a group instead
//!
//! A descriptor that finds nothing yields an absent argument and leaves the nodes it
//! looked at (including skipped whitespace) in place.

use crate::latex::ast::{Argument, Environment, Node, Root};
use crate::latex::catalog::{Catalog, LATEX2E};
use crate::latex::signature::{ArgSpec, ArgSpecKind, SignatureMap};
use crate::latex::transforms::{Runnable, TransformError};
use crate::latex::walker::{walk_root, TriggerTime, WalkContext, WalkVisitor};
use std::sync::Arc;

/// Where a matched argument sits in the sibling list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Absent,
    /// A group whose content becomes the argument
    Group(usize),
    /// A single node taken whole
    Single(usize),
    /// The nodes strictly between two delimiter strings
    Between(usize, usize),
}

fn find_close(nodes: &[Node], open_index: usize, open: &str, close: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, node) in nodes.iter().enumerate().skip(open_index + 1) {
        if node.is_string(close) {
            if depth == 0 {
                return Some(index);
            }
            depth -= 1;
        } else if open != close && node.is_string(open) {
            depth += 1;
        }
    }
    None
}

/// Match one descriptor at `position`. Returns the capture and the position after it.
fn find_argument(nodes: &[Node], position: usize, spec: &ArgSpec) -> Option<(Capture, usize)> {
    let mut index = position;
    if !spec.no_leading_whitespace {
        while nodes.get(index).is_some_and(Node::is_whitespace) {
            index += 1;
        }
    }
    let node = nodes.get(index)?;
    if node.is_parbreak() || node.is_comment() {
        return None;
    }

    match &spec.kind {
        ArgSpecKind::Mandatory => match node {
            Node::Group { .. } => Some((Capture::Group(index), index + 1)),
            Node::Whitespace => None,
            _ => Some((Capture::Single(index), index + 1)),
        },
        ArgSpecKind::OptionalStar => node
            .is_string("*")
            .then_some((Capture::Single(index), index + 1)),
        ArgSpecKind::OptionalToken { token } => {
            let matches = node
                .as_string()
                .is_some_and(|text| text.chars().eq(std::iter::once(*token)));
            matches.then_some((Capture::Single(index), index + 1))
        }
        ArgSpecKind::Optional { .. } | ArgSpecKind::Delimited { .. } => {
            // Braces were already grouped by the parser
            if spec.open_mark == "{" && spec.close_mark == "}" {
                return matches!(node, Node::Group { .. })
                    .then_some((Capture::Group(index), index + 1));
            }
            if !node.is_string(&spec.open_mark) {
                return None;
            }
            let close = find_close(nodes, index, &spec.open_mark, &spec.close_mark)?;
            Some((Capture::Between(index, close), close + 1))
        }
    }
}

/// A bare mandatory argument is a single character, so `\frac12` reads as `\frac{1}{2}`.
/// Splits a longer string at the candidate position in place.
fn split_leading_char(nodes: &mut Vec<Node>, position: usize, spec: &ArgSpec) {
    let mut index = position;
    if !spec.no_leading_whitespace {
        while nodes.get(index).is_some_and(Node::is_whitespace) {
            index += 1;
        }
    }
    let Some(Node::String { content }) = nodes.get_mut(index) else {
        return;
    };
    let Some((first, rest)) = content
        .char_indices()
        .nth(1)
        .map(|(split, _)| (content[..split].to_string(), content[split..].to_string()))
    else {
        return;
    };
    *content = first;
    nodes.insert(index + 1, Node::string(rest));
}

/// Gobble arguments for `specs` from `nodes`, starting at `start`, removing what was
/// consumed. Always returns one argument per descriptor.
pub fn gobble_arguments(nodes: &mut Vec<Node>, start: usize, specs: &[ArgSpec]) -> Vec<Argument> {
    let mut captures = Vec::with_capacity(specs.len());
    let mut position = start;
    let mut stopped = false;
    for spec in specs {
        let found = if stopped {
            None
        } else {
            if spec.kind == ArgSpecKind::Mandatory {
                split_leading_char(nodes, position, spec);
            }
            find_argument(nodes, position, spec)
        };
        match found {
            Some((capture, next)) => {
                captures.push(capture);
                position = next;
            }
            None => {
                captures.push(Capture::Absent);
                // Nothing may be taken across a comment or paragraph break
                let mut index = position;
                while nodes.get(index).is_some_and(Node::is_whitespace) {
                    index += 1;
                }
                stopped |= nodes
                    .get(index)
                    .is_some_and(|n| n.is_comment() || n.is_parbreak());
            }
        }
    }

    let mut taken: Vec<Option<Node>> = nodes.drain(start..position).map(Some).collect();
    let mut args = Vec::with_capacity(specs.len());
    for (capture, spec) in captures.into_iter().zip(specs) {
        let content = match capture {
            Capture::Absent => {
                args.push(Argument::absent());
                continue;
            }
            Capture::Group(index) => match taken[index - start].take() {
                Some(Node::Group { content }) => content,
                other => other.into_iter().collect(),
            },
            Capture::Single(index) => taken[index - start].take().into_iter().collect(),
            Capture::Between(open, close) => taken[open - start + 1..close - start]
                .iter_mut()
                .filter_map(Option::take)
                .collect(),
        };
        args.push(Argument::new(&spec.open_mark, &spec.close_mark, content));
    }
    args
}

/// Attach arguments to the macros of one sibling list. Macros that already have
/// arguments, or have no signature, are left alone.
pub fn attach_macro_args_in_list(nodes: &mut Vec<Node>, signatures: &SignatureMap) {
    for index in (0..nodes.len()).rev() {
        let signature = match &nodes[index] {
            Node::Macro(m) if m.args.is_none() => signatures.get(&m.name).cloned(),
            _ => None,
        };
        let Some(signature) = signature else {
            continue;
        };
        let args = gobble_arguments(nodes, index + 1, &signature.args);
        if let Some(m) = nodes[index].as_macro_mut() {
            m.args = Some(args);
        }
    }
}

/// Attach arguments to an environment from the start of its body.
pub fn attach_environment_args(env: &mut Environment, signatures: &SignatureMap) {
    if env.args.is_some() {
        return;
    }
    if let Some(signature) = signatures.get(&env.name()) {
        env.args = Some(gobble_arguments(&mut env.content, 0, &signature.args));
    }
}

/// Attach arguments in a sibling list using one map for macros and environments, and
/// return the list.
pub fn attach(nodes: Vec<Node>, signatures: &SignatureMap) -> Vec<Node> {
    let mut root = Root::new(nodes);
    attach_arguments(&mut root, signatures, signatures);
    root.content
}

struct ArgumentAttacher<'a> {
    macros: &'a SignatureMap,
    environments: &'a SignatureMap,
    environments_seen: usize,
    lists: usize,
}

impl WalkVisitor for ArgumentAttacher<'_> {
    fn visit_node(&mut self, node: &mut Node, _context: WalkContext) {
        if let Node::Environment(env) = node {
            attach_environment_args(env, self.environments);
            self.environments_seen += 1;
        }
    }

    fn visit_list(&mut self, nodes: &mut Vec<Node>, _context: WalkContext) {
        attach_macro_args_in_list(nodes, self.macros);
        self.lists += 1;
    }
}

/// Attach arguments throughout the tree, including inside arguments just attached.
pub fn attach_arguments(root: &mut Root, macros: &SignatureMap, environments: &SignatureMap) {
    let mut attacher = ArgumentAttacher {
        macros,
        environments,
        environments_seen: 0,
        lists: 0,
    };
    walk_root(root, &mut attacher, TriggerTime::Early, WalkContext::text());
    tracing::debug!(
        lists = attacher.lists,
        environments = attacher.environments_seen,
        "attached arguments"
    );
}

/// Stage wrapper around [`attach_arguments`].
pub struct AttachArguments {
    catalog: Arc<Catalog>,
}

impl AttachArguments {
    pub fn new() -> Self {
        Self::with_catalog(Arc::clone(&LATEX2E))
    }

    pub fn with_catalog(catalog: Arc<Catalog>) -> Self {
        AttachArguments { catalog }
    }
}

impl Default for AttachArguments {
    fn default() -> Self {
        Self::new()
    }
}

impl Runnable<Root, Root> for AttachArguments {
    fn run(&self, mut root: Root) -> Result<Root, TransformError> {
        attach_arguments(
            &mut root,
            &self.catalog.macro_signatures(),
            &self.catalog.environment_signatures(),
        );
        Ok(root)
    }
}
