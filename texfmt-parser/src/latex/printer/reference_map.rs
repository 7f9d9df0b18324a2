//! Reference map
//!
//! A side table built in one pass before construction starts. Every node reachable
//! from the root gets an arena slot holding its siblings, the math mode it is printed
//! in, and a cache for its rendered fill parts. Slots are keyed by node address, which
//! is stable while the tree is borrowed.

use crate::latex::ast::{Node, Root};
use crate::latex::printer::doc::Doc;
use crate::latex::walker::WalkContext;
use std::collections::HashMap;

#[derive(Debug)]
struct Entry<'a> {
    previous: Option<&'a Node>,
    next: Option<&'a Node>,
    context: WalkContext,
    rendered: Option<Vec<Doc>>,
}

#[derive(Debug, Default)]
pub struct ReferenceMap<'a> {
    slots: HashMap<*const Node, usize>,
    entries: Vec<Entry<'a>>,
}

impl<'a> ReferenceMap<'a> {
    pub fn new(root: &'a Root) -> Self {
        let mut map = ReferenceMap::default();
        map.add_list(&root.content, WalkContext::text());
        map
    }

    fn add_list(&mut self, nodes: &'a [Node], context: WalkContext) {
        for (index, node) in nodes.iter().enumerate() {
            let previous = index.checked_sub(1).map(|i| &nodes[i]);
            self.add(node, previous, nodes.get(index + 1), context);
        }
    }

    fn add(
        &mut self,
        node: &'a Node,
        previous: Option<&'a Node>,
        next: Option<&'a Node>,
        context: WalkContext,
    ) {
        self.slots.insert(node as *const Node, self.entries.len());
        self.entries.push(Entry {
            previous,
            next,
            context,
            rendered: None,
        });

        let inner = context.for_children_of(node);
        match node {
            Node::Macro(m) => {
                for arg in m.args.iter().flatten() {
                    self.add_list(&arg.content, inner);
                }
            }
            Node::Environment(env) => {
                self.add_list(&env.content, inner);
                for arg in env.args.iter().flatten() {
                    self.add_list(&arg.content, inner);
                }
            }
            Node::Math(math) => self.add_list(&math.content, inner),
            Node::Group { content } => self.add_list(content, inner),
            Node::Argument(arg) => self.add_list(&arg.content, inner),
            Node::Subscript(script) | Node::Superscript(script) => {
                self.add(&script.content, None, None, inner)
            }
            Node::String { .. }
            | Node::Whitespace
            | Node::Parbreak
            | Node::Comment(_)
            | Node::Verbatim(_) => {}
        }
    }

    fn entry(&self, node: &Node) -> Option<&Entry<'a>> {
        self.slots
            .get(&(node as *const Node))
            .map(|&slot| &self.entries[slot])
    }

    pub fn previous(&self, node: &Node) -> Option<&'a Node> {
        self.entry(node).and_then(|entry| entry.previous)
    }

    pub fn next(&self, node: &Node) -> Option<&'a Node> {
        self.entry(node).and_then(|entry| entry.next)
    }

    /// The mode `node` is printed in. Nodes outside the map are treated as text.
    pub fn context(&self, node: &Node) -> WalkContext {
        self.entry(node)
            .map_or_else(WalkContext::text, |entry| entry.context)
    }

    pub fn rendered(&self, node: &Node) -> Option<&[Doc]> {
        self.entry(node).and_then(|entry| entry.rendered.as_deref())
    }

    pub fn store_rendered(&mut self, node: &Node, parts: Vec<Doc>) {
        if let Some(&slot) = self.slots.get(&(node as *const Node)) {
            self.entries[slot].rendered = Some(parts);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
