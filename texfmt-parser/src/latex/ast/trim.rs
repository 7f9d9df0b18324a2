//! Trimming of whitespace and paragraph breaks at list boundaries.

use super::node::Node;

/// Removes leading whitespace and paragraph breaks. Returns how many nodes were removed.
pub fn trim_start(nodes: &mut Vec<Node>) -> usize {
    let count = nodes.iter().take_while(|n| n.is_space()).count();
    nodes.drain(..count);
    count
}

/// Removes trailing whitespace and paragraph breaks. Returns how many nodes were removed.
///
/// A comment left at the end no longer has a paragraph break after it.
pub fn trim_end(nodes: &mut Vec<Node>) -> usize {
    let count = nodes.iter().rev().take_while(|n| n.is_space()).count();
    nodes.truncate(nodes.len() - count);
    if count > 0 {
        if let Some(Node::Comment(comment)) = nodes.last_mut() {
            comment.suffix_parbreak = false;
        }
    }
    count
}

pub fn trim(nodes: &mut Vec<Node>) -> usize {
    trim_start(nodes) + trim_end(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_both_ends() {
        let mut nodes = vec![
            Node::Whitespace,
            Node::Parbreak,
            Node::string("a"),
            Node::Whitespace,
            Node::string("b"),
            Node::Parbreak,
        ];
        assert_eq!(trim(&mut nodes), 3);
        assert_eq!(
            nodes,
            vec![Node::string("a"), Node::Whitespace, Node::string("b")]
        );
    }

    #[test]
    fn test_trim_all_space() {
        let mut nodes = vec![Node::Whitespace, Node::Parbreak];
        trim(&mut nodes);
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_trimmed_parbreak_clears_comment_flag() {
        let mut nodes = vec![
            Node::Comment(super::super::node::Comment {
                content: "x".into(),
                suffix_parbreak: true,
                ..Default::default()
            }),
            Node::Parbreak,
        ];
        trim_end(&mut nodes);
        assert!(!nodes[0].as_comment().unwrap().suffix_parbreak);
    }

    #[test]
    fn test_trim_keeps_comments() {
        let mut nodes = vec![Node::comment("x"), Node::Whitespace];
        trim_end(&mut nodes);
        assert_eq!(nodes, vec![Node::comment("x")]);
    }
}
