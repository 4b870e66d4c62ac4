//! Root-to-permission paths through an implication tree

use crate::tree::Node;
use std::fmt;

/// Ordered chain of nodes from the tree root to a node matching the permission
#[derive(Debug, Clone, PartialEq)]
pub struct Path<'a> {
    nodes: Vec<&'a Node>,
}

impl<'a> Path<'a> {
    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[&'a Node] {
        &self.nodes
    }

    /// Node values from root to target
    pub fn values(&self) -> Vec<&'a str> {
        self.nodes.iter().map(|node| node.value.as_str()).collect()
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " --> ")?;
            }
            write!(f, "{}", node.value)?;
            if node.is_conditional() {
                write!(f, "*")?;
            }
        }
        Ok(())
    }
}

/// Find every path from `root` to a node whose value is `permission`
///
/// Paths come back in depth-first discovery order. Descent stops at a match,
/// so a matching node's own subtree is never searched.
pub fn find_paths<'a>(root: &'a Node, permission: &str) -> Vec<Path<'a>> {
    let mut paths = Vec::new();
    let mut prefix = Vec::new();
    collect(root, permission, &mut prefix, &mut paths);
    paths
}

fn collect<'a>(
    node: &'a Node,
    permission: &str,
    prefix: &mut Vec<&'a Node>,
    paths: &mut Vec<Path<'a>>,
) {
    prefix.push(node);

    if node.value == permission {
        paths.push(Path {
            nodes: prefix.clone(),
        });
    } else {
        for child in &node.children {
            collect(child, permission, prefix, paths);
        }
    }

    prefix.pop();
}

/// Order paths shortest first; equal lengths keep discovery order
pub fn sort_paths(paths: &mut [Path<'_>]) {
    paths.sort_by_key(Path::len);
}
