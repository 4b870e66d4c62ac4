//! Implication tree built from a role and the rule set
//!
//! Every rule whose actor equals a node's value contributes one child, in rule
//! set order. Identifiers may repeat across branches (diamonds are legal); an
//! identifier reappearing on its own ancestor chain is a cycle and aborts the
//! build with [`RbacError::CircularRule`].

use crate::error::{RbacError, Result};
use crate::rule::{Condition, Rule};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Tree node: a role or permission reached through one rule
#[derive(Clone)]
pub struct Node {
    /// Role or permission identifier
    pub value: String,

    /// Condition of the rule that produced this node (always `None` at the root)
    pub condition: Option<Arc<dyn Condition>>,

    /// Nodes implied by `value`, in rule set order
    pub children: Vec<Node>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    /// Number of nodes in this subtree, including `self`
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }

    fn render(&self, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}- {}{}",
            "\t".repeat(depth),
            self.value,
            if self.is_conditional() { "*" } else { "" }
        )?;
        for child in &self.children {
            child.render(depth + 1, f)?;
        }
        Ok(())
    }
}

/// Structural equality: same values, same condition handles, same shape
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let same_condition = match (&self.condition, &other.condition) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };

        self.value == other.value && same_condition && self.children == other.children
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("conditional", &self.is_conditional())
            .field("children", &self.children)
            .finish()
    }
}

/// One line per node, tab-indented by depth; `*` marks conditional nodes
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(0, f)
    }
}

/// Build the implication tree rooted at `role`
///
/// Pure in `(role, rules)`: identical inputs always give structurally equal
/// trees.
///
/// # Errors
///
/// Returns [`RbacError::CircularRule`] if following the rules from `role`
/// revisits an identifier already on the current chain.
pub fn build_tree(role: &str, rules: &[Rule]) -> Result<Node> {
    let mut chain = vec![role];
    let children = build_children(role, rules, &mut chain)?;

    let root = Node {
        value: role.to_string(),
        condition: None,
        children,
    };

    debug!("Built tree for role '{}' ({} nodes)", role, root.size());
    Ok(root)
}

fn build_children<'a>(
    value: &'a str,
    rules: &'a [Rule],
    chain: &mut Vec<&'a str>,
) -> Result<Vec<Node>> {
    let mut children = Vec::new();

    for rule in rules.iter().filter(|rule| rule.actor == value) {
        let target = rule.target.as_str();

        if let Some(start) = chain.iter().position(|seen| *seen == target) {
            let cycle = chain[start..]
                .iter()
                .chain(std::iter::once(&target))
                .copied()
                .collect::<Vec<_>>()
                .join(" -> ");
            warn!("Circular rule chain detected: {}", cycle);
            return Err(RbacError::CircularRule(cycle));
        }

        chain.push(target);
        let grandchildren = build_children(target, rules, chain)?;
        chain.pop();

        children.push(Node {
            value: rule.target.clone(),
            condition: rule.condition.clone(),
            children: grandchildren,
        });
    }

    Ok(children)
}
