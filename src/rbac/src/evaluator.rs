//! Walks a single path, resolving conditions in order

use crate::error::{RbacError, Result};
use crate::path::Path;
use crate::rule::Params;
use tracing::{debug, warn};

/// Verdict for one path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOutcome {
    /// The path grants the permission
    Pass,
    /// A condition on the path resolved to false
    Fail,
}

/// Evaluate `path` starting at the first node after the root
///
/// - An unconditional node passes immediately unless `check_full_path` is set
///   and the node has children, in which case the walk continues.
/// - A conditional node is awaited; `true` advances, `false` fails the path.
/// - Walking past the last node passes.
///
/// Conditions run one at a time, in path order.
///
/// # Errors
///
/// Returns [`RbacError::Condition`] as soon as a condition errors; the
/// remaining nodes are not evaluated.
pub async fn evaluate_path(path: &Path<'_>, params: &Params, check_full_path: bool) -> Result<PathOutcome> {
    let nodes = path.nodes();
    let mut index = 1;

    while index < nodes.len() {
        let node = nodes[index];

        match &node.condition {
            None if !check_full_path || node.is_leaf() => {
                debug!("'{}' is unconditional, path granted", node.value);
                return Ok(PathOutcome::Pass);
            }
            None => {}
            Some(condition) => match condition.evaluate(params).await {
                Ok(true) => {
                    debug!("Condition on '{}' passed", node.value);
                }
                Ok(false) => {
                    debug!("Condition on '{}' failed, path discarded", node.value);
                    return Ok(PathOutcome::Fail);
                }
                Err(e) => {
                    warn!("Condition on '{}' errored: {}", node.value, e);
                    return Err(RbacError::Condition(e));
                }
            },
        }

        index += 1;
    }

    Ok(PathOutcome::Pass)
}
