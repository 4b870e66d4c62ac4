//! Check orchestration
//!
//! Ties the tree builder, path finder and path evaluator together.

pub mod decision;

pub use decision::CheckDecision;

use crate::cache::{CacheStats, TreeCache};
use crate::error::Result;
use crate::evaluator::{evaluate_path, PathOutcome};
use crate::path::{find_paths, sort_paths};
use crate::rule::{Params, Rule};
use crate::tree::{build_tree, Node};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Engine configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Keep verifying a path past an unconditional node that has children
    pub check_full_path: bool,

    /// Build each role's tree once and reuse it for the engine's lifetime
    pub cache_trees: bool,
}

impl EngineConfig {
    pub fn with_check_full_path(mut self, check_full_path: bool) -> Self {
        self.check_full_path = check_full_path;
        self
    }

    pub fn with_cache_trees(mut self, cache_trees: bool) -> Self {
        self.cache_trees = cache_trees;
        self
    }
}

/// Permission resolution engine
///
/// # Pipeline
///
/// ```text
/// role → build_tree ─→ find_paths → sort (shortest first) → evaluate_path × N → bool
///            ↕
///       [TreeCache]
/// ```
///
/// Paths are evaluated one at a time. The first passing path grants access and
/// stops the check; a failing path moves on to the next; a condition error
/// aborts the whole check, leaving later paths untried.
///
/// Cloning is cheap and clones share the rule set and tree cache.
#[derive(Debug, Clone)]
pub struct RbacEngine {
    /// Immutable rule set
    rules: Arc<[Rule]>,

    /// Tree cache, present when `cache_trees` is enabled
    cache: Option<Arc<TreeCache>>,

    /// Engine configuration
    config: EngineConfig,
}

impl RbacEngine {
    /// Create an engine over `rules`
    pub fn new(rules: Vec<Rule>, config: EngineConfig) -> Self {
        let cache = config.cache_trees.then(|| Arc::new(TreeCache::new()));

        info!(
            "RbacEngine initialized with {} rules, check_full_path={}, cache_trees={}",
            rules.len(),
            config.check_full_path,
            config.cache_trees
        );

        Self {
            rules: rules.into(),
            cache,
            config,
        }
    }

    /// Create an engine with the default configuration
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self::new(rules, EngineConfig::default())
    }

    /// Check `permission` for `role` with empty parameters
    pub async fn check(&self, role: &str, permission: &str) -> Result<bool> {
        self.check_with_params(role, permission, &Params::new()).await
    }

    /// Check `permission` for `role`, handing `params` to every condition
    ///
    /// # Errors
    ///
    /// - [`RbacError::Condition`](crate::RbacError::Condition) when a condition
    ///   errors; no further paths are tried.
    /// - [`RbacError::CircularRule`](crate::RbacError::CircularRule) when the
    ///   rules reachable from `role` form a cycle.
    pub async fn check_with_params(&self, role: &str, permission: &str, params: &Params) -> Result<bool> {
        Ok(self.check_detailed(role, permission, params).await?.allowed)
    }

    /// Check and report which path, if any, granted access
    pub async fn check_detailed(
        &self,
        role: &str,
        permission: &str,
        params: &Params,
    ) -> Result<CheckDecision> {
        let tree = self.tree(role)?;

        let mut paths = find_paths(&tree, permission);
        sort_paths(&mut paths);
        let paths_found = paths.len();

        debug!(
            "Check: role={}, permission={}, {} candidate paths",
            role, permission, paths_found
        );

        for (index, path) in paths.iter().enumerate() {
            debug!("Testing path: {}", path);

            match evaluate_path(path, params, self.config.check_full_path).await? {
                PathOutcome::Pass => {
                    debug!("Granted '{}' to '{}' via {}", permission, role, path);
                    let granted_by = path.values().into_iter().map(String::from).collect();
                    return Ok(CheckDecision::allow(
                        role,
                        permission,
                        granted_by,
                        paths_found,
                        index + 1,
                    ));
                }
                PathOutcome::Fail => continue,
            }
        }

        debug!("Denied '{}' to '{}'", permission, role);
        Ok(CheckDecision::deny(role, permission, paths_found, paths_found))
    }

    /// Implication tree for `role`, from the cache when enabled
    pub fn tree(&self, role: &str) -> Result<Arc<Node>> {
        match &self.cache {
            Some(cache) => cache.get_or_build(role, &self.rules),
            None => build_tree(role, &self.rules).map(Arc::new),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tree cache statistics, `None` when caching is disabled
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| cache.stats())
    }
}
