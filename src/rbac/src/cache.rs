//! Per-role tree cache
//!
//! Trees are retained for the lifetime of the cache. There is no invalidation:
//! the rule set is fixed when the engine is built, so a cached tree never goes
//! stale.

use crate::error::Result;
use crate::rule::{RoleId, Rule};
use crate::tree::{build_tree, Node};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that built a tree
    pub misses: u64,
    /// Roles currently cached
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe cache of built trees keyed by role
///
/// Each role is built at most once: a miss builds under the map entry's lock,
/// so concurrent lookups for the same role wait for that single build.
#[derive(Debug, Default)]
pub struct TreeCache {
    trees: DashMap<RoleId, Arc<Node>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TreeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached tree for `role`, building it from `rules` on first use
    ///
    /// # Errors
    ///
    /// Propagates build errors (cyclic rules); nothing is cached in that case.
    pub fn get_or_build(&self, role: &str, rules: &[Rule]) -> Result<Arc<Node>> {
        if let Some(tree) = self.trees.get(role) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Tree cache hit for role '{}'", role);
            return Ok(Arc::clone(tree.value()));
        }

        let mut built = false;
        let tree = {
            let entry = self
                .trees
                .entry(role.to_string())
                .or_try_insert_with(|| {
                    built = true;
                    build_tree(role, rules).map(Arc::new)
                })?;
            Arc::clone(entry.value())
        };

        if built {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!("Tree cache miss for role '{}', tree stored", role);
        } else {
            // Another caller finished the build while we waited on the entry
            self.hits.fetch_add(1, Ordering::Relaxed);
        }

        Ok(tree)
    }

    /// Cached tree for `role`, if one has been built
    pub fn get(&self, role: &str) -> Option<Arc<Node>> {
        self.trees.get(role).map(|tree| Arc::clone(tree.value()))
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.trees.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RbacError;

    fn rules() -> Vec<Rule> {
        vec![
            Rule::new("admin", "user"),
            Rule::new("user", "read"),
            Rule::new("loop_a", "loop_b"),
            Rule::new("loop_b", "loop_a"),
        ]
    }

    #[test]
    fn test_builds_once_per_role() {
        let cache = TreeCache::new();
        let rules = rules();

        let first = cache.get_or_build("admin", &rules).unwrap();
        let second = cache.get_or_build("admin", &rules).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1, entries: 1 });
        assert_eq!(cache.stats().hit_rate(), 0.5);
    }

    #[test]
    fn test_roles_cached_independently() {
        let cache = TreeCache::new();
        let rules = rules();

        let admin = cache.get_or_build("admin", &rules).unwrap();
        let user = cache.get_or_build("user", &rules).unwrap();

        assert_eq!(admin.value, "admin");
        assert_eq!(user.value, "user");
        assert_eq!(cache.len(), 2);
        assert!(cache.get("visitor").is_none());
    }

    #[test]
    fn test_cached_tree_matches_fresh_build() {
        let cache = TreeCache::new();
        let rules = rules();

        let cached = cache.get_or_build("admin", &rules).unwrap();
        assert_eq!(*cached, build_tree("admin", &rules).unwrap());
    }

    #[test]
    fn test_failed_build_not_cached() {
        let cache = TreeCache::new();
        let rules = rules();

        let result = cache.get_or_build("loop_a", &rules);

        assert!(matches!(result, Err(RbacError::CircularRule(_))));
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn test_concurrent_lookups_share_one_tree() {
        let cache = Arc::new(TreeCache::new());
        let rules = Arc::new(rules());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let rules = Arc::clone(&rules);
                std::thread::spawn(move || cache.get_or_build("admin", &rules).unwrap())
            })
            .collect();

        let trees: Vec<Arc<Node>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(trees.iter().all(|tree| Arc::ptr_eq(tree, &trees[0])));
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 7);
    }
}
