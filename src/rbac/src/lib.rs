//! # CretoAI RBAC Engine
//!
//! Decides whether a role grants a permission, given a flat set of
//! `actor -> target` implication rules, some of them gated by async
//! conditions evaluated against request parameters.
//!
//! ## How a check runs
//!
//! 1. Build the implication tree for the role (optionally cached per role)
//! 2. Find every root-to-permission path
//! 3. Sort paths shortest first
//! 4. Walk paths one at a time; the first passing path grants access
//!
//! ## Example
//!
//! ```rust
//! use cretoai_rbac::{Params, RbacEngine, Rule};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = RbacEngine::with_rules(vec![
//!     Rule::new("admin", "user"),
//!     Rule::new("user", "read articles"),
//!     Rule::new("article editor", "edit article"),
//!     Rule::new("user", "article editor")
//!         .when(|params| async move { anyhow::Ok(params.get("userId") == Some(&json!(2))) }),
//! ]);
//!
//! assert!(engine.check("admin", "read articles").await?);
//! assert!(!engine.check("user", "edit article").await?);
//!
//! let mut params = Params::new();
//! params.insert("userId".to_string(), json!(2));
//! assert!(engine.check_with_params("user", "edit article", &params).await?);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod path;
pub mod rule;
pub mod tree;

// Re-export commonly used types
pub use cache::{CacheStats, TreeCache};
pub use engine::{CheckDecision, EngineConfig, RbacEngine};
pub use error::{RbacError, Result};
pub use evaluator::{evaluate_path, PathOutcome};
pub use path::{find_paths, sort_paths, Path};
pub use rule::{Condition, FnCondition, Params, PermissionId, RoleId, Rule};
pub use tree::{build_tree, Node};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
