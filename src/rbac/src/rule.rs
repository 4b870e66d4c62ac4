//! Rule set vocabulary: roles, permissions, implications and their conditions

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Unique role identifier
pub type RoleId = String;

/// Unique permission identifier
pub type PermissionId = String;

/// Request-specific parameters handed to every condition
pub type Params = HashMap<String, serde_json::Value>;

/// Runtime predicate gating an implication.
///
/// Implementations may perform I/O. The engine never runs two conditions of
/// the same check concurrently and imposes no timeout of its own.
#[async_trait]
pub trait Condition: Send + Sync {
    /// Decide whether the implication holds for these parameters
    async fn evaluate(&self, params: &Params) -> anyhow::Result<bool>;
}

/// Adapter turning an async closure into a [`Condition`]
pub struct FnCondition<F> {
    func: F,
}

impl<F> FnCondition<F> {
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F, Fut> Condition for FnCondition<F>
where
    F: Fn(Params) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
{
    async fn evaluate(&self, params: &Params) -> anyhow::Result<bool> {
        (self.func)(params.clone()).await
    }
}

/// Implication `actor -> target`, optionally gated by a condition
#[derive(Clone)]
pub struct Rule {
    /// Role holding the implication
    pub actor: RoleId,

    /// Role or permission implied by `actor`
    pub target: String,

    /// Gate evaluated at check time; `None` means unconditional
    pub condition: Option<Arc<dyn Condition>>,
}

impl Rule {
    /// Create an unconditional rule
    pub fn new(actor: impl Into<RoleId>, target: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            target: target.into(),
            condition: None,
        }
    }

    /// Gate the rule with an async closure
    ///
    /// ```rust
    /// use cretoai_rbac::Rule;
    /// use serde_json::json;
    ///
    /// let rule = Rule::new("user", "article editor")
    ///     .when(|params| async move { anyhow::Ok(params.get("userId") == Some(&json!(2))) });
    /// assert!(rule.is_conditional());
    /// ```
    pub fn when<F, Fut>(self, func: F) -> Self
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
    {
        self.with_condition(Arc::new(FnCondition::new(func)))
    }

    /// Gate the rule with an existing condition (shareable across rules)
    pub fn with_condition(mut self, condition: Arc<dyn Condition>) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("actor", &self.actor)
            .field("target", &self.target)
            .field("conditional", &self.is_conditional())
            .finish()
    }
}
