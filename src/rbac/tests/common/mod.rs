//! Shared fixtures for the integration tests

#![allow(dead_code)]

use cretoai_rbac::{Params, Rule};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Common test result type
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Install a test-writer subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Article publishing rule set
pub fn article_rules() -> Vec<Rule> {
    vec![
        Rule::new("visitor", "read articles"),
        Rule::new("user", "vote on articles"),
        Rule::new("article editor", "edit article"),
        Rule::new("user", "article editor")
            .when(|params| async move { anyhow::Ok(params.get("userId") == Some(&json!(2))) }),
        Rule::new("admin", "user"),
        Rule::new("admin", "article editor"),
        Rule::new("superadmin", "delete user"),
        Rule::new("superadmin", "admin"),
        Rule::new("user", "visitor"),
        Rule::new("user", "read articles"),
    ]
}

pub fn params(pairs: &[(&str, serde_json::Value)]) -> Params {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// Records the order in which conditions run
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule whose condition logs `name` and resolves to `result`
    pub fn rule(&self, actor: &str, target: &str, name: &str, result: bool) -> Rule {
        let calls = Arc::clone(&self.calls);
        let name = name.to_string();
        Rule::new(actor, target).when(move |_| {
            calls.lock().unwrap().push(name.clone());
            futures::future::ready(anyhow::Ok(result))
        })
    }

    /// Rule whose condition logs `name` and errors
    pub fn failing_rule(&self, actor: &str, target: &str, name: &str) -> Rule {
        let calls = Arc::clone(&self.calls);
        let name = name.to_string();
        Rule::new(actor, target).when(move |_| {
            calls.lock().unwrap().push(name.clone());
            futures::future::ready(Err::<bool, _>(anyhow::Error::new(StoreUnavailable)))
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

/// Error raised by conditions backed by an unreachable store
#[derive(Debug, thiserror::Error)]
#[error("permission store unavailable")]
pub struct StoreUnavailable;

/// Counts condition evaluations
pub fn counting_rule(actor: &str, target: &str, counter: &Arc<AtomicUsize>) -> Rule {
    let counter = Arc::clone(counter);
    Rule::new(actor, target).when(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        futures::future::ready(anyhow::Ok(true))
    })
}
