//! Sequential pass runner.
//!
//! The engine runs passes in exactly the order given. It does no dependency
//! analysis and keeps no state between passes; the first failing pass aborts
//! the run and leaves the tree as that pass left it.

use crate::passes::{PassId, RewritePass};
use std::fmt;
use tidy_ast::{RewriteError, SyntaxTree};
use tracing::{debug, info_span};

/// A pass failed; the run stopped there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineError {
    pub pass: &'static str,
    pub error: RewriteError,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pass `{}` failed: {}", self.pass, self.error)
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// An ordered list of passes.
#[derive(Default)]
pub struct RuleEngine {
    passes: Vec<Box<dyn RewritePass>>,
}

impl RuleEngine {
    pub fn new() -> RuleEngine {
        RuleEngine::default()
    }

    /// Engine running the identified passes in the given order.
    pub fn from_ids(ids: &[PassId]) -> RuleEngine {
        RuleEngine {
            passes: ids.iter().map(|id| id.pass()).collect(),
        }
    }

    #[must_use]
    pub fn with_pass<P: RewritePass + 'static>(mut self, pass: P) -> RuleEngine {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Run every pass over `tree` in order.
    pub fn run(&self, tree: &mut SyntaxTree) -> Result<(), PipelineError> {
        for pass in &self.passes {
            let name = pass.name();
            let _span = info_span!("pass", name).entered();
            let applied = pass.run(tree).map_err(|error| PipelineError { pass: name, error })?;
            debug!(applied, live_nodes = tree.live_node_count(), "pass finished");
        }
        Ok(())
    }
}
