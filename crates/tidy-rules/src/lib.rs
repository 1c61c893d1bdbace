//! Cleanup rules for generated syntax trees.
//!
//! - [`BindingIndex`]: flat name to binding-site map
//! - [`UsageAnalyzer`]: line-based liveness of declared names
//! - [`passes`]: `constToLet`, `stripUnusedAwaits`, `stripUnused`,
//!   `returnLastDeclaration` and the `asyncify` placeholder
//! - [`RuleEngine`]: runs an ordered pass list over a tree

pub mod binding;
pub use binding::{BindingIndex, BindingKey, BindingSite, ScopeId, SiteKind};

pub mod usage;
pub use usage::{UsageAnalyzer, UsageReport};

pub mod terminal;
pub use terminal::TerminalReference;

pub mod passes;
pub use passes::{ParsePassIdError, PassId, RewritePass};

pub mod engine;
pub use engine::{PipelineError, RuleEngine};

#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
mod test_fixtures;

#[cfg(test)]
#[path = "../tests/binding_tests.rs"]
mod binding_tests;
#[cfg(test)]
#[path = "../tests/usage_tests.rs"]
mod usage_tests;
#[cfg(test)]
#[path = "../tests/const_to_let_tests.rs"]
mod const_to_let_tests;
#[cfg(test)]
#[path = "../tests/strip_unused_awaits_tests.rs"]
mod strip_unused_awaits_tests;
#[cfg(test)]
#[path = "../tests/strip_unused_tests.rs"]
mod strip_unused_tests;
#[cfg(test)]
#[path = "../tests/return_last_declaration_tests.rs"]
mod return_last_declaration_tests;
#[cfg(test)]
#[path = "../tests/engine_tests.rs"]
mod engine_tests;
