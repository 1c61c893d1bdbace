use super::RewritePass;
use tidy_ast::{RewriteError, SyntaxTree};
use tracing::debug;

/// Placeholder for marking functions that contain `await` as async.
///
/// The propagation rules are not settled, so this pass accepts any tree and
/// leaves it unchanged.
pub struct Asyncify;

impl RewritePass for Asyncify {
    fn name(&self) -> &'static str {
        "asyncify"
    }

    fn run(&self, _tree: &mut SyntaxTree) -> Result<usize, RewriteError> {
        debug!("asyncify is a stub; tree left unchanged");
        Ok(0)
    }
}
