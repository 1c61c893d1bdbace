//! Read a serialized tree, run the configured passes, write it back.

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

use tidy_ast::SyntaxTree;
use tidy_rules::{PassId, RuleEngine};

use crate::args::CliArgs;
use crate::config::{resolve_config, resolve_passes};

/// Deserialize a tree and rebuild its parent links.
pub fn parse_tree(source: &str) -> Result<SyntaxTree> {
    let mut tree: SyntaxTree =
        serde_json::from_str(source).context("failed to parse syntax tree JSON")?;
    tree.relink().context("malformed syntax tree")?;
    Ok(tree)
}

pub fn render_tree(tree: &SyntaxTree, pretty: bool) -> Result<String> {
    let mut text = if pretty {
        serde_json::to_string_pretty(tree)
    } else {
        serde_json::to_string(tree)
    }
    .context("failed to serialize syntax tree")?;
    text.push('\n');
    Ok(text)
}

/// Run `passes` over the tree in `source` and return the rewritten JSON.
pub fn process(source: &str, passes: &[PassId], pretty: bool) -> Result<String> {
    let mut tree = parse_tree(source)?;
    let engine = RuleEngine::from_ids(passes);
    debug!(passes = ?engine.pass_names(), nodes = tree.arena.len(), "running passes");
    engine.run(&mut tree)?;
    render_tree(&tree, pretty)
}

fn read_input(args: &CliArgs) -> Result<String> {
    if args.reads_stdin() {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read syntax tree from stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read syntax tree: {}", args.input.display()))
}

fn write_output<W: Write>(path: Option<&Path>, text: &str, stdout: &mut W) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write output: {}", path.display())),
        None => {
            stdout
                .write_all(text.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")
        }
    }
}

/// One pass name per line, in run order.
pub fn pass_listing(passes: &[PassId]) -> String {
    let mut listing = String::new();
    for id in passes {
        listing.push_str(id.as_str());
        listing.push('\n');
    }
    listing
}

pub fn run(args: &CliArgs, cwd: &Path) -> Result<()> {
    run_with_stdout(args, cwd, &mut std::io::stdout().lock())
}

/// Like [`run`], with output that has no `--output` path going to `stdout`.
pub fn run_with_stdout<W: Write>(args: &CliArgs, cwd: &Path, stdout: &mut W) -> Result<()> {
    let config = resolve_config(args.config.as_deref(), cwd)?;
    let passes = resolve_passes(&args.passes, &config);

    if args.list_passes {
        return write_output(None, &pass_listing(&passes), stdout);
    }

    let source = read_input(args)?;
    let output = process(&source, &passes, args.pretty)?;
    write_output(args.output.as_deref(), &output, stdout)?;
    info!(passes = passes.len(), "tree rewritten");
    Ok(())
}
