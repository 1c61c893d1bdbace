use clap::Parser;
use std::path::PathBuf;

use tidy_rules::PassId;

/// CLI arguments for the tidy binary.
#[derive(Parser, Debug)]
#[command(
    name = "tidy",
    version,
    about = "Run cleanup passes over a JSON-serialized syntax tree"
)]
pub struct CliArgs {
    /// Serialized tree to read, or `-` for stdin.
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Where to write the rewritten tree (stdout when omitted).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Path to a tidy.json configuration file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Pass to run; repeat to build an ordered list. Overrides the config file.
    #[arg(short = 'p', long = "pass", value_name = "PASS")]
    pub passes: Vec<PassId>,

    /// Indent the JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Print the resolved pass list and exit.
    #[arg(long = "listPasses", alias = "list-passes")]
    pub list_passes: bool,
}

impl CliArgs {
    /// Whether the tree is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}
