use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "objdiff",
    about = "Diff two files containing either JSON or YAML objects.",
    version
)]
pub struct Cli {
    pub file1: PathBuf,
    pub file2: PathBuf,

    /// Enable color output (default)
    #[arg(long, overrides_with = "no_color")]
    pub color: bool,

    /// Disable color output
    #[arg(long = "no-color")]
    pub no_color: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Whether changed lines should be colored.
    pub fn use_color(&self) -> bool {
        !self.no_color
    }
}
