//! CLI argument parsing using clap.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "rfpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print pruned directories and skipped files to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
