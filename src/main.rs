mod git;
mod glyphs;
mod graph;
mod log;
mod palette;
mod render;

#[cfg(test)]
mod test_helpers;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use colored::control;

#[derive(Parser)]
#[command(
    name = "git-railway",
    about = "Render commit history as a railroad graph",
    version
)]
struct Cli {
    /// Revision or range to walk (defaults to HEAD)
    revision: Option<String>,

    /// Walk all refs: branches, remotes, and tags
    #[arg(long)]
    all: bool,

    /// Limit the number of commits shown
    #[arg(short = 'n', long = "max-count", value_name = "N")]
    max_count: Option<usize>,

    /// Show boundary commits at the edge of the range
    #[arg(long)]
    boundary: bool,

    /// Use rounded corners and distinct commit markers
    #[arg(long)]
    rounded: bool,

    /// Write the log to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color
        || std::env::var_os("NO_COLOR").is_some()
        || std::env::var_os("TERM").is_some_and(|v| v == "dumb")
        || !std::io::stdout().is_terminal()
    {
        control::set_override(false);
    }

    let result = log::run(log::LogOptions {
        revision: cli.revision,
        all: cli.all,
        max_count: cli.max_count,
        boundary: cli.boundary,
        rounded: cli.rounded,
        output: cli.output,
    });

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
