use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::control;

use crate::git::{self, WalkOptions};
use crate::glyphs::GlyphSet;
use crate::render;

/// Options for the log view, straight from the command line.
#[derive(Default)]
pub struct LogOptions {
    pub revision: Option<String>,
    pub all: bool,
    pub max_count: Option<usize>,
    pub boundary: bool,
    pub rounded: bool,
    pub output: Option<PathBuf>,
}

/// Render the requested slice of history and print it, or write it to a
/// file when an output path is given.
pub fn run(mut opts: LogOptions) -> Result<()> {
    let repo = git::open_repo()?;
    let output = opts.output.take();

    // Files get plain text, never escape codes.
    if output.is_some() {
        control::set_override(false);
    }

    let rendered = render_repo(&repo, opts)?;

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Walk the repository and render it to a string.
fn render_repo(repo: &git2::Repository, opts: LogOptions) -> Result<String> {
    let records = git::walk_history(
        repo,
        &WalkOptions {
            revision: opts.revision,
            all: opts.all,
            max_count: opts.max_count,
            boundary: opts.boundary,
        },
    )?;

    let glyph_set = if opts.rounded {
        GlyphSet::Rounded
    } else {
        GlyphSet::Box
    };

    Ok(render::render_log(&records, glyph_set))
}

#[cfg(test)]
#[path = "log_test.rs"]
mod tests;
