use std::fmt::Write;

use colored::{Color, Colorize};

use crate::git::CommitRecord;
use crate::glyphs::GlyphSet;
use crate::graph::{Graph, Symbol};

// ── Color palette (edit these to change the theme) ──────────────────────

/// Abbreviated commit hashes.
const COLOR_HASH: Color = Color::Yellow;
/// Author dates.
const COLOR_DATE: Color = Color::AnsiColor(240);
/// Author names.
const COLOR_AUTHOR: Color = Color::AnsiColor(245);
/// Commit message subjects.
const COLOR_MESSAGE: Color = Color::AnsiColor(248);
/// Local branch decorations in brackets.
const COLOR_BRANCH: Color = Color::Green;
/// Remote branch decorations in braces.
const COLOR_REMOTE: Color = Color::Red;
/// Tag decorations in angle brackets.
const COLOR_TAG: Color = Color::Cyan;

/// Rotating colors for graph lanes. One entry per lane color slot; a
/// symbol's color index picks the entry.
const LANE_COLORS: &[Color] = &[
    Color::Yellow,
    Color::Cyan,
    Color::Magenta,
    Color::Blue,
    Color::Red,
    Color::Green,
    Color::BrightYellow,
    Color::BrightCyan,
    Color::BrightMagenta,
    Color::BrightBlue,
    Color::BrightRed,
    Color::BrightGreen,
    Color::White,
    Color::BrightBlack,
];

/// Widest author column the layout will reserve.
const MAX_AUTHOR_WIDTH: usize = 40;

// ── Public API ──────────────────────────────────────────────────────────

/// Render the commit records as one line each: hash, date, author, lane
/// graph, decorations, and subject. Records must arrive in topological
/// order (children before parents).
pub fn render_log(records: &[CommitRecord], glyph_set: GlyphSet) -> String {
    let mut graph = Graph::new();
    let author_width = author_column_width(records);

    let mut out = String::new();
    for record in records {
        let symbols = graph.consume(&record.id, &record.parents, record.is_boundary);
        render_line(&mut out, record, &symbols, glyph_set, author_width);
    }

    out
}

// ── Line rendering ──────────────────────────────────────────────────────

fn render_line(
    out: &mut String,
    record: &CommitRecord,
    symbols: &[Symbol],
    glyph_set: GlyphSet,
    author_width: usize,
) {
    let author: String = record.author.chars().take(author_width).collect();
    let padded_author = format!("{:<width$}", author, width = author_width);

    writeln!(
        out,
        "{} {} {} {}{} {}",
        record.short_id.color(COLOR_HASH),
        record.date.color(COLOR_DATE),
        padded_author.color(COLOR_AUTHOR),
        render_rail(symbols, glyph_set),
        render_refs(&record.refs),
        record.summary.color(COLOR_MESSAGE)
    )
    .unwrap();
}

/// Concatenate the two-cell lane glyphs, coloring each with its lane's
/// palette entry. Trailing blank cells are dropped.
fn render_rail(symbols: &[Symbol], glyph_set: GlyphSet) -> String {
    let mut cells: Vec<(&'static str, usize)> = symbols
        .iter()
        .map(|s| (glyph_set.glyph(s), s.color))
        .collect();

    while cells.last().is_some_and(|(glyph, _)| glyph.trim().is_empty()) {
        cells.pop();
    }

    let mut rail = String::new();
    for (glyph, color) in cells {
        let lane_color = LANE_COLORS[color % LANE_COLORS.len()];
        write!(rail, "{}", glyph.color(lane_color)).unwrap();
    }
    rail
}

/// Decorations joined after the graph: branches, remotes, tags, each in
/// its own color. Empty when nothing points at the commit.
fn render_refs(refs: &[String]) -> String {
    let mut out = String::new();
    for name in refs {
        let color = match name.as_bytes().first() {
            Some(b'[') => COLOR_BRANCH,
            Some(b'{') => COLOR_REMOTE,
            _ => COLOR_TAG,
        };
        write!(out, " {}", name.color(color).bold()).unwrap();
    }
    out
}

/// Width of the author column: the widest author in the batch, capped.
fn author_column_width(records: &[CommitRecord]) -> usize {
    records
        .iter()
        .map(|r| r.author.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_AUTHOR_WIDTH)
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
