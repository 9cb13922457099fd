use crate::graph::Symbol;

// ── Glyph kinds ─────────────────────────────────────────────────────────

/// The closed set of shapes a lane cell can take. A [`Symbol`] classifies
/// to exactly one kind; a [`GlyphSet`] maps each kind to a two-character
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Marker for a commit on the edge of the traversed range.
    BoundaryCommit,
    /// Marker for a commit with no parents.
    InitialCommit,
    /// Marker for a commit with more than one parent.
    MergeCommit,
    /// Marker for an ordinary commit.
    Commit,
    /// A lane crossed by a merge line flowing left and right.
    CrossMerge,
    /// A merge line closing onto the commit lane from the right edge.
    VerticalMerge,
    /// A lane passing straight through a horizontal merge line.
    CrossOver,
    /// A lane continuing straight down.
    VerticalBar,
    /// A lane ending by turning into the lane on its left.
    TurnLeft,
    /// Several lanes ending together on a shared horizontal run.
    MultiBranch,
    /// A horizontal run between distant lanes.
    HorizontalBar,
    /// A lane continuing down while branching to the right.
    Fork,
    /// A new lane opening under a horizontal run.
    TurnDownCross,
    /// A new lane opening to the right.
    TurnDown,
    /// A merge line ending by turning down into a new lane.
    MergeDown,
    /// A merge line fanning out into several parent lanes.
    MultiMerge,
    /// Nothing in this cell.
    Blank,
}

impl Glyph {
    /// Classify a symbol. The rules are ordered by priority and the first
    /// match wins; reordering them changes output.
    pub fn classify(symbol: &Symbol) -> Glyph {
        if symbol.commit {
            return if symbol.boundary {
                Glyph::BoundaryCommit
            } else if symbol.initial {
                Glyph::InitialCommit
            } else if symbol.merge {
                Glyph::MergeCommit
            } else {
                Glyph::Commit
            };
        }

        if is_cross_merge(symbol) {
            return Glyph::CrossMerge;
        }
        if is_vertical_merge(symbol) {
            return Glyph::VerticalMerge;
        }
        if is_cross_over(symbol) {
            return Glyph::CrossOver;
        }
        if is_vertical_bar(symbol) {
            return Glyph::VerticalBar;
        }
        if is_turn_left(symbol) {
            return Glyph::TurnLeft;
        }
        if is_multi_branch(symbol) {
            return Glyph::MultiBranch;
        }
        if is_horizontal_bar(symbol) {
            return Glyph::HorizontalBar;
        }
        if is_fork(symbol) {
            return Glyph::Fork;
        }
        if is_turn_down_cross(symbol) {
            return Glyph::TurnDownCross;
        }
        if is_turn_down(symbol) {
            return Glyph::TurnDown;
        }
        if is_merge_down(symbol) {
            return Glyph::MergeDown;
        }
        if is_multi_merge(symbol) {
            return Glyph::MultiMerge;
        }

        Glyph::Blank
    }
}

// ── Classifier predicates ───────────────────────────────────────────────

fn is_cross_merge(symbol: &Symbol) -> bool {
    if symbol.empty {
        return false;
    }
    if !symbol.continued_up && !symbol.new_column && !symbol.below_commit {
        return false;
    }
    if symbol.shift_left && symbol.continued_up_left {
        return false;
    }
    if symbol.next_right {
        return false;
    }

    symbol.merge
        && symbol.continued_up
        && symbol.continued_right
        && symbol.continued_left
        && symbol.parent_down
}

fn is_vertical_merge(symbol: &Symbol) -> bool {
    if symbol.empty {
        return false;
    }
    if !symbol.continued_up && !symbol.new_column && !symbol.below_commit {
        return false;
    }
    if symbol.shift_left && symbol.continued_up_left {
        return false;
    }
    if symbol.next_right {
        return false;
    }
    if !symbol.matches_commit {
        return false;
    }

    symbol.merge
        && symbol.continued_up
        && symbol.continued_left
        && symbol.parent_down
        && !symbol.continued_right
}

fn is_cross_over(symbol: &Symbol) -> bool {
    if symbol.empty {
        return false;
    }
    if !symbol.continued_down {
        return false;
    }
    if !symbol.continued_up && !symbol.new_column && !symbol.below_commit {
        return false;
    }
    if symbol.shift_left {
        return false;
    }

    (symbol.parent_right && symbol.merge) || symbol.flanked
}

fn is_vertical_bar(symbol: &Symbol) -> bool {
    if symbol.empty {
        return false;
    }
    if symbol.shift_left {
        return false;
    }
    if !symbol.continued_down {
        return false;
    }
    if symbol.continued_up {
        return true;
    }

    !symbol.parent_right && !symbol.flanked && !symbol.continued_right
}

fn is_turn_left(symbol: &Symbol) -> bool {
    if symbol.matches_commit && symbol.continued_right && !symbol.continued_down {
        return false;
    }
    if symbol.continue_shift {
        return false;
    }

    (symbol.continued_up || symbol.new_column || symbol.below_commit)
        && (symbol.matches_commit || symbol.shift_left)
}

fn is_multi_branch(symbol: &Symbol) -> bool {
    if symbol.continued_down {
        return false;
    }
    if !symbol.continued_right {
        return false;
    }
    if symbol.below_shift {
        return false;
    }

    (symbol.continued_up || symbol.new_column || symbol.below_commit)
        && (symbol.matches_commit || symbol.shift_left)
}

fn is_horizontal_bar(symbol: &Symbol) -> bool {
    if !symbol.next_right {
        return false;
    }
    if symbol.shift_left {
        return true;
    }
    if symbol.continued_down {
        return false;
    }
    if !symbol.parent_right && !symbol.continued_right {
        return false;
    }
    if symbol.continued_up && !symbol.continued_up_left {
        return false;
    }

    !symbol.below_commit
}

fn is_fork(symbol: &Symbol) -> bool {
    symbol.continued_down && symbol.continued_right && symbol.continued_up
}

fn is_turn_down_cross(symbol: &Symbol) -> bool {
    if !symbol.continued_down {
        return false;
    }
    if !symbol.continued_right {
        return false;
    }
    if !symbol.parent_right && !symbol.flanked {
        return false;
    }

    symbol.flanked || symbol.merge
}

fn is_turn_down(symbol: &Symbol) -> bool {
    symbol.continued_down && symbol.continued_right
}

fn is_merge_down(symbol: &Symbol) -> bool {
    !symbol.continued_down && symbol.parent_down && !symbol.parent_right && !symbol.continued_right
}

fn is_multi_merge(symbol: &Symbol) -> bool {
    symbol.parent_down && (symbol.parent_right || symbol.continued_right)
}

// ── Glyph tables ────────────────────────────────────────────────────────

/// Which character table to render lane cells with. The tables share the
/// classifier and differ only in the strings the kinds map to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GlyphSet {
    /// Sharp box-drawing corners; every commit marker renders as `o`.
    #[default]
    Box,
    /// Rounded corners with distinct commit markers for boundary,
    /// initial, and merge commits.
    Rounded,
}

impl GlyphSet {
    /// The two-cell string for one lane of a commit's row.
    pub fn glyph(&self, symbol: &Symbol) -> &'static str {
        match self {
            GlyphSet::Box => box_str(Glyph::classify(symbol)),
            GlyphSet::Rounded => rounded_str(Glyph::classify(symbol)),
        }
    }
}

fn box_str(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::BoundaryCommit => " o",
        Glyph::InitialCommit => " o",
        Glyph::MergeCommit => " o",
        Glyph::Commit => " o",
        Glyph::CrossMerge => "─┼",
        Glyph::VerticalMerge => "─┤",
        Glyph::CrossOver => "─│",
        Glyph::VerticalBar => " │",
        Glyph::TurnLeft => "─┘",
        Glyph::MultiBranch => "─┴",
        Glyph::HorizontalBar => "──",
        Glyph::Fork => " ├",
        Glyph::TurnDownCross => "─┌",
        Glyph::TurnDown => " ┌",
        Glyph::MergeDown => "─┐",
        Glyph::MultiMerge => "─┬",
        Glyph::Blank => "  ",
    }
}

fn rounded_str(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::BoundaryCommit => " ◯",
        Glyph::InitialCommit => " ◎",
        Glyph::MergeCommit => " ●",
        Glyph::Commit => " ∙",
        Glyph::CrossMerge => "─┼",
        Glyph::VerticalMerge => "─┤",
        Glyph::CrossOver => "─│",
        Glyph::VerticalBar => " │",
        Glyph::TurnLeft => "─╯",
        Glyph::MultiBranch => "─┴",
        Glyph::HorizontalBar => "──",
        Glyph::Fork => " ├",
        Glyph::TurnDownCross => "─╭",
        Glyph::TurnDown => " ╭",
        Glyph::MergeDown => "─╮",
        Glyph::MultiMerge => "─┬",
        Glyph::Blank => "  ",
    }
}

#[cfg(test)]
#[path = "glyphs_test.rs"]
mod tests;
