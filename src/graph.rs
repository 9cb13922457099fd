use crate::palette::ColorSlots;

// ── Data types ──────────────────────────────────────────────────────────

/// Per-cell attribute record emitted for every lane of a commit's row.
/// The glyph tables turn one of these into a two-character string; the
/// flags describe how the lane relates to its neighbours in the three-row
/// window around the commit being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Symbol {
    /// Index into the lane color palette.
    pub color: usize,

    pub commit: bool,
    pub boundary: bool,
    pub initial: bool,
    pub merge: bool,

    pub continued_down: bool,
    pub continued_up: bool,
    pub continued_right: bool,
    pub continued_left: bool,
    pub continued_up_left: bool,

    pub parent_down: bool,
    pub parent_right: bool,

    pub below_commit: bool,
    pub flanked: bool,
    pub next_right: bool,
    pub matches_commit: bool,

    pub shift_left: bool,
    pub continue_shift: bool,
    pub below_shift: bool,

    pub new_column: bool,
    pub empty: bool,
}

/// A lane slot in a row. `id` names the not-yet-rendered commit whose
/// descendants this lane is carrying; `None` marks a placeholder lane.
/// Of the stored symbol only `boundary` is meaningful: it is stamped when
/// the column is inserted and survives until the commit is rendered.
#[derive(Debug, Clone, Default)]
struct Column {
    id: Option<String>,
    symbol: Symbol,
}

impl Column {
    fn has_commit(&self) -> bool {
        self.id.is_some()
    }
}

/// An ordered sequence of lane columns. The three window rows always have
/// equal lengths outside of expansion and collapse.
#[derive(Debug, Default)]
struct Row {
    columns: Vec<Column>,
}

impl Row {
    fn new() -> Self {
        Row::default()
    }

    fn len(&self) -> usize {
        self.columns.len()
    }

    /// Index of the first column owned by `id`; failing that, the first
    /// empty column; failing that, the insertion point past the end.
    /// A matching id always wins over an earlier empty slot.
    fn find_column(&self, id: &str) -> usize {
        let mut free = self.len();
        for (i, col) in self.columns.iter().enumerate() {
            if !col.has_commit() && free == self.len() {
                free = i;
            } else if col.id.as_deref() == Some(id) {
                return i;
            }
        }
        free
    }

    /// Index of the first empty column, or the length when all are taken.
    fn first_free(&self) -> usize {
        for (i, col) in self.columns.iter().enumerate() {
            if !col.has_commit() {
                return i;
            }
        }
        self.len()
    }

    /// Insert a column owning `id` at `pos` (append when `pos` is past the
    /// end), stamping the boundary flag it will carry until rendered.
    fn insert_column(&mut self, pos: usize, id: Option<&str>, boundary: bool) {
        let mut column = Column {
            id: id.map(str::to_string),
            ..Column::default()
        };
        column.symbol.boundary = boundary;

        if pos < self.len() {
            self.columns.insert(pos, column);
        } else {
            self.columns.push(column);
        }
    }

    fn contains_id(&self, id: &str) -> bool {
        self.columns.iter().any(|c| c.id.as_deref() == Some(id))
    }

    /// Turn every column owned by `id` into a placeholder lane.
    fn clear_commit(&mut self, id: &str) {
        for col in &mut self.columns {
            if col.id.as_deref() == Some(id) {
                col.id = None;
            }
        }
    }

    /// Number of non-empty columns.
    fn occupied(&self) -> usize {
        self.columns.iter().filter(|c| c.has_commit()).count()
    }
}

// ── Symbol predicates ───────────────────────────────────────────────────

/// The lane at `pos` carries the same id in both rows and is not being
/// folded into a lane on its left.
fn continues_down(row: &Row, next: &Row, pos: usize) -> bool {
    row.columns[pos].id == next.columns[pos].id && !row.columns[pos].symbol.shift_left
}

/// The lane at `pos` is visually moving one column left: a lane to its
/// left carries the same id and that lane did not come straight down from
/// the previous row. The closest matching lane decides.
fn shifts_left(row: &Row, prev: &Row, pos: usize) -> bool {
    if !row.columns[pos].has_commit() {
        return false;
    }

    for i in (0..pos).rev() {
        if !row.columns[i].has_commit() {
            continue;
        }
        if row.columns[i].id != row.columns[pos].id {
            continue;
        }
        if !continues_down(prev, row, i) {
            return true;
        }
        break;
    }

    false
}

/// The lane at `pos` did not exist in the previous row: its slot was empty
/// there, and no slot at `pos` or to the right carried its id.
fn new_column(row: &Row, prev: &Row, pos: usize) -> bool {
    if !prev.columns[pos].has_commit() {
        return true;
    }

    for i in pos..row.len() {
        if row.columns[pos].id == prev.columns[i].id {
            return false;
        }
    }

    true
}

/// Another lane right of `pos` carries the same id. The scan stops at the
/// commit column when `pos` lies left of it and runs to the end otherwise.
fn continues_right(row: &Row, pos: usize, commit_pos: usize) -> bool {
    let end = if pos < commit_pos { commit_pos } else { row.len() };

    for i in pos + 1..end {
        if row.columns[pos].id == row.columns[i].id {
            return true;
        }
    }

    false
}

/// A non-empty lane left of `pos` carries the same id. The scan starts at
/// the row edge when `pos` lies left of the commit column and at the
/// commit column otherwise.
fn continues_left(row: &Row, pos: usize, commit_pos: usize) -> bool {
    let start = if pos < commit_pos { 0 } else { commit_pos };

    for i in start..pos {
        if !row.columns[i].has_commit() {
            continue;
        }
        if row.columns[pos].id == row.columns[i].id {
            return true;
        }
    }

    false
}

/// One of the staged parents owns the lane below `pos`.
fn parent_down(parents: &Row, next: &Row, pos: usize) -> bool {
    for parent in &parents.columns {
        if !parent.has_commit() {
            continue;
        }
        if parent.id == next.columns[pos].id {
            return true;
        }
    }
    false
}

/// A staged parent lands in a lane right of `pos` that it did not already
/// occupy in the current row.
fn parent_right(parents: &Row, row: &Row, next: &Row, pos: usize) -> bool {
    for parent in &parents.columns {
        if !parent.has_commit() {
            continue;
        }
        for i in pos + 1..next.len() {
            if parent.id != next.columns[i].id {
                continue;
            }
            if parent.id != row.columns[i].id {
                return true;
            }
        }
    }
    false
}

/// A lane on the far side of `pos` from the commit column carries the
/// commit's own id.
fn flanked(row: &Row, pos: usize, commit_pos: usize, commit_id: &str) -> bool {
    let (start, end) = if pos < commit_pos {
        (0, pos)
    } else {
        (pos + 1, row.len())
    };

    for i in start..end {
        if row.columns[i].id.as_deref() == Some(commit_id) {
            return true;
        }
    }

    false
}

// ── The engine ──────────────────────────────────────────────────────────

/// Incremental lane-graph state. Commits are fed in topological order
/// (children before parents); each call to [`Graph::consume`] advances a
/// three-row sliding window (previous, current, next) one commit and
/// returns the per-lane symbols for that commit's line.
pub struct Graph {
    prev_row: Row,
    row: Row,
    next_row: Row,
    /// Staging row for the current commit's parents, rebuilt every commit.
    parents: Row,
    position: usize,
    prev_position: usize,
    id: String,
    is_boundary: bool,
    has_parents: bool,
    colors: ColorSlots,
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            prev_row: Row::new(),
            row: Row::new(),
            next_row: Row::new(),
            parents: Row::new(),
            position: 0,
            prev_position: 0,
            id: String::new(),
            is_boundary: false,
            has_parents: false,
            colors: ColorSlots::new(),
        }
    }

    /// Advance the graph by one commit and return its row of symbols, one
    /// per lane. The vector length equals the window width at emit time;
    /// trailing empty lanes are collapsed afterwards, so the next call may
    /// return a shorter row.
    pub fn consume(&mut self, id: &str, parents: &[String], is_boundary: bool) -> Vec<Symbol> {
        self.position = self.row.find_column(id);
        self.id = id.to_string();
        self.is_boundary = is_boundary;

        for parent in parents {
            let pos = self.parents.len();
            self.parents.insert_column(pos, Some(parent.as_str()), is_boundary);
        }
        self.has_parents = !parents.is_empty();

        // A parentless commit still needs one placeholder lane so the
        // expansion and collapse bookkeeping stays consistent.
        if !self.has_parents {
            let pos = self.parents.len();
            self.parents.insert_column(pos, None, is_boundary);
        }

        self.expand();
        self.generate_next_row();

        let mut symbols = Vec::with_capacity(self.row.len());
        self.generate_symbols(&mut symbols);
        self.colors.release(id);

        self.commit_next_row();
        self.collapse();

        debug_assert_eq!(self.prev_row.len(), self.row.len());
        debug_assert_eq!(self.next_row.len(), self.row.len());

        self.parents = Row::new();
        self.position = 0;

        symbols
    }

    /// Widen all three rows until the commit column and every staged
    /// parent have a home lane.
    fn expand(&mut self) {
        while self.position + self.parents.len() > self.row.len() {
            let boundary = self.is_boundary;
            let pos = self.prev_row.len();
            self.prev_row.insert_column(pos, None, boundary);
            let pos = self.row.len();
            self.row.insert_column(pos, None, boundary);
            let pos = self.next_row.len();
            self.next_row.insert_column(pos, None, boundary);
        }
    }

    fn generate_next_row(&mut self) {
        self.next_row.clear_commit(&self.id);
        self.insert_parents();
        self.remove_collapsed_columns();
        self.fill_empty_columns();
    }

    /// Place each staged parent into a free lane of the next row, growing
    /// the window by one lane when every lane is taken.
    fn insert_parents(&mut self) {
        for i in 0..self.parents.len() {
            if !self.parents.columns[i].has_commit() {
                continue;
            }
            let parent = self.parents.columns[i].clone();

            let free = self.next_row.first_free();
            if free == self.next_row.len() {
                let boundary = self.is_boundary;
                let pos = self.next_row.len();
                self.next_row.insert_column(pos, parent.id.as_deref(), boundary);
                let pos = self.row.len();
                self.row.insert_column(pos, None, boundary);
                let pos = self.prev_row.len();
                self.prev_row.insert_column(pos, None, boundary);
            } else {
                self.next_row.columns[free].id = parent.id.clone();
                self.next_row.columns[free].symbol = parent.symbol;
            }
        }
    }

    /// Fold duplicate lanes in the next row into their left neighbour.
    /// Lanes adjacent to the commit column, freshly introduced parent
    /// lanes, and lanes paralleling a persistent left neighbour are kept.
    fn remove_collapsed_columns(&mut self) {
        for i in (1..self.next_row.len()).rev() {
            if i == self.position || i == self.position + 1 {
                continue;
            }
            if self.next_row.columns[i].id.as_deref() == Some(self.id.as_str()) {
                continue;
            }
            if self.next_row.columns[i].id != self.next_row.columns[i - 1].id {
                continue;
            }
            let is_fresh_parent = self.next_row.columns[i]
                .id
                .as_deref()
                .is_some_and(|id| self.parents.contains_id(id));
            if is_fresh_parent && !self.prev_row.columns[i].has_commit() {
                continue;
            }

            if self.next_row.columns[i - 1].id != self.prev_row.columns[i - 1].id
                || self.prev_row.columns[i - 1].symbol.shift_left
            {
                self.next_row.columns[i] = if i + 1 >= self.next_row.len() {
                    Column::default()
                } else {
                    self.next_row.columns[i + 1].clone()
                };
            }
        }
    }

    /// Propagate lane identities leftward through gaps the fold left
    /// behind: every empty lane inherits a copy of its right neighbour.
    fn fill_empty_columns(&mut self) {
        for i in (0..self.next_row.len().saturating_sub(1)).rev() {
            if !self.next_row.columns[i].has_commit() {
                self.next_row.columns[i] = self.next_row.columns[i + 1].clone();
            }
        }
    }

    /// Build one symbol per lane of the current row.
    fn generate_symbols(&mut self, symbols: &mut Vec<Symbol>) {
        let staged = self.parents.occupied();
        let initial = staged < 1;
        let merge = staged > 1;

        for pos in 0..self.row.len() {
            let mut symbol = Symbol::default();

            symbol.commit = pos == self.position;
            symbol.boundary = pos == self.position && self.next_row.columns[pos].symbol.boundary;
            symbol.initial = initial;
            symbol.merge = merge;

            symbol.continued_down = continues_down(&self.row, &self.next_row, pos);
            symbol.continued_up = continues_down(&self.prev_row, &self.row, pos);
            symbol.continued_right = continues_right(&self.row, pos, self.position);
            symbol.continued_left = continues_left(&self.row, pos, self.position);
            symbol.continued_up_left = continues_left(&self.prev_row, pos, self.prev_row.len());

            symbol.parent_down = parent_down(&self.parents, &self.next_row, pos);
            symbol.parent_right =
                pos > self.position && parent_right(&self.parents, &self.row, &self.next_row, pos);

            symbol.below_commit = pos == self.prev_position
                && self.row.columns[pos].id == self.prev_row.columns[pos].id;
            symbol.flanked = flanked(&self.row, pos, self.position, &self.id);
            symbol.next_right = continues_right(&self.next_row, pos, 0);
            symbol.matches_commit = self.row.columns[pos].id.as_deref() == Some(self.id.as_str());

            symbol.shift_left = shifts_left(&self.row, &self.prev_row, pos);
            symbol.continue_shift =
                pos + 1 < self.row.len() && shifts_left(&self.row, &self.prev_row, pos + 1);
            symbol.below_shift = self.prev_row.columns[pos].symbol.shift_left;

            symbol.new_column = new_column(&self.row, &self.prev_row, pos);
            symbol.empty = !self.row.columns[pos].has_commit();

            // Lanes keep their owner's color; placeholder lanes borrow the
            // color of whatever flows through them next.
            let owner = self.row.columns[pos]
                .id
                .clone()
                .or_else(|| self.next_row.columns[pos].id.clone())
                .unwrap_or_default();
            symbol.color = self.colors.color_of(&owner);

            symbols.push(symbol);
        }
    }

    /// Slide the window down one row: the current row becomes the previous
    /// one and the prepared next row becomes current. At the commit column
    /// (and through empty slots) the previous row picks up the next row's
    /// lane instead, so new lanes are visible to the next commit's upward
    /// scans.
    fn commit_next_row(&mut self) {
        let live_parents = self.parents.occupied() > 0;

        for i in 0..self.row.len() {
            self.prev_row.columns[i] = self.row.columns[i].clone();

            if i == self.position && live_parents {
                self.prev_row.columns[i] = self.next_row.columns[i].clone();
            }
            if !self.prev_row.columns[i].has_commit() {
                self.prev_row.columns[i] = self.next_row.columns[i].clone();
            }

            self.row.columns[i] = self.next_row.columns[i].clone();
        }

        self.prev_position = self.position;
    }

    /// Retire trailing empty lanes from all three rows.
    fn collapse(&mut self) {
        while self.row.len() > 1 && !self.row.columns[self.row.len() - 1].has_commit() {
            self.prev_row.columns.pop();
            self.row.columns.pop();
            self.next_row.columns.pop();
        }
    }

    #[cfg(test)]
    fn widths(&self) -> (usize, usize, usize) {
        (self.prev_row.len(), self.row.len(), self.next_row.len())
    }

    #[cfg(test)]
    fn colors(&self) -> &ColorSlots {
        &self.colors
    }

    #[cfg(test)]
    fn row_ids(&self) -> Vec<Option<String>> {
        self.row.columns.iter().map(|c| c.id.clone()).collect()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Graph::new()
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
