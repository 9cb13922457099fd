use super::*;
use crate::glyphs::GlyphSet;

/// Feed one commit into the graph, with `&str` convenience for ids.
fn consume(graph: &mut Graph, id: &str, parents: &[&str]) -> Vec<Symbol> {
    let parents: Vec<String> = parents.iter().map(|p| p.to_string()).collect();
    graph.consume(id, &parents, false)
}

/// Render a symbol row with the box table, no trimming.
fn rail(symbols: &[Symbol]) -> String {
    symbols.iter().map(|s| GlyphSet::Box.glyph(s)).collect()
}

/// Run a whole history and collect the box-table row per commit.
fn rails(history: &[(&str, &[&str])]) -> Vec<String> {
    let mut graph = Graph::new();
    history
        .iter()
        .map(|&(id, parents)| rail(&consume(&mut graph, id, parents)))
        .collect()
}

// ── Golden scenarios ────────────────────────────────────────────────────

#[test]
fn single_root_commit() {
    assert_eq!(rails(&[("A", &[])]), vec![" o"]);
}

#[test]
fn linear_history_keeps_one_lane() {
    let rows = rails(&[("C", &["B"]), ("B", &["A"]), ("A", &[])]);
    assert_eq!(rows, vec![" o", " o", " o"]);
}

#[test]
fn merge_opens_a_second_lane() {
    let rows = rails(&[
        ("M", &["A", "B"]),
        ("A", &["R"]),
        ("B", &["R"]),
        ("R", &[]),
    ]);
    assert_eq!(rows, vec![" o─┐", " o │", " │ o", " o─┘"]);
}

#[test]
fn fork_joins_two_children_into_one_parent() {
    let rows = rails(&[("F", &["A"]), ("G", &["A"]), ("A", &[])]);
    assert_eq!(rows, vec![" o", " │ o", " o─┘"]);
}

#[test]
fn octopus_merge_fans_out() {
    let rows = rails(&[
        ("O", &["A", "B", "C"]),
        ("A", &["R"]),
        ("B", &["R"]),
        ("C", &["R"]),
        ("R", &[]),
    ]);
    assert_eq!(
        rows,
        vec![" o─┬─┐", " o │ │", " │ o │", " │ │ o", " o─┴─┘"]
    );
}

#[test]
fn merge_line_crosses_a_continuing_lane() {
    let rows = rails(&[
        ("W", &["M", "B", "X"]),
        ("M", &["A", "X"]),
        ("A", &["R"]),
        ("B", &["R"]),
        ("X", &["R"]),
        ("R", &[]),
    ]);
    assert_eq!(
        rows,
        vec![
            " o─┬─┐",
            " o─│─│─┐",
            " o │ │ │",
            " │ o │ │",
            " │ │ o─┘",
            " o─┴─┘",
        ]
    );
}

#[test]
fn closing_lane_draws_a_horizontal_run() {
    let rows = rails(&[
        ("W", &["B", "M"]),
        ("M", &["B", "A"]),
        ("A", &["R"]),
        ("B", &["R"]),
        ("R", &[]),
    ]);
    assert_eq!(
        rows,
        vec![" o─┐", " │ o─┐", " │ │ o", " o─┘ │", " o───┘"]
    );
}

#[test]
fn new_lane_turns_down_under_a_closing_one() {
    let rows = rails(&[
        ("W", &["A", "B"]),
        ("X", &["A", "C"]),
        ("A", &["R"]),
        ("B", &["R"]),
        ("C", &["R"]),
        ("R", &[]),
    ]);
    assert_eq!(
        rows,
        vec![
            " o─┐",
            " │ │ o─┐",
            " o─│─┘ │",
            " │ o ┌─┘",
            " │ │ o",
            " o─┴─┘",
        ]
    );
}

#[test]
fn independent_branch_pairs_keep_their_lanes() {
    let rows = rails(&[
        ("M1", &["A", "B"]),
        ("A", &["C"]),
        ("B", &["D"]),
        ("C", &["R"]),
        ("D", &["R"]),
        ("R", &[]),
    ]);
    assert_eq!(
        rows,
        vec![" o─┐", " o │", " │ o", " o │", " │ o", " o─┘"]
    );
}

#[test]
fn parallel_merges_collapse_together() {
    let rows = rails(&[
        ("E", &["A", "B"]),
        ("F", &["C", "D"]),
        ("A", &["R"]),
        ("B", &["R"]),
        ("C", &["R"]),
        ("D", &["R"]),
        ("R", &[]),
    ]);
    assert_eq!(
        rows,
        vec![
            " o─┐",
            " │ │ o─┐",
            " o │ │ │",
            " │ o │ │",
            " │ │ o │",
            " │ │ │ o",
            " o─┴─┴─┘",
        ]
    );
}

#[test]
fn rounded_table_distinguishes_commit_markers() {
    let mut graph = Graph::new();
    let history: [(&str, &[&str]); 4] = [
        ("M", &["A", "B"]),
        ("A", &["R"]),
        ("B", &["R"]),
        ("R", &[]),
    ];
    let rows: Vec<String> = history
        .iter()
        .map(|&(id, parents)| {
            consume(&mut graph, id, parents)
                .iter()
                .map(|s| GlyphSet::Rounded.glyph(s))
                .collect()
        })
        .collect();
    assert_eq!(rows, vec![" ●─╮", " ∙ │", " │ ∙", " ◎─╯"]);
}

// ── Boundary flag ───────────────────────────────────────────────────────

#[test]
fn boundary_flag_reaches_the_marker() {
    let mut graph = Graph::new();
    consume(&mut graph, "C", &["B"]);
    let symbols = graph.consume("B", &["A".to_string()], true);
    assert!(symbols[0].commit);
    assert!(symbols[0].boundary);
}

#[test]
fn non_boundary_commits_have_no_boundary_flag() {
    let mut graph = Graph::new();
    for symbol in consume(&mut graph, "C", &["B"]) {
        assert!(!symbol.boundary);
    }
}

// ── Universal properties ────────────────────────────────────────────────

/// A tangled history used by the property tests: merges, forks, an
/// octopus, and a lane crossing.
fn tangled_history() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("T", vec!["M", "B", "X"]),
        ("M", vec!["A", "X"]),
        ("A", vec!["R"]),
        ("B", vec!["C", "D"]),
        ("X", vec!["R"]),
        ("C", vec!["R"]),
        ("D", vec!["R"]),
        ("R", vec![]),
    ]
}

#[test]
fn window_rows_stay_the_same_width() {
    let mut graph = Graph::new();
    for (id, parents) in tangled_history() {
        let parents: Vec<String> = parents.iter().map(|p| p.to_string()).collect();
        graph.consume(id, &parents, false);
        let (prev, row, next) = graph.widths();
        assert_eq!(prev, row);
        assert_eq!(next, row);
    }
}

#[test]
fn colors_stay_in_bounds_and_balanced() {
    let mut graph = Graph::new();
    for (id, parents) in tangled_history() {
        let parents: Vec<String> = parents.iter().map(|p| p.to_string()).collect();
        for symbol in graph.consume(id, &parents, false) {
            assert!(symbol.color < crate::palette::COLOR_SLOTS);
        }
        assert_eq!(graph.colors().total_count(), graph.colors().open_count());
    }
}

#[test]
fn consumed_commit_releases_its_color() {
    let mut graph = Graph::new();
    for (id, parents) in tangled_history() {
        let parents: Vec<String> = parents.iter().map(|p| p.to_string()).collect();
        graph.consume(id, &parents, false);
        assert!(!graph.colors().contains(id));
    }
}

#[test]
fn trailing_lanes_are_always_collapsed() {
    let mut graph = Graph::new();
    for (id, parents) in tangled_history() {
        let parents: Vec<String> = parents.iter().map(|p| p.to_string()).collect();
        graph.consume(id, &parents, false);
        let ids = graph.row_ids();
        assert!(
            ids.len() == 1 || ids.last().unwrap().is_some(),
            "trailing empty lane survived: {:?}",
            ids
        );
    }
}

#[test]
fn every_parent_gets_a_lane() {
    let mut graph = Graph::new();
    for (id, parents) in tangled_history() {
        let parents: Vec<String> = parents.iter().map(|p| p.to_string()).collect();
        graph.consume(id, &parents, false);
        let ids = graph.row_ids();
        for parent in &parents {
            assert!(
                ids.iter().any(|id| id.as_deref() == Some(parent.as_str())),
                "parent {} has no lane after {}: {:?}",
                parent,
                id,
                ids
            );
        }
    }
}

#[test]
fn emitted_width_matches_window_at_emit_time() {
    let mut graph = Graph::new();
    let mut last_len = 0;
    for (id, parents) in tangled_history() {
        let parents: Vec<String> = parents.iter().map(|p| p.to_string()).collect();
        let symbols = graph.consume(id, &parents, false);
        // Emitted rows never shrink below the collapsed window width.
        let (_, row, _) = graph.widths();
        assert!(symbols.len() >= row);
        last_len = symbols.len();
    }
    assert!(last_len >= 1);
}

#[test]
fn commit_symbol_sits_at_its_lane() {
    let mut graph = Graph::new();
    for (id, parents) in tangled_history() {
        let parents: Vec<String> = parents.iter().map(|p| p.to_string()).collect();
        let symbols = graph.consume(id, &parents, false);
        assert_eq!(symbols.iter().filter(|s| s.commit).count(), 1);
    }
}
