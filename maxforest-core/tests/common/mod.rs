//! Graph fixtures shared by the integration tests.

use maxforest_core::{EdgeRecord, GraphSnapshot};

/// Scenario A: `ab=3`, `bc=2`, `ca=5`.
#[must_use]
pub fn triangle() -> GraphSnapshot<&'static str> {
    GraphSnapshot::with_positional_edges(
        ["A", "B", "C"],
        [
            ("A", "B", Some(3.0)),
            ("B", "C", Some(2.0)),
            ("C", "A", Some(5.0)),
        ],
    )
}

/// Scenario B: `ab=1` and `cd=4` with no edge between the pairs.
#[must_use]
pub fn disconnected_pair() -> GraphSnapshot<&'static str> {
    GraphSnapshot::with_positional_edges(
        ["A", "B", "C", "D"],
        [("A", "B", Some(1.0)), ("C", "D", Some(4.0))],
    )
}

/// Scenario C: two equal-weight edges at `A` plus a duplicate `ab` at index 2.
#[must_use]
pub fn tied_duplicates() -> GraphSnapshot<&'static str> {
    GraphSnapshot::new(
        ["A", "B", "C"],
        [
            EdgeRecord::new(0, "A", "B", 5.0),
            EdgeRecord::new(1, "A", "C", 5.0),
            EdgeRecord::new(2, "A", "B", 5.0),
        ],
    )
}

/// Scenario D: `D` has no incident edges.
#[must_use]
pub fn with_isolated_node() -> GraphSnapshot<&'static str> {
    GraphSnapshot::with_positional_edges(
        ["A", "B", "C", "D"],
        [("A", "B", Some(2.0)), ("B", "C", Some(1.0))],
    )
}
