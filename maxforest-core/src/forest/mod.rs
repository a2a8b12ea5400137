//! Maximum spanning forest construction.
//!
//! A greedy Kruskal pass with the comparator inverted: edges are offered
//! heaviest first, ties go to the lower caller index, and an edge is kept only
//! when it joins two different trees. Every edge is visited because a forest
//! over several components has no single "complete" state to stop at.
//!
//! The sort may run on Rayon. The comparator is a total order over validated
//! edges (indices are unique), so the parallel and sequential sorts agree
//! element for element.

use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{Result, disjoint_set::DisjointSet, snapshot::NormalizedEdge};

/// How the selection order is computed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SortMode {
    Sequential,
    Parallel,
}

/// One tree of the forest, expressed in dense node positions and positions
/// into the normalized edge list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Tree {
    pub(crate) nodes: Vec<usize>,
    pub(crate) edges: Vec<usize>,
}

/// Counters describing how the greedy pass treated each edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SelectionStats {
    pub(crate) selected: usize,
    pub(crate) self_loops: usize,
    pub(crate) redundant: usize,
}

/// Output of [`build`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Forest {
    /// Trees ordered by their earliest node position.
    pub(crate) trees: Vec<Tree>,
    /// Selected edge positions in ascending order.
    pub(crate) selected: Vec<usize>,
    pub(crate) stats: SelectionStats,
}

/// Compares two edges by selection priority: heavier first, then lower index.
pub(crate) fn selection_order(left: &NormalizedEdge, right: &NormalizedEdge) -> Ordering {
    right
        .weight
        .total_cmp(&left.weight)
        .then_with(|| left.index.cmp(&right.index))
}

/// Selects a maximum-weight spanning forest over `node_count` nodes.
///
/// # Errors
/// Returns [`crate::ForestError::UnknownNode`] only if an edge endpoint lies
/// outside `0..node_count`, which [`crate::snapshot::normalize`] rules out.
#[instrument(
    name = "forest.build",
    skip(edges, mode),
    fields(edges = edges.len()),
)]
pub(crate) fn build(node_count: usize, edges: &[NormalizedEdge], mode: SortMode) -> Result<Forest> {
    let order = sorted_positions(edges, mode);

    let mut sets = DisjointSet::with_capacity(node_count);
    for node in 0..node_count {
        sets.make_set(node);
    }

    let mut selected = Vec::with_capacity(node_count.saturating_sub(1));
    let mut stats = SelectionStats::default();
    for position in order {
        let edge = &edges[position];
        if edge.is_self_loop() {
            stats.self_loops = stats.self_loops.saturating_add(1);
            continue;
        }
        if sets.union(&edge.source, &edge.target)? {
            selected.push(position);
        } else {
            stats.redundant = stats.redundant.saturating_add(1);
        }
    }
    stats.selected = selected.len();

    debug!(
        selected = stats.selected,
        self_loops = stats.self_loops,
        redundant = stats.redundant,
        components = sets.components(),
        "forest edges selected"
    );

    selected.sort_unstable();
    let trees = collect_trees(node_count, edges, &selected, &mut sets)?;
    Ok(Forest {
        trees,
        selected,
        stats,
    })
}

#[instrument(
    name = "forest.sort",
    skip(edges),
    fields(edges = edges.len(), parallel = mode == SortMode::Parallel),
)]
fn sorted_positions(edges: &[NormalizedEdge], mode: SortMode) -> Vec<usize> {
    let mut order: Vec<usize> = (0..edges.len()).collect();
    let compare = |left: &usize, right: &usize| selection_order(&edges[*left], &edges[*right]);
    match mode {
        #[cfg(feature = "parallel")]
        SortMode::Parallel => order.par_sort_unstable_by(compare),
        _ => order.sort_unstable_by(compare),
    }
    order
}

/// Groups nodes and selected edges by tree, numbering trees in order of their
/// earliest node position.
fn collect_trees(
    node_count: usize,
    edges: &[NormalizedEdge],
    selected: &[usize],
    sets: &mut DisjointSet<usize>,
) -> Result<Vec<Tree>> {
    let mut tree_of_root: Vec<Option<usize>> = vec![None; node_count];
    let mut tree_of_node = Vec::with_capacity(node_count);
    let mut trees: Vec<Tree> = Vec::with_capacity(sets.components());

    for node in 0..node_count {
        let root = sets.find(&node)?;
        let tree = *tree_of_root[root].get_or_insert_with(|| {
            trees.push(Tree::default());
            trees.len() - 1
        });
        trees[tree].nodes.push(node);
        tree_of_node.push(tree);
    }

    for &position in selected {
        let tree = tree_of_node[edges[position].source];
        trees[tree].edges.push(position);
    }

    Ok(trees)
}


#[cfg(test)]
mod property;
