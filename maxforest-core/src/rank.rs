//! Root selection and rank assignment.
//!
//! The root of each tree is the node with the greatest weighted degree over
//! the tree's selected edges, with the lowest identifier winning ties. Ranks
//! are depth complements: a breadth-first walk from the root records depths
//! and each node gets `height - depth`, so the root holds the unique maximum
//! of a non-singleton tree and ranks never increase away from it.

use std::{cmp::Ordering, collections::VecDeque};

use tracing::instrument;

use crate::{forest::Forest, snapshot::NormalizedEdge};

/// Root, height, and weight of one ranked tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RankedTree {
    pub(crate) root: usize,
    pub(crate) height: usize,
    pub(crate) weight: f64,
}

/// Ranks for every node position plus one [`RankedTree`] per forest tree.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Ranking {
    pub(crate) ranks: Vec<usize>,
    pub(crate) trees: Vec<RankedTree>,
}

/// Picks a root per tree and ranks every node.
///
/// `ids` supplies the caller identifiers by node position and only decides
/// weighted-degree ties.
#[instrument(name = "forest.rank", skip_all, fields(trees = forest.trees.len()))]
pub(crate) fn assign<Id: Ord>(forest: &Forest, edges: &[NormalizedEdge], ids: &[Id]) -> Ranking {
    let node_count = ids.len();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut incident: Vec<Vec<f64>> = vec![Vec::new(); node_count];
    for &position in &forest.selected {
        let edge = &edges[position];
        adjacency[edge.source].push(edge.target);
        adjacency[edge.target].push(edge.source);
        incident[edge.source].push(edge.weight);
        incident[edge.target].push(edge.weight);
    }
    let weighted_degree: Vec<f64> = incident
        .iter()
        .map(|weights| exact_sum(weights.iter().copied()))
        .collect();

    let mut depth: Vec<Option<usize>> = vec![None; node_count];
    let mut ranks = vec![0; node_count];
    let mut trees = Vec::with_capacity(forest.trees.len());
    let mut queue = VecDeque::new();

    for tree in &forest.trees {
        let Some(root) = pick_root(&tree.nodes, &weighted_degree, ids) else {
            continue;
        };

        depth[root] = Some(0);
        queue.push_back(root);
        let mut height = 0;
        while let Some(node) = queue.pop_front() {
            let node_depth = depth[node].unwrap_or_default();
            height = height.max(node_depth);
            for &neighbour in &adjacency[node] {
                if depth[neighbour].is_none() {
                    depth[neighbour] = Some(node_depth.saturating_add(1));
                    queue.push_back(neighbour);
                }
            }
        }

        for &node in &tree.nodes {
            ranks[node] = height.saturating_sub(depth[node].unwrap_or_default());
        }

        let weight = exact_sum(tree.edges.iter().map(|&position| edges[position].weight));
        trees.push(RankedTree {
            root,
            height,
            weight,
        });
    }

    Ranking { ranks, trees }
}

/// Returns the node with the greatest weighted degree, preferring the lowest
/// identifier on ties. `None` only for an empty node list.
fn pick_root<Id: Ord>(nodes: &[usize], weighted_degree: &[f64], ids: &[Id]) -> Option<usize> {
    nodes.iter().copied().reduce(|best, candidate| {
        match weighted_degree[candidate].total_cmp(&weighted_degree[best]) {
            Ordering::Greater => candidate,
            Ordering::Equal if ids[candidate] < ids[best] => candidate,
            Ordering::Equal | Ordering::Less => best,
        }
    })
}

/// Returns the correctly rounded sum of `values`.
///
/// Keeps a list of non-overlapping partial sums whose exact total equals the
/// running sum, then rounds once at the end. The result does not depend on
/// the order of `values`, so equal multisets of finite weights always produce
/// equal totals.
pub(crate) fn exact_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut partials: Vec<f64> = Vec::new();
    for value in values {
        let mut x = value;
        let mut kept = 0;
        for i in 0..partials.len() {
            let mut y = partials[i];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        partials.truncate(kept);
        partials.push(x);
    }

    let Some(mut hi) = partials.pop() else {
        return 0.0;
    };
    let mut lo = 0.0;
    while let Some(y) = partials.pop() {
        let x = hi;
        hi = x + y;
        lo = y - (hi - x);
        if lo != 0.0 {
            break;
        }
    }
    // Round half-way cases on the side the remaining partials point to.
    if let Some(&next) = partials.last() {
        if (lo < 0.0 && next < 0.0) || (lo > 0.0 && next > 0.0) {
            let y = lo * 2.0;
            let x = hi + y;
            if y == x - hi {
                hi = x;
            }
        }
    }
    hi
}
