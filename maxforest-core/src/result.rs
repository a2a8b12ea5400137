//! Result types for maximum spanning forest computations.
//!
//! [`ForestResult`] is immutable and owned by the caller; the host applies it
//! to its own presentation model (for example by writing `isTreeEdge` back
//! onto its edge records via [`ForestResult::edge_flags`]).

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use crate::{
    error::ForestWarning,
    forest::Forest,
    rank::{Ranking, exact_sum},
    snapshot::{NodeKey, NormalizedGraph},
};

/// Identifier assigned to a tree of the forest.
///
/// Trees are numbered from zero in order of their earliest node in the input
/// node collection.
///
/// # Examples
/// ```
/// use maxforest_core::TreeId;
///
/// let id = TreeId::new(2);
/// assert_eq!(id.get(), 2);
/// assert_eq!(id.to_string(), "2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(usize);

impl TreeId {
    /// Creates a tree identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-tree summary of a computed forest.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSummary<Id> {
    id: TreeId,
    root: Id,
    node_count: usize,
    edge_count: usize,
    height: usize,
    weight: f64,
}

impl<Id> TreeSummary<Id> {
    /// Returns the tree identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> TreeId { self.id }

    /// Returns the root node, which carries the tree's highest rank.
    #[must_use]
    #[rustfmt::skip]
    pub fn root(&self) -> &Id { &self.root }

    /// Returns the number of nodes in the tree.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the number of selected edges in the tree (`node_count - 1`).
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Returns the greatest depth below the root, which is also the root's rank.
    #[must_use]
    #[rustfmt::skip]
    pub fn height(&self) -> usize { self.height }

    /// Returns the summed weight of the tree's selected edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }
}

/// Whether one input edge was selected into the forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeFlag {
    /// Caller-visible edge index.
    pub index: usize,
    /// `true` when the edge belongs to the forest.
    pub is_tree_edge: bool,
}

/// Output of [`crate::MaxForest::compute`].
///
/// # Examples
/// ```
/// use maxforest_core::{GraphSnapshot, TreeId, compute_maximum_spanning_forest};
///
/// let graph = GraphSnapshot::with_positional_edges(
///     ["a", "b", "c"],
///     [("a", "b", Some(3.0)), ("b", "c", Some(2.0)), ("c", "a", Some(5.0))],
/// );
/// let result = compute_maximum_spanning_forest(&graph)?;
/// assert_eq!(result.selected_edge_indices().iter().copied().collect::<Vec<_>>(), vec![0, 2]);
/// assert_eq!(result.root_of().get(&TreeId::new(0)), Some(&"a"));
/// assert_eq!(result.rank(&"a"), Some(1));
/// assert!(!result.is_tree_edge(1));
/// # Ok::<(), maxforest_core::ForestError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ForestResult<Id> {
    selected_edge_indices: BTreeSet<usize>,
    edge_flags: Vec<EdgeFlag>,
    root_of: BTreeMap<TreeId, Id>,
    rank_of: BTreeMap<Id, usize>,
    tree_of: BTreeMap<Id, TreeId>,
    trees: Vec<TreeSummary<Id>>,
    total_weight: f64,
    warnings: Vec<ForestWarning>,
}

impl<Id: NodeKey> ForestResult<Id> {
    /// Maps dense-position results back onto caller identifiers.
    pub(crate) fn assemble(graph: &NormalizedGraph<'_, Id>, forest: &Forest, ranking: &Ranking) -> Self {
        let selected_edge_indices: BTreeSet<usize> = forest
            .selected
            .iter()
            .map(|&position| graph.edges[position].index)
            .collect();

        let edge_flags = graph
            .edges
            .iter()
            .map(|edge| EdgeFlag {
                index: edge.index,
                is_tree_edge: selected_edge_indices.contains(&edge.index),
            })
            .collect();

        let mut root_of = BTreeMap::new();
        let mut tree_of = BTreeMap::new();
        let mut trees = Vec::with_capacity(forest.trees.len());
        for (position, (tree, ranked)) in forest.trees.iter().zip(&ranking.trees).enumerate() {
            let id = TreeId::new(position);
            let root = graph.nodes[ranked.root].clone();
            root_of.insert(id, root.clone());
            for &node in &tree.nodes {
                tree_of.insert(graph.nodes[node].clone(), id);
            }
            trees.push(TreeSummary {
                id,
                root,
                node_count: tree.nodes.len(),
                edge_count: tree.edges.len(),
                height: ranked.height,
                weight: ranked.weight,
            });
        }

        let rank_of = graph
            .nodes
            .iter()
            .cloned()
            .zip(ranking.ranks.iter().copied())
            .collect();

        let total_weight = exact_sum(trees.iter().map(|tree| tree.weight));

        Self {
            selected_edge_indices,
            edge_flags,
            root_of,
            rank_of,
            tree_of,
            trees,
            total_weight,
            warnings: graph.warnings.clone(),
        }
    }

    /// Returns the rank of `node`, or `None` when it was not in the input.
    #[must_use]
    pub fn rank(&self, node: &Id) -> Option<usize> {
        self.rank_of.get(node).copied()
    }

    /// Returns the tree containing `node`.
    #[must_use]
    pub fn tree(&self, node: &Id) -> Option<TreeId> {
        self.tree_of.get(node).copied()
    }
}

impl<Id> ForestResult<Id> {
    /// Returns the caller indices of the selected edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn selected_edge_indices(&self) -> &BTreeSet<usize> { &self.selected_edge_indices }

    /// Returns `true` when the edge with caller index `index` was selected.
    #[must_use]
    pub fn is_tree_edge(&self, index: usize) -> bool {
        self.selected_edge_indices.contains(&index)
    }

    /// Returns one [`EdgeFlag`] per input edge, in input order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_flags(&self) -> &[EdgeFlag] { &self.edge_flags }

    /// Returns the root node of every tree.
    #[must_use]
    #[rustfmt::skip]
    pub fn root_of(&self) -> &BTreeMap<TreeId, Id> { &self.root_of }

    /// Returns the rank of every input node.
    #[must_use]
    #[rustfmt::skip]
    pub fn rank_of(&self) -> &BTreeMap<Id, usize> { &self.rank_of }

    /// Returns the tree membership of every input node.
    #[must_use]
    #[rustfmt::skip]
    pub fn tree_of(&self) -> &BTreeMap<Id, TreeId> { &self.tree_of }

    /// Returns per-tree summaries ordered by [`TreeId`].
    #[must_use]
    #[rustfmt::skip]
    pub fn trees(&self) -> &[TreeSummary<Id>] { &self.trees }

    /// Returns the number of trees in the forest.
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Returns the summed weight of all selected edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn total_weight(&self) -> f64 { self.total_weight }

    /// Returns the non-fatal conditions recorded during the computation.
    #[must_use]
    #[rustfmt::skip]
    pub fn warnings(&self) -> &[ForestWarning] { &self.warnings }
}
