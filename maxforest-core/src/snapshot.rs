//! Graph snapshot adapter.
//!
//! Callers describe their graph with [`GraphSnapshot`] using their own node
//! identifiers. [`normalize`] validates the snapshot in full and lowers it onto
//! dense node positions before any forest work starts, so structural input
//! errors never leave a partial result behind.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    hash::Hash,
    sync::Arc,
};

use tracing::warn;

use crate::{
    Result,
    builder::NonFiniteWeightPolicy,
    error::{ForestError, ForestWarning, WeightIssue},
};

/// Identifier types accepted for graph nodes.
///
/// `Ord` defines which identifier is "lowest" when root selection ties, and
/// `Display` renders identifiers inside errors.
pub trait NodeKey: Clone + Eq + Hash + Ord + fmt::Display {}

impl<T> NodeKey for T where T: Clone + Eq + Hash + Ord + fmt::Display {}

/// A weighted, undirected edge as supplied by the caller.
///
/// # Examples
/// ```
/// use maxforest_core::EdgeRecord;
///
/// let edge = EdgeRecord::new(4, "a", "b", 2.5);
/// assert_eq!(edge.index(), 4);
/// assert_eq!(edge.weight(), Some(2.5));
///
/// let unweighted = EdgeRecord::unweighted(5, "b", "c");
/// assert_eq!(unweighted.weight(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeRecord<Id> {
    index: usize,
    source: Id,
    target: Id,
    weight: Option<f64>,
}

impl<Id> EdgeRecord<Id> {
    /// Creates an edge with a weight.
    #[must_use]
    pub fn new(index: usize, source: Id, target: Id, weight: f64) -> Self {
        Self::with_optional_weight(index, source, target, Some(weight))
    }

    /// Creates an edge whose weight is absent.
    #[must_use]
    pub fn unweighted(index: usize, source: Id, target: Id) -> Self {
        Self::with_optional_weight(index, source, target, None)
    }

    /// Creates an edge from an optional weight.
    #[must_use]
    pub fn with_optional_weight(index: usize, source: Id, target: Id, weight: Option<f64>) -> Self {
        Self {
            index,
            source,
            target,
            weight,
        }
    }

    /// Returns the caller-visible edge index.
    #[must_use]
    #[rustfmt::skip]
    pub fn index(&self) -> usize { self.index }

    /// Returns the source node identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> &Id { &self.source }

    /// Returns the target node identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> &Id { &self.target }

    /// Returns the weight as supplied, which may be absent or non-finite.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> Option<f64> { self.weight }
}

/// Read-only node and edge collections handed to the core for one call.
///
/// # Examples
/// ```
/// use maxforest_core::GraphSnapshot;
///
/// let graph = GraphSnapshot::with_positional_edges(
///     ["a", "b", "c"],
///     [("a", "b", Some(3.0)), ("b", "c", None)],
/// );
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edges()[1].index(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GraphSnapshot<Id> {
    nodes: Vec<Id>,
    edges: Vec<EdgeRecord<Id>>,
}

impl<Id> GraphSnapshot<Id> {
    /// Creates a snapshot from nodes and explicitly indexed edges.
    pub fn new(
        nodes: impl IntoIterator<Item = Id>,
        edges: impl IntoIterator<Item = EdgeRecord<Id>>,
    ) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            edges: edges.into_iter().collect(),
        }
    }

    /// Creates a snapshot whose edge indices are their positions in `edges`.
    pub fn with_positional_edges(
        nodes: impl IntoIterator<Item = Id>,
        edges: impl IntoIterator<Item = (Id, Id, Option<f64>)>,
    ) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
            edges: edges
                .into_iter()
                .enumerate()
                .map(|(index, (source, target, weight))| {
                    EdgeRecord::with_optional_weight(index, source, target, weight)
                })
                .collect(),
        }
    }

    /// Returns the node identifiers in caller order.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes(&self) -> &[Id] { &self.nodes }

    /// Returns the edges in caller order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[EdgeRecord<Id>] { &self.edges }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// An edge lowered onto dense node positions with a usable weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct NormalizedEdge {
    pub(crate) index: usize,
    pub(crate) source: usize,
    pub(crate) target: usize,
    pub(crate) weight: f64,
}

impl NormalizedEdge {
    pub(crate) fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Validated snapshot ready for the forest builder.
#[derive(Debug)]
pub(crate) struct NormalizedGraph<'a, Id> {
    pub(crate) nodes: &'a [Id],
    pub(crate) edges: Vec<NormalizedEdge>,
    pub(crate) warnings: Vec<ForestWarning>,
}

/// Validates `graph` and maps it onto dense node positions.
///
/// # Errors
/// Returns [`ForestError::DuplicateNodeId`], [`ForestError::DuplicateEdgeIndex`],
/// [`ForestError::InvalidEdgeReference`], or (under
/// [`NonFiniteWeightPolicy::Reject`]) [`ForestError::NonFiniteWeight`].
/// Structural errors are reported before any weight is examined, and no
/// warnings are logged unless the whole snapshot is valid.
pub(crate) fn normalize<Id: NodeKey>(
    graph: &GraphSnapshot<Id>,
    policy: NonFiniteWeightPolicy,
) -> Result<NormalizedGraph<'_, Id>> {
    let positions = index_nodes(&graph.nodes)?;
    let mut seen_indices = HashSet::with_capacity(graph.edges.len());
    let mut endpoints = Vec::with_capacity(graph.edges.len());
    for edge in &graph.edges {
        if !seen_indices.insert(edge.index) {
            return Err(ForestError::DuplicateEdgeIndex { edge: edge.index });
        }
        let source = resolve(&positions, edge.index, &edge.source)?;
        let target = resolve(&positions, edge.index, &edge.target)?;
        endpoints.push((source, target));
    }

    let mut edges = Vec::with_capacity(graph.edges.len());
    let mut warnings = Vec::new();
    for (edge, (source, target)) in graph.edges.iter().zip(endpoints) {
        let weight = match (edge.weight, WeightIssue::classify(edge.weight)) {
            (Some(weight), None) => canonical_zero(weight),
            (_, issue) => {
                let issue = issue.unwrap_or(WeightIssue::Missing);
                if policy == NonFiniteWeightPolicy::Reject {
                    return Err(ForestError::NonFiniteWeight {
                        edge: edge.index,
                        issue,
                    });
                }
                warnings.push(ForestWarning::NonFiniteWeight {
                    edge: edge.index,
                    issue,
                });
                0.0
            }
        };
        edges.push(NormalizedEdge {
            index: edge.index,
            source,
            target,
            weight,
        });
    }

    for warning in &warnings {
        let ForestWarning::NonFiniteWeight { edge, issue } = warning;
        warn!(
            edge = *edge,
            issue = issue.as_str(),
            code = warning.code().as_str(),
            "edge weight is not finite; treating it as zero"
        );
    }

    Ok(NormalizedGraph {
        nodes: &graph.nodes,
        edges,
        warnings,
    })
}

fn index_nodes<Id: NodeKey>(nodes: &[Id]) -> Result<HashMap<&Id, usize>> {
    let mut positions = HashMap::with_capacity(nodes.len());
    for (position, id) in nodes.iter().enumerate() {
        if positions.insert(id, position).is_some() {
            return Err(ForestError::DuplicateNodeId {
                node: Arc::from(id.to_string()),
            });
        }
    }
    Ok(positions)
}

fn resolve<Id: NodeKey>(positions: &HashMap<&Id, usize>, edge: usize, node: &Id) -> Result<usize> {
    positions
        .get(node)
        .copied()
        .ok_or_else(|| ForestError::InvalidEdgeReference {
            edge,
            node: Arc::from(node.to_string()),
        })
}

/// Folds `-0.0` onto `0.0` so both compare equal under `total_cmp`.
fn canonical_zero(weight: f64) -> f64 {
    if weight == 0.0 { 0.0 } else { weight }
}
