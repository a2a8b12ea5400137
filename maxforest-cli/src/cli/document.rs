//! JSON documents read and written by the CLI.
//!
//! Input is a [`GraphDocument`]; output is the serialized [`ForestReport`]
//! built from a computed forest.

use maxforest_core::{EdgeRecord, ForestResult, GraphSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Graph snapshot as stored on disk.
///
/// # Examples
/// ```
/// use maxforest_cli::cli::GraphDocument;
///
/// let document: GraphDocument = serde_json::from_str(
///     r#"{"nodes": [{"id": "A"}, {"id": "B"}], "edges": [{"source": "A", "target": "B", "weight": 2}]}"#,
/// )?;
/// assert_eq!(document.nodes.len(), 2);
/// assert_eq!(document.edges[0].weight(), Some(2.0));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphDocument {
    /// Nodes in caller order.
    #[serde(default)]
    pub nodes: Vec<NodeDocument>,
    /// Edges in caller order.
    #[serde(default)]
    pub edges: Vec<EdgeDocument>,
}

/// A node entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeDocument {
    /// Node identifier.
    pub id: String,
}

/// An edge entry.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeDocument {
    /// Source node identifier.
    pub source: String,
    /// Target node identifier.
    pub target: String,
    /// Raw weight; anything other than a JSON number counts as absent.
    #[serde(default)]
    pub weight: Option<Value>,
    /// Caller-visible edge index; positions are used when every edge omits it.
    #[serde(default)]
    pub index: Option<usize>,
}

impl EdgeDocument {
    /// Returns the numeric weight, or `None` when it is missing, `null`, or
    /// not a number.
    #[must_use]
    pub fn weight(&self) -> Option<f64> {
        self.weight.as_ref().and_then(Value::as_f64)
    }
}

impl GraphDocument {
    /// Converts the document into a snapshot.
    ///
    /// Returns `None` when some edges carry an `index` and others do not.
    #[must_use]
    pub fn into_snapshot(self) -> Option<GraphSnapshot<String>> {
        let GraphDocument { nodes, edges } = self;
        let nodes = nodes.into_iter().map(|node| node.id);
        let explicit = edges.iter().filter(|edge| edge.index.is_some()).count();

        if explicit == 0 {
            return Some(GraphSnapshot::with_positional_edges(
                nodes,
                edges.into_iter().map(|edge| {
                    let weight = edge.weight();
                    (edge.source, edge.target, weight)
                }),
            ));
        }
        if explicit != edges.len() {
            return None;
        }

        let records: Vec<EdgeRecord<String>> = edges
            .into_iter()
            .filter_map(|edge| {
                let weight = edge.weight();
                let index = edge.index?;
                Some(EdgeRecord::with_optional_weight(index, edge.source, edge.target, weight))
            })
            .collect();
        Some(GraphSnapshot::new(nodes, records))
    }
}

/// Serializable view of a computed forest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ForestReport {
    pub(crate) source: String,
    pub(crate) tree_count: usize,
    pub(crate) selected_edge_count: usize,
    pub(crate) total_weight: f64,
    pub(crate) trees: Vec<TreeReport>,
    pub(crate) nodes: Vec<NodeReport>,
    pub(crate) edges: Vec<EdgeReport>,
    pub(crate) warnings: Vec<WarningReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TreeReport {
    pub(crate) id: usize,
    pub(crate) root: String,
    pub(crate) node_count: usize,
    pub(crate) edge_count: usize,
    pub(crate) height: usize,
    pub(crate) weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NodeReport {
    pub(crate) id: String,
    pub(crate) tree: Option<usize>,
    pub(crate) rank: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EdgeReport {
    pub(crate) index: usize,
    pub(crate) source: String,
    pub(crate) target: String,
    pub(crate) weight: Option<f64>,
    pub(crate) is_tree_edge: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WarningReport {
    pub(crate) code: &'static str,
    pub(crate) message: String,
}

impl ForestReport {
    /// Joins the snapshot with its result in caller order.
    pub(crate) fn new(
        source: &str,
        graph: &GraphSnapshot<String>,
        result: &ForestResult<String>,
    ) -> Self {
        let trees = result
            .trees()
            .iter()
            .map(|tree| TreeReport {
                id: tree.id().get(),
                root: tree.root().clone(),
                node_count: tree.node_count(),
                edge_count: tree.edge_count(),
                height: tree.height(),
                weight: tree.weight(),
            })
            .collect();
        let nodes = graph
            .nodes()
            .iter()
            .map(|id| NodeReport {
                id: id.clone(),
                tree: result.tree(id).map(|tree| tree.get()),
                rank: result.rank(id),
            })
            .collect();
        let edges = graph
            .edges()
            .iter()
            .map(|edge| EdgeReport {
                index: edge.index(),
                source: edge.source().clone(),
                target: edge.target().clone(),
                weight: edge.weight().filter(|weight| weight.is_finite()),
                is_tree_edge: result.is_tree_edge(edge.index()),
            })
            .collect();
        let warnings = result
            .warnings()
            .iter()
            .map(|warning| WarningReport {
                code: warning.code().as_str(),
                message: warning.to_string(),
            })
            .collect();

        Self {
            source: source.to_owned(),
            tree_count: result.tree_count(),
            selected_edge_count: result.selected_edge_indices().len(),
            total_weight: result.total_weight(),
            trees,
            nodes,
            edges,
            warnings,
        }
    }
}
