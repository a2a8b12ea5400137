//! Maximum-weight spanning forests with deterministic root and rank
//! assignment.
//!
//! Hand a [`GraphSnapshot`] to [`MaxForest::compute`] (or the
//! [`compute_maximum_spanning_forest`] shorthand) to obtain a
//! [`ForestResult`]: which edges form the forest, which node roots each tree,
//! and a rank per node that is highest at the root and never increases away
//! from it.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod disjoint_set;
mod error;
mod forest;
mod maxforest;
mod rank;
mod result;
mod snapshot;

pub use crate::{
    builder::{
        DEFAULT_PARALLEL_SORT_THRESHOLD, ExecutionStrategy, MaxForestBuilder,
        NonFiniteWeightPolicy,
    },
    disjoint_set::DisjointSet,
    error::{ForestError, ForestErrorCode, ForestWarning, ForestWarningCode, Result, WeightIssue},
    maxforest::{MaxForest, compute_maximum_spanning_forest},
    result::{EdgeFlag, ForestResult, TreeId, TreeSummary},
    snapshot::{EdgeRecord, GraphSnapshot, NodeKey},
};
