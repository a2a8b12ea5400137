//! Error and warning types for the maxforest core library.
//!
//! Fatal conditions are reported through [`ForestError`]; data-quality issues
//! that the pipeline tolerates are surfaced as [`ForestWarning`] values on the
//! result. Both carry stable machine-readable codes.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this value."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Reason an edge weight could not be used as supplied.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WeightIssue {
    /// The edge carried no weight at all.
    Missing,
    /// The weight was NaN.
    NotANumber,
    /// The weight was positive or negative infinity.
    Infinite,
}

impl WeightIssue {
    /// Classifies `weight`, returning `None` when it is a usable finite value.
    ///
    /// # Examples
    /// ```
    /// use maxforest_core::WeightIssue;
    ///
    /// assert_eq!(WeightIssue::classify(Some(2.5)), None);
    /// assert_eq!(WeightIssue::classify(None), Some(WeightIssue::Missing));
    /// assert_eq!(WeightIssue::classify(Some(f64::NAN)), Some(WeightIssue::NotANumber));
    /// assert_eq!(
    ///     WeightIssue::classify(Some(f64::NEG_INFINITY)),
    ///     Some(WeightIssue::Infinite),
    /// );
    /// ```
    #[must_use]
    pub fn classify(weight: Option<f64>) -> Option<Self> {
        match weight {
            None => Some(Self::Missing),
            Some(value) if value.is_nan() => Some(Self::NotANumber),
            Some(value) if value.is_infinite() => Some(Self::Infinite),
            Some(_) => None,
        }
    }

    /// Returns a short lowercase label used in logs and rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::NotANumber => "nan",
            Self::Infinite => "infinite",
        }
    }
}

impl fmt::Display for WeightIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced when configuring or running [`crate::MaxForest`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ForestError {
    /// An edge referenced a node id that is absent from the node collection.
    #[error("edge {edge} references unknown node `{node}`")]
    InvalidEdgeReference {
        /// Caller-visible index of the offending edge.
        edge: usize,
        /// Rendered identifier of the missing node.
        node: Arc<str>,
    },
    /// The node collection listed the same identifier twice.
    #[error("node `{node}` appears more than once in the node collection")]
    DuplicateNodeId {
        /// Rendered identifier of the repeated node.
        node: Arc<str>,
    },
    /// Two edges shared the same caller-visible index.
    #[error("edge index {edge} is used by more than one edge")]
    DuplicateEdgeIndex {
        /// The repeated edge index.
        edge: usize,
    },
    /// An edge weight was unusable and the configuration rejects such edges.
    #[error("edge {edge} has a {issue} weight")]
    NonFiniteWeight {
        /// Caller-visible index of the offending edge.
        edge: usize,
        /// Why the weight was rejected.
        issue: WeightIssue,
    },
    /// A disjoint-set operation referenced a node that was never registered.
    ///
    /// Input validation prevents this; seeing it indicates an internal defect.
    #[error("disjoint set has no entry for node `{node}`")]
    UnknownNode {
        /// Rendered identifier of the unregistered node.
        node: Arc<str>,
    },
    /// The parallel sort threshold must be at least one edge.
    #[error("parallel_sort_threshold must be at least 1 (got {got})")]
    InvalidParallelThreshold {
        /// The invalid threshold supplied by the caller.
        got: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
}

define_codes! {
    /// Stable codes describing [`ForestError`] variants.
    enum ForestErrorCode for ForestError {
        /// An edge referenced an unknown node id.
        InvalidEdgeReference => InvalidEdgeReference { .. } => "MAXFOREST_INVALID_EDGE_REFERENCE",
        /// A node id appeared twice.
        DuplicateNodeId => DuplicateNodeId { .. } => "MAXFOREST_DUPLICATE_NODE_ID",
        /// An edge index appeared twice.
        DuplicateEdgeIndex => DuplicateEdgeIndex { .. } => "MAXFOREST_DUPLICATE_EDGE_INDEX",
        /// An unusable weight was rejected.
        NonFiniteWeight => NonFiniteWeight { .. } => "MAXFOREST_NON_FINITE_WEIGHT",
        /// A disjoint-set lookup missed.
        UnknownNode => UnknownNode { .. } => "MAXFOREST_UNKNOWN_NODE",
        /// The parallel sort threshold was zero.
        InvalidParallelThreshold => InvalidParallelThreshold { .. } => "MAXFOREST_INVALID_PARALLEL_THRESHOLD",
        /// The execution strategy is not compiled in.
        BackendUnavailable => BackendUnavailable { .. } => "MAXFOREST_BACKEND_UNAVAILABLE",
    }
}

/// Non-fatal condition recorded while computing a forest.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ForestWarning {
    /// An edge weight was absent or non-finite and was replaced with zero.
    NonFiniteWeight {
        /// Caller-visible index of the affected edge.
        edge: usize,
        /// Why the weight was replaced.
        issue: WeightIssue,
    },
}

impl fmt::Display for ForestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteWeight { edge, issue } => {
                write!(f, "edge {edge} has a {issue} weight; treated as 0")
            }
        }
    }
}

define_codes! {
    /// Stable codes describing [`ForestWarning`] variants.
    enum ForestWarningCode for ForestWarning {
        /// A weight was replaced with zero.
        NonFiniteWeight => NonFiniteWeight { .. } => "MAXFOREST_NON_FINITE_WEIGHT",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ForestError>;
