use thiserror::Error;

use crate::graphs::{Distance, Weight};

/// Structural errors, raised when a graph is built or a search is started.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("invalid graph: {reason}")]
    InvalidGraph { reason: String },

    #[error("unknown node {node}")]
    UnknownNode { node: String },

    #[error("negative weight {weight} on edge {tail} -> {head}")]
    NegativeWeight {
        tail: String,
        head: String,
        weight: Weight,
    },
}

impl GraphError {
    pub(crate) fn unknown_node<V: std::fmt::Debug>(node: &V) -> GraphError {
        GraphError::UnknownNode {
            node: format!("{:?}", node),
        }
    }
}

/// Errors of the graph file loader.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("unsupported graph file extension {extension:?}")]
    UnknownExtension { extension: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Reasons a path does not answer a shortest path test case.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("wrong path distance: expected {expected}, got {actual}")]
    WrongDistance { expected: Distance, actual: Distance },

    #[error("path distance {actual} is below the optimum {expected}")]
    BelowOptimum { expected: Distance, actual: Distance },

    #[error("path is empty")]
    EmptyPath,

    #[error("first vertex of path is not source of request")]
    WrongSource,

    #[error("last vertex of path is not target of request")]
    WrongTarget,

    #[error("no edge between {tail} and {head} found")]
    MissingEdge { tail: String, head: String },

    #[error("a path was found where there should be none")]
    UnexpectedPath,

    #[error("no path is found but there should be one")]
    MissingPath,

    #[error(transparent)]
    Graph(#[from] GraphError),
}
