use std::io;

use thiserror::Error;

use crate::graph::Vertex;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Everything that can go wrong while loading matrices, building graphs
/// or running an analysis on them.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid vertex count {0}")]
    InvalidSize(i64),

    #[error("vertex {vertex} out of range for a graph with {vertex_count} vertices")]
    OutOfRange { vertex: Vertex, vertex_count: usize },

    #[error("malformed adjacency matrix: {reason}")]
    MalformedMatrix { index: Option<usize>, reason: String },

    #[error("cannot parse `{token}` as integer at input line {line}")]
    Parse { line: usize, token: String },

    #[error("unsupported file `{0}`, the supported formats are `.txt.gz` and `.txt`")]
    UnsupportedFormat(String),

    #[error("no matrix selected")]
    NoSelection,

    #[error("invalid matrix number {index}, {count} matrices are loaded")]
    InvalidSelection { index: usize, count: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl GraphError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        GraphError::MalformedMatrix { index: None, reason: reason.into() }
    }

    /// Attaches the position of the offending matrix within its set.
    pub(crate) fn at_matrix(self, i: usize) -> Self {
        match self {
            GraphError::MalformedMatrix { reason, .. } => GraphError::MalformedMatrix { index: Some(i), reason },
            other => other,
        }
    }
}
