use thiserror::Error;

use crate::{EdgeId, VertexId};

/// Errors returned by graph mutations.
///
/// All of these are local and recoverable: a failed mutation leaves the
/// graph in its previous consistent state. Numeric degeneracy (near-zero
/// distances between vertices) is never an error; it is absorbed by
/// [`Settings::epsilon`](crate::Settings::epsilon).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex `{0}` not found")]
    VertexNotFound(VertexId),

    #[error("edge `{0}` not found")]
    EdgeNotFound(EdgeId),

    #[error("vertex `{0}` already exists")]
    DuplicateVertex(VertexId),

    #[error("edge `{0}` already exists")]
    DuplicateEdge(EdgeId),

    #[error("layout loop is already running")]
    LayoutRunning,
}
