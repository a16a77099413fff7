use nalgebra::Vector3;

use crate::VertexId;

/// Unique key of an edge, supplied by the caller.
pub type EdgeId = String;

/// Display attributes of an edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
    pub color: String,
    pub line_width: f64,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            color: "darkred".to_owned(),
            line_width: 1.0,
        }
    }
}

/// A directed spring between two vertices.
///
/// The `endpoints` pair caches the current positions of the two vertices;
/// it is refreshed at the end of every tick so renderers can read it
/// without walking the vertex map.
#[derive(Clone, Debug)]
pub struct Edge {
    id: EdgeId,
    source: VertexId,
    target: VertexId,
    strength: f64,
    style: EdgeStyle,
    pub(crate) endpoints: (Vector3<f64>, Vector3<f64>),
}

impl Edge {
    pub(crate) fn new(
        id: EdgeId,
        source: VertexId,
        target: VertexId,
        strength: f64,
        style: EdgeStyle,
        endpoints: (Vector3<f64>, Vector3<f64>),
    ) -> Self {
        Self {
            id,
            source,
            target,
            strength,
            style,
            endpoints,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Positive multiplier on the spring force.
    #[must_use]
    pub fn strength(&self) -> f64 {
        self.strength
    }

    #[must_use]
    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }

    /// Current cached endpoint positions, `(source, target)`.
    #[must_use]
    pub fn endpoints(&self) -> (Vector3<f64>, Vector3<f64>) {
        self.endpoints
    }
}
