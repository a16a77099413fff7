use std::collections::HashSet;

use nalgebra::Vector3;

use crate::EdgeId;

/// Unique key of a vertex, supplied by the caller.
pub type VertexId = String;

/// Display attributes of a vertex.
///
/// Stored for the rendering collaborator, never interpreted by the
/// simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexStyle {
    pub color: String,
    pub size: f64,
}

impl Default for VertexStyle {
    fn default() -> Self {
        Self {
            color: "darkblue".to_owned(),
            size: 0.5,
        }
    }
}

/// A simulated point mass.
///
/// Position and velocity are updated in place by each simulation tick;
/// `edges` tracks the ids of all edges incident to this vertex and is
/// maintained by the graph's add/remove operations.
#[derive(Clone, Debug)]
pub struct Vertex {
    id: VertexId,
    pub(crate) position: Vector3<f64>,
    pub(crate) velocity: Vector3<f64>,
    style: VertexStyle,
    pub(crate) edges: HashSet<EdgeId>,
}

impl Vertex {
    pub(crate) fn new(id: VertexId, position: Vector3<f64>, style: VertexStyle) -> Self {
        Self {
            id,
            position,
            velocity: Vector3::zeros(),
            style,
            edges: HashSet::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    #[must_use]
    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    #[must_use]
    pub fn style(&self) -> &VertexStyle {
        &self.style
    }

    /// Ids of all edges incident to this vertex.
    pub fn edges(&self) -> impl Iterator<Item = &str> {
        self.edges.iter().map(String::as_str)
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}
