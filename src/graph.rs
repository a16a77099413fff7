//! The mutable graph and its simulation tick.
//!
//! All vertex/edge state lives in [`GraphState`] behind one mutex. Every
//! mutation and every tick takes the lock for its whole duration, so the
//! layout loop never observes a partially applied mutation and vice versa.

use std::{collections::HashMap, sync::Arc, time::Duration};

use nalgebra::Vector3;
use parking_lot::Mutex;
use rand::Rng;
use tracing::{debug, trace};

use crate::{
    forces,
    layout::LayoutHandle,
    tree::SpatialTree,
    Edge, EdgeId, EdgeStyle, GraphError, Settings, Vertex, VertexId, VertexStyle,
};

#[derive(Debug, Default)]
pub(crate) struct GraphState {
    vertices: HashMap<VertexId, Vertex>,
    edges: HashMap<EdgeId, Edge>,
}

impl GraphState {
    fn add_vertex(
        &mut self,
        id: VertexId,
        position: Vector3<f64>,
        style: VertexStyle,
    ) -> Result<(), GraphError> {
        if self.vertices.contains_key(&id) {
            return Err(GraphError::DuplicateVertex(id));
        }
        self.vertices
            .insert(id.clone(), Vertex::new(id, position, style));
        Ok(())
    }

    fn add_edge(
        &mut self,
        id: EdgeId,
        source: VertexId,
        target: VertexId,
        strength: f64,
        style: EdgeStyle,
    ) -> Result<(), GraphError> {
        if self.edges.contains_key(&id) {
            return Err(GraphError::DuplicateEdge(id));
        }
        let source_position = self
            .vertices
            .get(&source)
            .ok_or_else(|| GraphError::VertexNotFound(source.clone()))?
            .position;
        let target_position = self
            .vertices
            .get(&target)
            .ok_or_else(|| GraphError::VertexNotFound(target.clone()))?
            .position;

        if let Some(vertex) = self.vertices.get_mut(&source) {
            vertex.edges.insert(id.clone());
        }
        if let Some(vertex) = self.vertices.get_mut(&target) {
            vertex.edges.insert(id.clone());
        }
        self.edges.insert(
            id.clone(),
            Edge::new(
                id,
                source,
                target,
                strength,
                style,
                (source_position, target_position),
            ),
        );
        Ok(())
    }

    fn remove_vertex(&mut self, id: &str) -> Result<(), GraphError> {
        let vertex = self
            .vertices
            .remove(id)
            .ok_or_else(|| GraphError::VertexNotFound(id.to_owned()))?;

        // The vertex record is already out of the map, so its edge set is a
        // stable snapshot of the ids to cascade over.
        for edge_id in &vertex.edges {
            if let Some(edge) = self.edges.remove(edge_id) {
                let other = if edge.source() == id {
                    edge.target()
                } else {
                    edge.source()
                };
                if let Some(endpoint) = self.vertices.get_mut(other) {
                    endpoint.edges.remove(edge_id);
                }
            }
        }
        Ok(())
    }

    fn remove_edge(&mut self, id: &str) -> Result<(), GraphError> {
        let edge = self
            .edges
            .remove(id)
            .ok_or_else(|| GraphError::EdgeNotFound(id.to_owned()))?;

        for endpoint in [edge.source(), edge.target()] {
            if let Some(vertex) = self.vertices.get_mut(endpoint) {
                vertex.edges.remove(id);
            }
        }
        Ok(())
    }

    /// One simulation tick: rebuild the spatial tree, accumulate repulsion
    /// and attraction, damp, integrate, refresh edge endpoint caches.
    pub(crate) fn step(&mut self, settings: &Settings) {
        trace!(
            vertices = self.vertices.len(),
            edges = self.edges.len(),
            "tick"
        );

        let snapshot: Vec<(VertexId, Vector3<f64>)> = self
            .vertices
            .iter()
            .map(|(id, vertex)| (id.clone(), vertex.position))
            .collect();

        let tree = SpatialTree::from_members(
            *settings,
            snapshot.iter().map(|(id, position)| (id.as_str(), *position)),
        );

        let mut net: HashMap<&str, Vector3<f64>> = snapshot
            .iter()
            .zip(estimate_all(&tree, &snapshot))
            .map(|((id, _), force)| (id.as_str(), force))
            .collect();

        for edge in self.edges.values() {
            let (Some(source), Some(target)) = (
                self.vertices.get(edge.source()),
                self.vertices.get(edge.target()),
            ) else {
                continue;
            };
            let force = forces::attraction(
                source.position,
                target.position,
                settings.attraction,
                edge.strength(),
            );
            if let Some(accumulator) = net.get_mut(edge.source()) {
                *accumulator += force;
            }
            if let Some(accumulator) = net.get_mut(edge.target()) {
                *accumulator -= force;
            }
        }

        for (id, vertex) in &mut self.vertices {
            let Some(force) = net.get(id.as_str()) else {
                continue;
            };
            vertex.velocity += forces::damp(*force, settings.friction);
            let velocity = vertex.velocity;
            vertex.position += velocity;
        }

        let Self { vertices, edges } = self;
        for edge in edges.values_mut() {
            if let (Some(source), Some(target)) = (
                vertices.get(edge.source()),
                vertices.get(edge.target()),
            ) {
                edge.endpoints = (source.position, target.position);
            }
        }
    }
}

#[cfg(feature = "rayon")]
fn estimate_all(
    tree: &SpatialTree<'_>,
    snapshot: &[(VertexId, Vector3<f64>)],
) -> Vec<Vector3<f64>> {
    use rayon::prelude::*;

    snapshot
        .par_iter()
        .map(|(id, position)| tree.estimate(id, *position))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn estimate_all(
    tree: &SpatialTree<'_>,
    snapshot: &[(VertexId, Vector3<f64>)],
) -> Vec<Vector3<f64>> {
    snapshot
        .iter()
        .map(|(id, position)| tree.estimate(id, *position))
        .collect()
}

/// A force-directed graph and its layout simulation.
///
/// Vertices repel each other pairwise, edges pull their endpoints together,
/// and a damped explicit-Euler step integrates the net force once per tick.
/// The tick loop can run on a background thread ([`Graph::start_layout`])
/// while callers keep mutating the graph, or be driven manually with
/// [`Graph::step`].
///
/// ```
/// use fourd::{Graph, Settings, VertexStyle, EdgeStyle};
///
/// let graph = Graph::new(Settings::default());
/// graph.add_vertex("a", VertexStyle::default()).unwrap();
/// graph.add_vertex("b", VertexStyle::default()).unwrap();
/// graph.add_edge("a-b", "a", "b", 1.0, EdgeStyle::default()).unwrap();
/// graph.step();
/// ```
#[derive(Debug)]
pub struct Graph {
    state: Arc<Mutex<GraphState>>,
    settings: Settings,
    layout: Option<LayoutHandle>,
}

impl Graph {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            state: Arc::new(Mutex::new(GraphState::default())),
            settings,
            layout: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Add a vertex at a uniformly random position in the unit cube.
    ///
    /// Fails with [`GraphError::DuplicateVertex`] if the id is taken.
    pub fn add_vertex(
        &self,
        id: impl Into<VertexId>,
        style: VertexStyle,
    ) -> Result<VertexId, GraphError> {
        let mut rng = rand::thread_rng();
        let position = Vector3::new(rng.gen(), rng.gen(), rng.gen());
        self.add_vertex_at(id, position, style)
    }

    /// Add a vertex at a caller-fixed position.
    pub fn add_vertex_at(
        &self,
        id: impl Into<VertexId>,
        position: Vector3<f64>,
        style: VertexStyle,
    ) -> Result<VertexId, GraphError> {
        let id = id.into();
        self.state.lock().add_vertex(id.clone(), position, style)?;
        debug!(vertex = %id, "vertex added");
        Ok(id)
    }

    /// Add a spring between two existing vertices.
    ///
    /// Fails with [`GraphError::VertexNotFound`] if either endpoint is
    /// absent and [`GraphError::DuplicateEdge`] if the id is taken.
    /// Self-loops are accepted; their spring force is identically zero.
    pub fn add_edge(
        &self,
        id: impl Into<EdgeId>,
        source: impl Into<VertexId>,
        target: impl Into<VertexId>,
        strength: f64,
        style: EdgeStyle,
    ) -> Result<EdgeId, GraphError> {
        let id = id.into();
        self.state
            .lock()
            .add_edge(id.clone(), source.into(), target.into(), strength, style)?;
        debug!(edge = %id, "edge added");
        Ok(id)
    }

    /// Remove a vertex and every edge referencing it.
    pub fn remove_vertex(&self, id: &str) -> Result<(), GraphError> {
        self.state.lock().remove_vertex(id)?;
        debug!(vertex = id, "vertex removed");
        Ok(())
    }

    /// Remove an edge, detaching it from both endpoints.
    pub fn remove_edge(&self, id: &str) -> Result<(), GraphError> {
        self.state.lock().remove_edge(id)?;
        debug!(edge = id, "edge removed");
        Ok(())
    }

    /// Snapshot of a vertex record.
    #[must_use]
    pub fn vertex(&self, id: &str) -> Option<Vertex> {
        self.state.lock().vertices.get(id).cloned()
    }

    /// Snapshot of an edge record.
    #[must_use]
    pub fn edge(&self, id: &str) -> Option<Edge> {
        self.state.lock().edges.get(id).cloned()
    }

    #[must_use]
    pub fn vertex_position(&self, id: &str) -> Option<Vector3<f64>> {
        self.state.lock().vertices.get(id).map(|v| v.position)
    }

    /// Cached `(source, target)` endpoint positions of an edge.
    #[must_use]
    pub fn edge_endpoints(&self, id: &str) -> Option<(Vector3<f64>, Vector3<f64>)> {
        self.state.lock().edges.get(id).map(|e| e.endpoints)
    }

    /// Bulk position snapshot for renderers.
    #[must_use]
    pub fn positions(&self) -> Vec<(VertexId, Vector3<f64>)> {
        self.state
            .lock()
            .vertices
            .iter()
            .map(|(id, vertex)| (id.clone(), vertex.position))
            .collect()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.state.lock().vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.state.lock().edges.len()
    }

    /// Run exactly one simulation tick synchronously.
    pub fn step(&self) {
        self.state.lock().step(&self.settings);
    }

    /// Spawn the background layout loop, ticking at `interval`.
    ///
    /// Fails with [`GraphError::LayoutRunning`] if the loop is already
    /// running; stop it first with [`Graph::stop_layout`].
    pub fn start_layout(&mut self, interval: Duration) -> Result<(), GraphError> {
        if self.layout.is_some() {
            return Err(GraphError::LayoutRunning);
        }
        self.layout = Some(LayoutHandle::spawn(
            Arc::clone(&self.state),
            self.settings,
            interval,
        ));
        Ok(())
    }

    /// Signal the layout loop to stop and wait for it to finish.
    ///
    /// A no-op when the loop is not running.
    pub fn stop_layout(&mut self) {
        if let Some(handle) = self.layout.take() {
            handle.stop();
        }
    }

    #[must_use]
    pub fn is_layout_running(&self) -> bool {
        self.layout.is_some()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Drop for Graph {
    fn drop(&mut self) {
        self.stop_layout();
    }
}
