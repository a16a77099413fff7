//! Dynamic 3D force-directed graph layout engine.
//!
//! Vertices are point masses that repel each other pairwise; edges are
//! springs pulling their endpoints together. Each tick rebuilds a
//! Barnes-Hut-style [`SpatialTree`] to estimate repulsion, adds spring
//! attraction per edge, damps the net force by a friction fraction, and
//! integrates with an explicit Euler step of implicit unit timestep. The
//! loop can run on a background thread while the graph is mutated from
//! outside; rendering is left entirely to the host, which reads vertex
//! positions and cached edge endpoints.
//!
//! ```
//! use std::time::Duration;
//!
//! use fourd::{EdgeStyle, Graph, Settings, VertexStyle};
//!
//! let mut graph = Graph::new(Settings::default());
//! graph.add_vertex("a", VertexStyle::default()).unwrap();
//! graph.add_vertex("b", VertexStyle::default()).unwrap();
//! graph.add_edge("a-b", "a", "b", 1.0, EdgeStyle::default()).unwrap();
//!
//! graph.start_layout(Duration::from_millis(30)).unwrap();
//! // ... renderer polls graph.positions() ...
//! graph.stop_layout();
//! ```

pub mod edge;
pub mod error;
pub mod forces;
pub mod graph;
mod layout;
pub mod settings;
pub mod tree;
pub mod vertex;

pub use edge::{Edge, EdgeId, EdgeStyle};
pub use error::GraphError;
pub use graph::Graph;
pub use settings::Settings;
pub use tree::SpatialTree;
pub use vertex::{Vertex, VertexId, VertexStyle};
