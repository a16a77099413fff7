/// Tuning parameters for the force simulation.
///
/// Each [`crate::Graph`] owns one `Settings` value; it is read by every
/// force computation and never changes during a run.
///
/// # Builder Pattern
/// ```
/// use fourd::Settings;
///
/// let settings = Settings::default()
///     .with_repulsion(5e-2)
///     .with_friction(0.9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    /// Scalar coefficient for the pairwise repulsive force.
    pub repulsion: f64,
    /// Small positive value added to distances to avoid division by zero.
    pub epsilon: f64,
    /// Scalar coefficient for the spring force along edges.
    pub attraction: f64,
    /// Distance threshold below which the spatial tree keeps a vertex
    /// in a node's inner list instead of routing it into an octant.
    pub inner_distance: f64,
    /// Fraction of the net force removed each tick, in `[0, 1]`.
    pub friction: f64,
}

impl Settings {
    pub fn with_repulsion(mut self, repulsion: f64) -> Self {
        self.repulsion = repulsion;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_attraction(mut self, attraction: f64) -> Self {
        self.attraction = attraction;
        self
    }

    pub fn with_inner_distance(mut self, inner_distance: f64) -> Self {
        self.inner_distance = inner_distance;
        self
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repulsion: 1e-2,
            epsilon: 1e-6,
            attraction: 1e-2,
            inner_distance: 1e1,
            friction: 0.75,
        }
    }
}
