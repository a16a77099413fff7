//! Pure force kernels shared by the spatial tree and the simulation tick.

use nalgebra::Vector3;

use crate::Settings;

/// Repulsive force exerted on the vertex at `on` by the vertex at `from`.
///
/// The formula is `diff * |diff| * repulsion / (epsilon + |diff|)^2`,
/// an inverse-distance repulsion scaled by the raw separation. `epsilon`
/// keeps the force finite for near-coincident vertices; exactly coincident
/// vertices produce a zero force since the direction is undefined.
pub fn repulsion(on: Vector3<f64>, from: Vector3<f64>, settings: &Settings) -> Vector3<f64> {
    let diff = on - from;
    let dist = diff.norm();
    diff * dist * settings.repulsion / (settings.epsilon + dist).powi(2)
}

/// Spring force exerted on an edge's source vertex; the target receives
/// the negation.
pub fn attraction(
    source: Vector3<f64>,
    target: Vector3<f64>,
    attraction: f64,
    strength: f64,
) -> Vector3<f64> {
    -(source - target) * attraction * strength
}

/// Friction damping applied to the net force before integration.
pub fn damp(force: Vector3<f64>, friction: f64) -> Vector3<f64> {
    force * (1.0 - friction)
}

/// Exact net repulsion on `positions[index]` from every other position.
///
/// This is the O(n²) reference the spatial tree's estimate approximates.
/// Tests and benches use it to validate the tree; the simulation tick
/// does not call it.
#[must_use]
pub fn net_repulsion(index: usize, positions: &[Vector3<f64>], settings: &Settings) -> Vector3<f64> {
    let on = positions[index];
    positions
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, from)| repulsion(on, *from, settings))
        .sum()
}
