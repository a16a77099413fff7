//! Barnes-Hut-style octree over a per-tick snapshot of vertex positions.
//!
//! The tree is rebuilt from scratch every simulation tick and borrows the
//! snapshot it is built from; it carries no identity across ticks.

use std::collections::{HashMap, HashSet};

use nalgebra::Vector3;

use crate::{forces, Settings};

/// Octant label relative to a node's routing centroid, one half per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Octant {
    x: bool,
    y: bool,
    z: bool,
}

impl Octant {
    fn locate(center: &Vector3<f64>, position: &Vector3<f64>) -> Self {
        Self {
            x: center.x < position.x,
            y: center.y < position.y,
            z: center.z < position.z,
        }
    }
}

/// A recursive spatial grouping of vertices.
///
/// Each node keeps an *inner* list of vertices close to the running
/// centroid of that list, and routes more distant vertices into up to
/// eight octant subtrees. [`SpatialTree::estimate`] then answers repulsion
/// queries with exact pairwise forces inside the inner list holding the
/// queried vertex and centroid-cluster approximations for everything else.
#[derive(Clone, Debug)]
pub struct SpatialTree<'a> {
    settings: Settings,
    inners: Vec<(&'a str, Vector3<f64>)>,
    outers: HashMap<Octant, SpatialTree<'a>>,
    members: HashSet<&'a str>,
    position_sum: Vector3<f64>,
    count: usize,
}

impl<'a> SpatialTree<'a> {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            inners: Vec::new(),
            outers: HashMap::new(),
            members: HashSet::new(),
            position_sum: Vector3::zeros(),
            count: 0,
        }
    }

    /// Build a tree from an id/position snapshot.
    #[must_use]
    pub fn from_members(
        settings: Settings,
        members: impl IntoIterator<Item = (&'a str, Vector3<f64>)>,
    ) -> Self {
        let mut tree = Self::new(settings);
        for (id, position) in members {
            tree.insert(id, position);
        }
        tree
    }

    /// Insert a vertex snapshot.
    ///
    /// The first vertex becomes the node's first inner member. Afterwards,
    /// vertices within `inner_distance` of the running centroid of the
    /// inner list join it; anything farther is routed into the subtree for
    /// its octant, created on first use.
    pub fn insert(&mut self, id: &'a str, position: Vector3<f64>) {
        if self.inners.is_empty() {
            self.inners.push((id, position));
        } else {
            let center = self.inner_centroid();
            if (position - center).norm() < self.settings.inner_distance {
                self.inners.push((id, position));
            } else {
                let octant = Octant::locate(&center, &position);
                self.outers
                    .entry(octant)
                    .or_insert_with(|| SpatialTree::new(self.settings))
                    .insert(id, position);
            }
        }

        self.members.insert(id);
        self.position_sum += position;
        self.count += 1;
    }

    /// Total number of vertices in this subtree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Net repulsive force the tree estimates for the given vertex.
    ///
    /// Inside the inner list that holds the vertex, every co-member
    /// contributes an exact pairwise force. Every other subtree, and the
    /// inner list of every node passed through on the way down, is
    /// approximated as a single cluster at its position centroid weighted
    /// by its member count.
    #[must_use]
    pub fn estimate(&self, id: &str, position: Vector3<f64>) -> Vector3<f64> {
        let mut force = Vector3::zeros();

        if self.inners.iter().any(|(inner, _)| *inner == id) {
            for (other, p) in &self.inners {
                if *other != id {
                    force += forces::repulsion(position, *p, &self.settings);
                }
            }
            for subtree in self.outers.values() {
                force += subtree.cluster_force(position);
            }
        } else {
            force += self.inner_cluster_force(position);
            for subtree in self.outers.values() {
                if subtree.contains(id) {
                    force += subtree.estimate(id, position);
                } else {
                    force += subtree.cluster_force(position);
                }
            }
        }

        force
    }

    /// Routing centroid: the mean position of this node's inner members.
    fn inner_centroid(&self) -> Vector3<f64> {
        if self.inners.is_empty() {
            return Vector3::zeros();
        }
        self.inners.iter().map(|(_, p)| p).sum::<Vector3<f64>>() / self.inners.len() as f64
    }

    /// Approximate this whole subtree as one cluster at its centroid.
    fn cluster_force(&self, position: Vector3<f64>) -> Vector3<f64> {
        if self.count == 0 {
            return Vector3::zeros();
        }
        let center = self.position_sum / self.count as f64;
        forces::repulsion(position, center, &self.settings) * self.count as f64
    }

    /// Approximate this node's inner list alone as one cluster.
    fn inner_cluster_force(&self, position: Vector3<f64>) -> Vector3<f64> {
        if self.inners.is_empty() {
            return Vector3::zeros();
        }
        forces::repulsion(position, self.inner_centroid(), &self.settings)
            * self.inners.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;

    use super::*;
    use crate::forces::net_repulsion;

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn close_vertices_stay_inner() {
        // All five fall within inner_distance (10) of the running centroid.
        let positions = [
            Vector3::zeros(),
            Vector3::new(1., 0., 0.),
            Vector3::new(0., 1., 0.),
            Vector3::new(0., 0., 1.),
            Vector3::new(1., 1., 1.),
        ];
        let ids = ["a", "b", "c", "d", "e"];

        let mut tree = SpatialTree::new(settings());
        for (id, p) in ids.iter().zip(positions) {
            tree.insert(id, p);
        }

        assert_eq!(tree.inners.len(), 5);
        assert!(tree.outers.is_empty());
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn far_vertex_creates_one_subtree() {
        let mut tree = SpatialTree::new(settings());
        for (id, p) in [
            ("a", Vector3::zeros()),
            ("b", Vector3::new(1., 0., 0.)),
            ("c", Vector3::new(0., 1., 0.)),
            ("d", Vector3::new(0., 0., 1.)),
            ("e", Vector3::new(1., 1., 1.)),
        ] {
            tree.insert(id, p);
        }

        tree.insert("far", Vector3::new(100., 0., 0.));

        assert_eq!(tree.inners.len(), 5);
        assert_eq!(tree.outers.len(), 1);
        let subtree = tree.outers.values().next().unwrap();
        assert_eq!(subtree.len(), 1);
        assert!(subtree.contains("far"));
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn same_octant_reuses_subtree() {
        let mut tree = SpatialTree::new(settings());
        tree.insert("a", Vector3::zeros());
        tree.insert("b", Vector3::new(100., 0., 0.));
        tree.insert("c", Vector3::new(101., 0., 0.));

        assert_eq!(tree.outers.len(), 1);
        let subtree = tree.outers.values().next().unwrap();
        assert_eq!(subtree.len(), 2);
        assert!(subtree.contains("b"));
        assert!(subtree.contains("c"));
    }

    #[test]
    fn estimate_is_exact_for_inner_members() {
        let positions = vec![
            Vector3::zeros(),
            Vector3::new(1., 0., 0.),
            Vector3::new(0., 2., 0.),
            Vector3::new(-1., -1., 0.5),
        ];
        let ids = ["a", "b", "c", "d"];
        let s = settings();

        let tree = SpatialTree::from_members(
            s,
            ids.iter().copied().zip(positions.iter().copied()),
        );
        assert!(tree.outers.is_empty());

        for (i, id) in ids.iter().enumerate() {
            assert_abs_diff_eq!(
                tree.estimate(id, positions[i]),
                net_repulsion(i, &positions, &s),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn far_pair_is_approximated_as_cluster() {
        let s = settings();
        let mut tree = SpatialTree::new(s);
        tree.insert("a", Vector3::zeros());
        tree.insert("b", Vector3::new(100., 0., 0.));
        tree.insert("c", Vector3::new(102., 0., 0.));

        // b and c share a subtree; seen from a they collapse to one
        // cluster of two at their centroid.
        let cluster = crate::forces::repulsion(Vector3::zeros(), Vector3::new(101., 0., 0.), &s) * 2.;
        assert_abs_diff_eq!(
            tree.estimate("a", Vector3::zeros()),
            cluster,
            epsilon = 1e-12
        );
    }

    #[test]
    fn routed_vertex_sees_ancestor_inners_as_cluster() {
        let s = settings();
        let mut tree = SpatialTree::new(s);
        tree.insert("a", Vector3::zeros());
        tree.insert("far", Vector3::new(100., 0., 0.));

        // Single inner ancestor, so the cluster equals the exact force.
        let exact = crate::forces::repulsion(
            Vector3::new(100., 0., 0.),
            Vector3::zeros(),
            &s,
        );
        assert_abs_diff_eq!(
            tree.estimate("far", Vector3::new(100., 0., 0.)),
            exact,
            epsilon = 1e-12
        );
    }

    #[test]
    fn empty_tree_estimates_zero() {
        let tree = SpatialTree::new(settings());
        assert!(tree.is_empty());
        assert_abs_diff_eq!(
            tree.estimate("missing", Vector3::zeros()),
            Vector3::zeros()
        );
    }
}
