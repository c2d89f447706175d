//! Nearest-point lookups over a generated mesh
//!
//! This module is only available with the `spatial-index` feature.

use glam::{DVec2, DVec3};
use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

/// KD-tree over output mesh points
///
/// Planar meshes are indexed in the z = 0 plane. Built once after a run; it does not
/// follow later runs of the generator it came from.
#[derive(Clone)]
pub struct PointLocator {
    tree: ImmutableKdTree<f64, usize, 3, 32>,
    len: usize,
}

impl PointLocator {
    /// Index planar points; `None` when there are no points
    pub fn from_planar(points: &[DVec2]) -> Option<Self> {
        let entries: Vec<[f64; 3]> = points.iter().map(|p| [p.x, p.y, 0.0]).collect();
        Self::build(entries)
    }

    /// Index solid points; `None` when there are no points
    ///
    /// # Example
    ///
    /// ```
    /// use plc_mesh::PointLocator;
    /// use glam::DVec3;
    ///
    /// let points = vec![DVec3::ZERO, DVec3::X, DVec3::Y];
    /// let locator = PointLocator::from_solid(&points).unwrap();
    /// assert_eq!(locator.find_nearest(DVec3::new(0.9, 0.2, 0.0)), 1);
    /// ```
    pub fn from_solid(points: &[DVec3]) -> Option<Self> {
        let entries: Vec<[f64; 3]> = points.iter().map(|p| p.to_array()).collect();
        Self::build(entries)
    }

    fn build(entries: Vec<[f64; 3]>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        Some(Self {
            tree: ImmutableKdTree::new_from_slice(&entries),
            len: entries.len(),
        })
    }

    /// Index of the mesh point closest to `position`
    pub fn find_nearest(&self, position: DVec3) -> usize {
        let query = position.to_array();
        self.tree.nearest_one::<SquaredEuclidean>(&query).item
    }

    /// Index of the planar mesh point closest to `position`
    pub fn find_nearest_planar(&self, position: DVec2) -> usize {
        self.find_nearest(position.extend(0.0))
    }

    /// Number of indexed points
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; empty point sets are never indexed
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
