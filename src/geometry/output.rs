//! Engine-produced output records
//!
//! These carry no region or hole lists. Everything here is written by an engine run
//! and owned by the generator instance.

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Second endpoint of a Voronoi edge that marks an unbounded ray
pub const RAY: i32 = -1;

/// Planar mesh written by the planar engine
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanarOutput {
    /// Mesh point coordinates
    pub points: Vec<DVec2>,
    /// One marker per mesh point
    pub point_markers: Vec<i32>,
    /// Cell connectivity, `cell_corner_count` point indices per cell
    pub cells: Vec<usize>,
    /// Corners per cell: 3 for linear triangles, 6 for quadratic
    pub cell_corner_count: usize,
    /// Region attribute of each cell
    pub cell_attributes: Vec<usize>,
    /// Constrained segments of the mesh
    pub segments: Vec<[usize; 2]>,
    /// One marker per segment
    pub segment_markers: Vec<i32>,
    /// Every edge of the triangulation
    pub edges: Vec<[usize; 2]>,
    /// One marker per edge
    pub edge_markers: Vec<i32>,
}

impl PlanarOutput {
    /// Number of cells in the flat connectivity list
    pub fn cell_count(&self) -> usize {
        if self.cell_corner_count == 0 {
            0
        } else {
            self.cells.len() / self.cell_corner_count
        }
    }

    /// Corner point indices of a cell
    pub fn cell(&self, index: usize) -> Option<&[usize]> {
        let n = self.cell_corner_count;
        if index >= self.cell_count() {
            return None;
        }
        self.cells.get(index * n..(index + 1) * n)
    }

    /// Drop every result so the record reads as "not meshed"
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A boundary face of a solid mesh carrying its facet marker
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MarkedFace {
    /// Point indices of the triangle
    pub points: [usize; 3],
    /// Marker of the facet the face lies on
    pub marker: i32,
    /// Tetrahedron the face belongs to
    pub cell: usize,
}

impl MarkedFace {
    /// Copy with the point triple sorted ascending
    pub fn sorted(mut self) -> Self {
        self.points.sort_unstable();
        self
    }
}

/// Solid mesh written by the solid engine
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolidOutput {
    /// Mesh point coordinates
    pub points: Vec<DVec3>,
    /// One marker per mesh point
    pub point_markers: Vec<i32>,
    /// Cell connectivity, `cell_corner_count` point indices per cell
    pub cells: Vec<usize>,
    /// Corners per cell: 4 for linear tetrahedra, 10 for quadratic
    pub cell_corner_count: usize,
    /// Region attribute of each cell
    pub cell_attributes: Vec<usize>,
    /// Boundary faces lying on marked facets
    pub marked_faces: Vec<MarkedFace>,
}

impl SolidOutput {
    /// Number of cells in the flat connectivity list
    pub fn cell_count(&self) -> usize {
        if self.cell_corner_count == 0 {
            0
        } else {
            self.cells.len() / self.cell_corner_count
        }
    }

    /// Corner point indices of a cell
    pub fn cell(&self, index: usize) -> Option<&[usize]> {
        let n = self.cell_corner_count;
        if index >= self.cell_count() {
            return None;
        }
        self.cells.get(index * n..(index + 1) * n)
    }

    /// Drop every result so the record reads as "not meshed"
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Voronoi diagram written alongside a planar Delaunay run
///
/// `edges[i][1] == RAY` marks an unbounded edge whose direction is
/// `ray_directions[i]`; for finite edges the direction slot is unused.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoronoiOutput {
    /// Voronoi vertices (triangle circumcenters)
    pub points: Vec<DVec2>,
    /// Edge endpoints; the second may be [`RAY`]
    pub edges: Vec<[i32; 2]>,
    /// Per-edge ray direction
    pub ray_directions: Vec<DVec2>,
}

impl VoronoiOutput {
    /// Drop the diagram
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Second endpoint of a Voronoi edge
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoronoiEdgePoint {
    /// A finite edge ending at this Voronoi point
    Index(usize),
    /// An infinite ray going this way
    Direction(f64, f64),
}
