//! Planar generator: Delaunay triangulation, Voronoi diagram and quality mesh

use crate::config::MeshOptions;
use crate::engine::{self, PlanarEngine};
use crate::error::{MeshError, Result};
use crate::geometry::{
    PlanarInput, PlanarOutput, VoronoiEdgePoint, VoronoiOutput, MIN_PLANAR_POINTS, RAY,
};
use crate::numbering::triangle_corner;
use crate::switches::{Dimension, Switches};

#[cfg(feature = "spatial-index")]
use crate::spatial::PointLocator;

/// A planar meshing instance
///
/// Owns the input graph, the output mesh and the Voronoi diagram, plus the engine that
/// fills them. Sizes are fixed by [`Trigen::new`]; setters fill slots, a `generate_*`
/// call runs the engine and the `out_*` accessors read the result.
///
/// Accessors never fail: before a run, or for an out-of-range index or selector, they
/// return 0.
///
/// # Examples
///
/// ```
/// use plc_mesh::*;
///
/// let mut trigen = Trigen::new(HullEngine::new(), 4, 0, 0, 0)?;
/// trigen
///     .set_point(0, 0, 0.0, 0.0)?
///     .set_point(1, 0, 1.0, 0.0)?
///     .set_point(2, 0, 0.0, 1.0)?
///     .set_point(3, 0, 0.9, 0.8)?;
///
/// trigen.generate_voronoi(false)?;
/// assert_eq!(trigen.out_cell_count(), 2);
/// assert_eq!(trigen.out_voronoi_point_count(), 2);
/// # Ok::<(), MeshError>(())
/// ```
#[derive(Debug)]
pub struct Trigen<E> {
    engine: E,
    input: PlanarInput,
    output: PlanarOutput,
    voronoi: VoronoiOutput,
}

impl<E: PlanarEngine> Trigen<E> {
    /// Allocate a planar instance
    ///
    /// # Arguments
    ///
    /// * `engine` - Engine that performs the runs
    /// * `npoint` - Number of points, at least 3
    /// * `nsegment` - Number of segments (0 for a bare point set)
    /// * `nregion` - Number of region seeds
    /// * `nhole` - Number of hole seeds
    ///
    /// # Errors
    ///
    /// `TooFewPoints` below 3 points, `AllocationFailed` if any list cannot be
    /// allocated. No instance is returned in either case.
    pub fn new(
        engine: E,
        npoint: usize,
        nsegment: usize,
        nregion: usize,
        nhole: usize,
    ) -> Result<Self> {
        if npoint < MIN_PLANAR_POINTS {
            return Err(MeshError::TooFewPoints {
                min: MIN_PLANAR_POINTS,
                got: npoint,
            });
        }
        let input = PlanarInput::allocate(npoint, nsegment, nregion, nhole)?;
        tracing::debug!(npoint, nsegment, nregion, nhole, "allocated planar instance");
        Ok(Self {
            engine,
            input,
            output: PlanarOutput::default(),
            voronoi: VoronoiOutput::default(),
        })
    }

    /// Set the coordinates and marker of a point
    pub fn set_point(&mut self, index: usize, marker: i32, x: f64, y: f64) -> Result<&mut Self> {
        self.input.set_point(index, marker, x, y)?;
        Ok(self)
    }

    /// Set a segment between points `a` and `b`
    pub fn set_segment(
        &mut self,
        index: usize,
        marker: i32,
        a: usize,
        b: usize,
    ) -> Result<&mut Self> {
        self.input.set_segment(index, marker, a, b)?;
        Ok(self)
    }

    /// Set a region seed
    ///
    /// `max_area` bounds the area of cells in the region; `None` only tags them with
    /// `attribute`.
    pub fn set_region(
        &mut self,
        index: usize,
        attribute: usize,
        x: f64,
        y: f64,
        max_area: Option<f64>,
    ) -> Result<&mut Self> {
        self.input.set_region(index, attribute, x, y, max_area)?;
        Ok(self)
    }

    /// Set a hole seed
    pub fn set_hole(&mut self, index: usize, x: f64, y: f64) -> Result<&mut Self> {
        self.input.set_hole(index, x, y)?;
        Ok(self)
    }

    /// Triangulate the points, ignoring segments, regions and holes
    pub fn generate_delaunay(&mut self, verbose: bool) -> Result<()> {
        self.require_points()?;
        let switches = Switches::delaunay(verbose)?;
        self.run(&switches, false)?;
        if verbose {
            self.report("delaunay");
        }
        Ok(())
    }

    /// Triangulate the points and write the Voronoi diagram
    pub fn generate_voronoi(&mut self, verbose: bool) -> Result<()> {
        self.require_points()?;
        let switches = Switches::voronoi(verbose)?;
        self.run(&switches, true)?;
        if verbose {
            self.report("voronoi");
        }
        Ok(())
    }

    /// Generate a quality mesh of the segment graph
    ///
    /// # Errors
    ///
    /// `IncompleteInput` unless every point and segment is set, `NullSegmentList`
    /// without segments, `InvalidConfig` for a non-finite constraint,
    /// `StringConcatOverflow` if one does not fit the switch string, `Engine` if the
    /// engine fails.
    pub fn generate_mesh(&mut self, options: &MeshOptions) -> Result<()> {
        self.require_points()?;
        if self.input.segments().is_empty() {
            return Err(MeshError::NullSegmentList);
        }
        if !self.input.all_segments_set() {
            return Err(MeshError::IncompleteInput("segments"));
        }
        let switches = Switches::mesh(Dimension::Planar, options)?;
        self.run(&switches, false)?;
        if options.verbose {
            self.report("mesh");
        }
        Ok(())
    }

    fn require_points(&self) -> Result<()> {
        if self.input.all_points_set() {
            Ok(())
        } else {
            Err(MeshError::IncompleteInput("points"))
        }
    }

    fn run(&mut self, switches: &Switches, with_voronoi: bool) -> Result<()> {
        let Self {
            engine,
            input,
            output,
            voronoi,
        } = &mut *self;
        output.clear();
        voronoi.clear();

        let result = engine::invoke("planar", switches, || {
            let voronoi = if with_voronoi { Some(voronoi) } else { None };
            engine.triangulate(switches, input, output, voronoi)
        });
        if result.is_err() {
            self.output.clear();
            self.voronoi.clear();
        }
        result
    }

    fn report(&self, mode: &str) {
        tracing::info!(
            mode,
            points = self.out_point_count(),
            triangles = self.out_cell_count(),
            corners = self.out_cell_corner_count(),
            segments = self.out_segment_count(),
            voronoi_points = self.out_voronoi_point_count(),
            voronoi_edges = self.out_voronoi_edge_count(),
            "planar run finished"
        );
    }
}

impl<E> Trigen<E> {
    /// The input graph as populated so far
    pub fn input(&self) -> &PlanarInput {
        &self.input
    }

    /// The mesh written by the last successful run
    pub fn output(&self) -> &PlanarOutput {
        &self.output
    }

    /// The Voronoi diagram written by the last successful Voronoi run
    pub fn voronoi(&self) -> &VoronoiOutput {
        &self.voronoi
    }

    /// The engine driving this instance
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Number of output points
    pub fn out_point_count(&self) -> usize {
        self.output.points.len()
    }

    /// Number of output triangles
    pub fn out_cell_count(&self) -> usize {
        self.output.cell_count()
    }

    /// Corners per triangle: 3, or 6 for quadratic meshes
    pub fn out_cell_corner_count(&self) -> usize {
        self.output.cell_corner_count
    }

    /// Number of output segments
    pub fn out_segment_count(&self) -> usize {
        self.output.segments.len()
    }

    /// Number of Voronoi vertices
    pub fn out_voronoi_point_count(&self) -> usize {
        self.voronoi.points.len()
    }

    /// Number of Voronoi edges, rays included
    pub fn out_voronoi_edge_count(&self) -> usize {
        self.voronoi.edges.len()
    }

    /// Coordinate `dim` (0 = x, 1 = y) of an output point
    pub fn out_point(&self, index: usize, dim: usize) -> f64 {
        self.output
            .points
            .get(index)
            .and_then(|p| p.to_array().get(dim).copied())
            .unwrap_or(0.0)
    }

    /// Marker of an output point
    pub fn out_point_marker(&self, index: usize) -> i32 {
        self.output.point_markers.get(index).copied().unwrap_or(0)
    }

    /// Point index at engine corner `corner` of a triangle
    pub fn out_cell_corner(&self, index: usize, corner: usize) -> usize {
        self.output
            .cell(index)
            .and_then(|cell| cell.get(corner).copied())
            .unwrap_or(0)
    }

    /// Point index of node `m` of a triangle, mid-edge nodes numbered after the vertices
    ///
    /// See [`crate::numbering`] for the node order.
    pub fn out_cell_node(&self, index: usize, m: usize) -> usize {
        triangle_corner(m, self.output.cell_corner_count)
            .map_or(0, |corner| self.out_cell_corner(index, corner))
    }

    /// Region attribute of an output triangle
    pub fn out_cell_attribute(&self, index: usize) -> usize {
        self.output.cell_attributes.get(index).copied().unwrap_or(0)
    }

    /// Endpoint `side` (0 or 1) of an output segment
    pub fn out_segment_point(&self, index: usize, side: usize) -> usize {
        self.output
            .segments
            .get(index)
            .and_then(|s| s.get(side).copied())
            .unwrap_or(0)
    }

    /// Marker of an output segment
    pub fn out_segment_marker(&self, index: usize) -> i32 {
        self.output.segment_markers.get(index).copied().unwrap_or(0)
    }

    /// Coordinate `dim` (0 = x, 1 = y) of a Voronoi vertex
    pub fn out_voronoi_point(&self, index: usize, dim: usize) -> f64 {
        self.voronoi
            .points
            .get(index)
            .and_then(|p| p.to_array().get(dim).copied())
            .unwrap_or(0.0)
    }

    /// Endpoint `side` of a Voronoi edge; `-1` on side 1 marks a ray
    pub fn out_voronoi_edge_point(&self, index: usize, side: usize) -> i32 {
        self.voronoi
            .edges
            .get(index)
            .and_then(|e| e.get(side).copied())
            .unwrap_or(0)
    }

    /// Second endpoint of a Voronoi edge, or the ray direction for unbounded edges
    ///
    /// Out-of-range indices read as `Index(0)`.
    pub fn out_voronoi_edge_point_b(&self, index: usize) -> VoronoiEdgePoint {
        match self.voronoi.edges.get(index) {
            Some(&[_, RAY]) => {
                let direction = self
                    .voronoi
                    .ray_directions
                    .get(index)
                    .copied()
                    .unwrap_or_default();
                VoronoiEdgePoint::Direction(direction.x, direction.y)
            }
            Some(&[_, b]) => VoronoiEdgePoint::Index(b as usize),
            None => VoronoiEdgePoint::Index(0),
        }
    }

    /// Component `dim` of the ray direction of a Voronoi edge
    ///
    /// Finite edges have no direction and read as 0.0 whatever the buffer holds.
    pub fn out_voronoi_edge_point_b_direction(&self, index: usize, dim: usize) -> f64 {
        match self.voronoi.edges.get(index) {
            Some(&[_, RAY]) => self
                .voronoi
                .ray_directions
                .get(index)
                .and_then(|d| d.to_array().get(dim).copied())
                .unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Nearest-point index over the output points; `None` before a run
    #[cfg(feature = "spatial-index")]
    pub fn out_point_locator(&self) -> Option<PointLocator> {
        PointLocator::from_planar(&self.output.points)
    }
}
