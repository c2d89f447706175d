//! Solid generator: Delaunay tetrahedralization and quality mesh of a PLC

use crate::config::MeshOptions;
use crate::engine::{self, SolidEngine};
use crate::error::{MeshError, Result};
use crate::geometry::{MarkedFace, SolidInput, SolidOutput, MIN_SOLID_POINTS};
use crate::numbering::tetrahedron_corner;
use crate::switches::{Dimension, Switches};

#[cfg(feature = "spatial-index")]
use crate::spatial::PointLocator;

/// A solid meshing instance
///
/// Owns the piecewise linear complex, the output mesh and the engine. Every facet holds
/// one polygon whose vertex count is fixed at creation.
///
/// # Examples
///
/// ```
/// use plc_mesh::*;
///
/// // engines are supplied by the caller
/// struct Solid;
///
/// impl SolidEngine for Solid {
///     fn tetrahedralize(
///         &mut self,
///         _switches: &Switches,
///         input: &SolidInput,
///         output: &mut SolidOutput,
///     ) -> std::result::Result<(), EngineFault> {
///         output.points = input.points().to_vec();
///         output.cells = vec![0, 1, 2, 3];
///         output.cell_corner_count = 4;
///         Ok(())
///     }
/// }
///
/// let mut tetgen = Tetgen::new(Solid, 4, &[3, 3, 3, 3], 0, 0)?;
/// tetgen
///     .set_point(0, 0, 0.0, 0.0, 0.0)?
///     .set_point(1, 0, 1.0, 0.0, 0.0)?
///     .set_point(2, 0, 0.0, 1.0, 0.0)?
///     .set_point(3, 0, 0.0, 0.0, 1.0)?;
/// for (i, face) in [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]].iter().enumerate() {
///     for (m, p) in face.iter().enumerate() {
///         tetgen.set_facet_point(i, m, *p)?;
///     }
/// }
///
/// tetgen.generate_mesh(&MeshOptions::default())?;
/// assert_eq!(tetgen.out_cell_count(), 1);
/// # Ok::<(), MeshError>(())
/// ```
#[derive(Debug)]
pub struct Tetgen<E> {
    engine: E,
    input: SolidInput,
    output: SolidOutput,
}

impl<E: SolidEngine> Tetgen<E> {
    /// Allocate a solid instance
    ///
    /// # Arguments
    ///
    /// * `engine` - Engine that performs the runs
    /// * `npoint` - Number of points, at least 4
    /// * `facet_npoint` - Vertex count of each facet polygon (empty for a bare point set)
    /// * `nregion` - Number of region seeds
    /// * `nhole` - Number of hole seeds
    ///
    /// # Errors
    ///
    /// `TooFewPoints` below 4 points, `AllocationFailed` if any list or facet polygon
    /// cannot be allocated.
    pub fn new(
        engine: E,
        npoint: usize,
        facet_npoint: &[usize],
        nregion: usize,
        nhole: usize,
    ) -> Result<Self> {
        if npoint < MIN_SOLID_POINTS {
            return Err(MeshError::TooFewPoints {
                min: MIN_SOLID_POINTS,
                got: npoint,
            });
        }
        let input = SolidInput::allocate(npoint, facet_npoint, nregion, nhole)?;
        tracing::debug!(
            npoint,
            nfacet = facet_npoint.len(),
            nregion,
            nhole,
            "allocated solid instance"
        );
        Ok(Self {
            engine,
            input,
            output: SolidOutput::default(),
        })
    }

    /// Set the coordinates and marker of a point
    pub fn set_point(
        &mut self,
        index: usize,
        marker: i32,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<&mut Self> {
        self.input.set_point(index, marker, x, y, z)?;
        Ok(self)
    }

    /// Set vertex `m` of facet `index` to point `p`
    pub fn set_facet_point(&mut self, index: usize, m: usize, p: usize) -> Result<&mut Self> {
        self.input.set_facet_point(index, m, p)?;
        Ok(self)
    }

    /// Set the boundary marker of a facet
    pub fn set_facet_marker(&mut self, index: usize, marker: i32) -> Result<&mut Self> {
        self.input.set_facet_marker(index, marker)?;
        Ok(self)
    }

    /// Set a region seed; `max_volume` of `None` only tags cells with `attribute`
    pub fn set_region(
        &mut self,
        index: usize,
        attribute: usize,
        x: f64,
        y: f64,
        z: f64,
        max_volume: Option<f64>,
    ) -> Result<&mut Self> {
        self.input.set_region(index, attribute, x, y, z, max_volume)?;
        Ok(self)
    }

    /// Set a hole seed
    pub fn set_hole(&mut self, index: usize, x: f64, y: f64, z: f64) -> Result<&mut Self> {
        self.input.set_hole(index, x, y, z)?;
        Ok(self)
    }

    /// Tetrahedralize the points, ignoring facets, regions and holes
    pub fn generate_delaunay(&mut self, verbose: bool) -> Result<()> {
        self.require_points()?;
        let switches = Switches::delaunay(verbose)?;
        self.run(&switches)?;
        if verbose {
            self.report("delaunay");
        }
        Ok(())
    }

    /// Generate a quality mesh of the piecewise linear complex
    ///
    /// # Errors
    ///
    /// `IncompleteInput` unless every point and facet vertex is set, `NullFacetList`
    /// without facets, `InvalidConfig` for a non-finite constraint, `StringConcatOverflow`
    /// if one does not fit the switch string, `Engine` if the engine fails.
    pub fn generate_mesh(&mut self, options: &MeshOptions) -> Result<()> {
        self.require_points()?;
        if self.input.facets().is_empty() {
            return Err(MeshError::NullFacetList);
        }
        if !self.input.all_facets_set() {
            return Err(MeshError::IncompleteInput("facets"));
        }
        let switches = Switches::mesh(Dimension::Solid, options)?;
        self.run(&switches)?;
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

    fn run(&mut self, switches: &Switches) -> Result<()> {
        let Self {
            engine,
            input,
            output,
        } = &mut *self;
        output.clear();

        let result = engine::invoke("solid", switches, || {
            engine.tetrahedralize(switches, input, output)
        });
        if result.is_err() {
            self.output.clear();
        }
        result
    }

    fn report(&self, mode: &str) {
        tracing::info!(
            mode,
            points = self.out_point_count(),
            tetrahedra = self.out_cell_count(),
            corners = self.out_cell_corner_count(),
            marked_faces = self.out_marked_face_count(),
            "solid run finished"
        );
    }
}

impl<E> Tetgen<E> {
    /// The complex as populated so far
    pub fn input(&self) -> &SolidInput {
        &self.input
    }

    /// The mesh written by the last successful run
    pub fn output(&self) -> &SolidOutput {
        &self.output
    }

    /// The engine driving this instance
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Number of output points
    pub fn out_point_count(&self) -> usize {
        self.output.points.len()
    }

    /// Number of output tetrahedra
    pub fn out_cell_count(&self) -> usize {
        self.output.cell_count()
    }

    /// Corners per tetrahedron: 4, or 10 for quadratic meshes
    pub fn out_cell_corner_count(&self) -> usize {
        self.output.cell_corner_count
    }

    /// Number of boundary faces on marked facets
    pub fn out_marked_face_count(&self) -> usize {
        self.output.marked_faces.len()
    }

    /// Coordinate `dim` (0 = x, 1 = y, 2 = z) of an output point
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

    /// Point index at engine corner `corner` of a tetrahedron
    pub fn out_cell_corner(&self, index: usize, corner: usize) -> usize {
        self.output
            .cell(index)
            .and_then(|cell| cell.get(corner).copied())
            .unwrap_or(0)
    }

    /// Point index of node `m` of a tetrahedron, mid-edge nodes after the vertices
    pub fn out_cell_node(&self, index: usize, m: usize) -> usize {
        tetrahedron_corner(m, self.output.cell_corner_count)
            .map_or(0, |corner| self.out_cell_corner(index, corner))
    }

    /// Region attribute of an output tetrahedron
    pub fn out_cell_attribute(&self, index: usize) -> usize {
        self.output.cell_attributes.get(index).copied().unwrap_or(0)
    }

    /// A marked boundary face with its points sorted ascending
    ///
    /// Out-of-range indices read as a zeroed face.
    pub fn out_marked_face(&self, index: usize) -> MarkedFace {
        self.output
            .marked_faces
            .get(index)
            .map(|face| face.sorted())
            .unwrap_or_default()
    }

    /// Nearest-point index over the output points; `None` before a run
    #[cfg(feature = "spatial-index")]
    pub fn out_point_locator(&self) -> Option<PointLocator> {
        PointLocator::from_solid(&self.output.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MeshOptionsBuilder;
    use crate::engine::testing::{FaultingEngine, PanickingEngine, TetEngine};
    use crate::error::EngineFault;

    const FACES: [[usize; 3]; 4] = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];

    fn tetrahedron<E: SolidEngine>(engine: E) -> Tetgen<E> {
        let mut tetgen = Tetgen::new(engine, 4, &[3, 3, 3, 3], 1, 0).unwrap();
        tetgen
            .set_point(0, -1, 0.0, 0.0, 0.0)
            .unwrap()
            .set_point(1, -2, 1.0, 0.0, 0.0)
            .unwrap()
            .set_point(2, -3, 0.0, 1.0, 0.0)
            .unwrap()
            .set_point(3, -4, 0.0, 0.0, 1.0)
            .unwrap();
        for (i, face) in FACES.iter().enumerate() {
            for (m, p) in face.iter().enumerate() {
                tetgen.set_facet_point(i, m, *p).unwrap();
            }
        }
        tetgen
    }

    #[test]
    fn test_too_few_points() {
        let result = Tetgen::new(TetEngine::default(), 3, &[3, 3, 3, 3], 0, 0);
        assert_eq!(result.err(), Some(MeshError::TooFewPoints { min: 4, got: 3 }));
    }

    #[test]
    fn test_nested_allocation_failure() {
        let result = Tetgen::new(TetEngine::default(), 4, &[3, 3, usize::MAX], 0, 0);
        assert_eq!(
            result.err(),
            Some(MeshError::AllocationFailed("facet vertex list"))
        );
    }

    #[test]
    fn test_setter_errors() {
        let mut tetgen = tetrahedron(TetEngine::default());
        assert_eq!(
            tetgen.set_point(4, 0, 1.0, 1.0, 1.0).err(),
            Some(MeshError::InvalidPointIndex)
        );
        assert_eq!(
            tetgen.set_facet_point(0, 0, 4).err(),
            Some(MeshError::InvalidFacetPointId)
        );
        assert_eq!(
            tetgen.set_facet_point(0, 3, 1).err(),
            Some(MeshError::InvalidFacetPointIndex)
        );
        assert_eq!(
            tetgen.set_facet_marker(4, 1).err(),
            Some(MeshError::InvalidFacetIndex)
        );
        assert_eq!(
            tetgen.set_hole(0, 0.1, 0.1, 0.1).err(),
            Some(MeshError::NullHoleList)
        );
        assert_eq!(tetgen.input().facets()[0].polygons()[0].vertices(), &[0, 2, 1]);
    }

    #[test]
    fn test_generate_mesh_prerequisites() {
        let mut bare = Tetgen::new(TetEngine::default(), 4, &[], 0, 0).unwrap();
        for i in 0..4 {
            bare.set_point(i, 0, i as f64, 0.0, 0.0).unwrap();
        }
        assert_eq!(
            bare.generate_mesh(&MeshOptions::default()),
            Err(MeshError::NullFacetList)
        );

        let mut partial = Tetgen::new(TetEngine::default(), 4, &[3], 0, 0).unwrap();
        for i in 0..4 {
            partial.set_point(i, 0, 0.0, i as f64, 0.0).unwrap();
        }
        partial.set_facet_point(0, 0, 1).unwrap();
        assert_eq!(
            partial.generate_mesh(&MeshOptions::default()),
            Err(MeshError::IncompleteInput("facets"))
        );

        let mut unset = Tetgen::new(TetEngine::default(), 4, &[], 0, 0).unwrap();
        assert_eq!(
            unset.generate_delaunay(false),
            Err(MeshError::IncompleteInput("points"))
        );
        assert_eq!(unset.engine().calls, 0);
    }

    #[test]
    fn test_tetrahedron_mesh() {
        let mut tetgen = tetrahedron(TetEngine::default());
        tetgen.set_region(0, 3, 0.1, 0.1, 0.1, None).unwrap();
        tetgen.generate_mesh(&MeshOptions::default()).unwrap();

        assert_eq!(tetgen.engine().switches, vec!["pzAQq"]);
        assert!(tetgen.out_cell_count() > 0);
        assert_eq!(tetgen.out_cell_corner_count(), 4);
        for cell in 0..tetgen.out_cell_count() {
            for corner in 0..tetgen.out_cell_corner_count() {
                assert!(tetgen.out_cell_corner(cell, corner) < tetgen.out_point_count());
            }
        }
        assert_eq!(tetgen.out_point(3, 2), 1.0);
        assert_eq!(tetgen.out_point_marker(1), -2);
        assert_eq!(tetgen.out_cell_attribute(0), 3);
    }

    #[test]
    fn test_delaunay_ignores_facets() {
        let mut tetgen = tetrahedron(TetEngine::default());
        tetgen.set_facet_marker(0, 7).unwrap();
        tetgen.generate_delaunay(true).unwrap();
        assert_eq!(tetgen.engine().switches, vec!["z"]);
        assert_eq!(tetgen.out_cell_count(), 1);
        assert_eq!(tetgen.out_marked_face_count(), 0);
        for cell in 0..tetgen.out_cell_count() {
            for corner in 0..tetgen.out_cell_corner_count() {
                assert!(tetgen.out_cell_corner(cell, corner) < tetgen.out_point_count());
            }
        }
    }

    #[test]
    fn test_delaunay_with_unset_facets() {
        let mut tetgen = Tetgen::new(TetEngine::default(), 4, &[3, 3, 3, 3], 0, 0).unwrap();
        tetgen
            .set_point(0, 0, 0.0, 0.0, 0.0)
            .unwrap()
            .set_point(1, 0, 1.0, 0.0, 0.0)
            .unwrap()
            .set_point(2, 0, 0.0, 1.0, 0.0)
            .unwrap()
            .set_point(3, 0, 0.0, 0.0, 1.0)
            .unwrap();
        tetgen.generate_delaunay(false).unwrap();

        assert_eq!(tetgen.out_point_count(), 4);
        assert_eq!(tetgen.out_cell_count(), 1);
        assert_eq!(tetgen.out_cell_corner_count(), 4);
        for cell in 0..tetgen.out_cell_count() {
            for corner in 0..tetgen.out_cell_corner_count() {
                assert!(tetgen.out_cell_corner(cell, corner) < tetgen.out_point_count());
            }
        }
    }

    #[test]
    fn test_marked_faces_are_sorted() {
        let mut tetgen = tetrahedron(TetEngine::default());
        tetgen
            .set_facet_marker(0, -10)
            .unwrap()
            .set_facet_marker(3, -20)
            .unwrap();
        tetgen.generate_mesh(&MeshOptions::default()).unwrap();

        assert_eq!(tetgen.out_marked_face_count(), 2);
        // stored unsorted by the engine
        assert_eq!(tetgen.output().marked_faces[0].points, [1, 2, 0]);

        let face = tetgen.out_marked_face(0);
        assert_eq!(face.points, [0, 1, 2]);
        assert_eq!(face.marker, -10);
        assert_eq!(face.cell, 0);
        assert_eq!(tetgen.out_marked_face(1).points, [1, 2, 3]);
        assert_eq!(tetgen.out_marked_face(1).marker, -20);
        assert_eq!(tetgen.out_marked_face(2), MarkedFace::default());
    }

    #[test]
    fn test_quadratic_node_order() {
        let mut tetgen = tetrahedron(TetEngine::default());
        let options = MeshOptionsBuilder::new().quadratic(true).build();
        tetgen.generate_mesh(&options).unwrap();
        assert_eq!(tetgen.out_cell_corner_count(), 10);
        assert_eq!(tetgen.out_point_count(), 10);

        let edges = [[0, 1], [1, 2], [2, 0], [0, 3], [1, 3], [2, 3]];
        for (k, [a, b]) in edges.iter().enumerate() {
            let mid = tetgen.out_cell_node(0, 4 + k);
            let a = tetgen.out_cell_node(0, *a);
            let b = tetgen.out_cell_node(0, *b);
            for dim in 0..3 {
                let expected = (tetgen.out_point(a, dim) + tetgen.out_point(b, dim)) / 2.0;
                assert_eq!(tetgen.out_point(mid, dim), expected);
            }
        }
        assert_eq!(tetgen.out_cell_node(0, 10), 0);
    }

    #[test]
    fn test_out_of_range_reads_are_neutral() {
        let mut tetgen = tetrahedron(TetEngine::default());
        assert_eq!(tetgen.out_cell_count(), 0);
        assert_eq!(tetgen.out_marked_face_count(), 0);
        assert_eq!(tetgen.out_marked_face(0), MarkedFace::default());

        tetgen.generate_mesh(&MeshOptions::default()).unwrap();
        assert_eq!(tetgen.out_point(4, 0), 0.0);
        assert_eq!(tetgen.out_point(0, 3), 0.0);
        assert_eq!(tetgen.out_point_marker(4), 0);
        assert_eq!(tetgen.out_cell_corner(1, 0), 0);
        assert_eq!(tetgen.out_cell_corner(0, 4), 0);
        assert_eq!(tetgen.out_cell_node(0, 4), 0);
        assert_eq!(tetgen.out_cell_attribute(1), 0);
    }

    #[test]
    fn test_counts_are_idempotent() {
        let mut tetgen = tetrahedron(TetEngine::default());
        tetgen.generate_mesh(&MeshOptions::default()).unwrap();
        assert_eq!(tetgen.out_cell_count(), tetgen.out_cell_count());
        assert_eq!(tetgen.out_point_count(), tetgen.out_point_count());
    }

    #[test]
    fn test_switch_overflow_skips_engine() {
        let mut tetgen = tetrahedron(TetEngine::default());
        let options = MeshOptions {
            global_max_size: Some(1.0e20),
            ..MeshOptions::default()
        };
        assert_eq!(
            tetgen.generate_mesh(&options),
            Err(MeshError::StringConcatOverflow)
        );
        assert_eq!(tetgen.engine().calls, 0);
        assert_eq!(tetgen.out_cell_count(), 0);
    }

    #[test]
    fn test_engine_fault_clears_output() {
        let mut tetgen = tetrahedron(FaultingEngine(EngineFault::Unknown("bad facet".into())));
        let err = tetgen.generate_mesh(&MeshOptions::default()).unwrap_err();
        assert_eq!(
            err,
            MeshError::Engine(EngineFault::Unknown("bad facet".to_string()))
        );
        assert_eq!(tetgen.out_point_count(), 0);
        assert_eq!(tetgen.input().points().len(), 4);
    }

    #[test]
    fn test_engine_panic_is_caught() {
        let mut tetgen = tetrahedron(PanickingEngine);
        let err = tetgen.generate_delaunay(false).unwrap_err();
        assert_eq!(
            err,
            MeshError::Engine(EngineFault::Unknown("solid engine aborted".to_string()))
        );
        assert_eq!(tetgen.out_point_count(), 0);
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_point_locator() {
        let mut tetgen = tetrahedron(TetEngine::default());
        tetgen.generate_mesh(&MeshOptions::default()).unwrap();
        let locator = tetgen.out_point_locator().unwrap();
        assert_eq!(locator.find_nearest(glam::DVec3::new(0.9, 0.0, 0.1)), 1);
    }
}
