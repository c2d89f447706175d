//! Solid input record: a piecewise linear complex of facets

use glam::DVec3;

use super::{allocate, write_slot, Region};
use crate::error::{MeshError, Result};

/// An ordered loop of point indices
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<usize>,
    assigned: Vec<bool>,
}

impl Polygon {
    fn allocate(nvertex: usize) -> Result<Self> {
        Ok(Self {
            vertices: allocate(nvertex, 0, "facet vertex list")?,
            assigned: allocate(nvertex, false, "facet vertex list")?,
        })
    }

    /// Point indices around the polygon
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }
}

/// A planar boundary piece of the complex
///
/// Every facet holds exactly one polygon and no facet holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    polygons: Vec<Polygon>,
    holes: Vec<DVec3>,
    marker: i32,
}

impl Facet {
    fn allocate(nvertex: usize) -> Result<Self> {
        let mut polygons = Vec::new();
        polygons
            .try_reserve_exact(1)
            .map_err(|_| MeshError::AllocationFailed("facet polygon list"))?;
        polygons.push(Polygon::allocate(nvertex)?);
        Ok(Self {
            polygons,
            holes: Vec::new(),
            marker: 0,
        })
    }

    /// Polygons of this facet
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Seeds of holes within the facet plane (always empty here)
    pub fn holes(&self) -> &[DVec3] {
        &self.holes
    }

    /// Boundary marker carried to the faces generated on this facet
    pub fn marker(&self) -> i32 {
        self.marker
    }
}

/// Input geometry for the solid engine
#[derive(Debug)]
pub struct SolidInput {
    points: Vec<DVec3>,
    point_markers: Vec<i32>,
    facets: Vec<Facet>,
    regions: Vec<Region<DVec3>>,
    holes: Vec<DVec3>,
    points_set: Vec<bool>,
}

impl SolidInput {
    /// Allocate points, facets with their polygons, regions and holes
    ///
    /// `facet_npoint` gives the vertex count of each facet's polygon; its length is the
    /// number of facets. Nothing is kept if any nested allocation fails.
    pub(crate) fn allocate(
        npoint: usize,
        facet_npoint: &[usize],
        nregion: usize,
        nhole: usize,
    ) -> Result<Self> {
        let points = allocate(npoint, DVec3::ZERO, "point list")?;
        let point_markers = allocate(npoint, 0, "point marker list")?;
        let points_set = allocate(npoint, false, "point list")?;

        let mut facets = Vec::new();
        facets
            .try_reserve_exact(facet_npoint.len())
            .map_err(|_| MeshError::AllocationFailed("facet list"))?;
        for &nvertex in facet_npoint {
            facets.push(Facet::allocate(nvertex)?);
        }

        let regions = allocate(nregion, Region::default(), "region list")?;
        let holes = allocate(nhole, DVec3::ZERO, "hole list")?;
        Ok(Self {
            points,
            point_markers,
            facets,
            regions,
            holes,
            points_set,
        })
    }

    pub(crate) fn set_point(
        &mut self,
        index: usize,
        marker: i32,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<()> {
        write_slot(
            &mut self.points,
            index,
            DVec3::new(x, y, z),
            MeshError::NullPointList,
            MeshError::InvalidPointIndex,
        )?;
        self.point_markers[index] = marker;
        self.points_set[index] = true;
        Ok(())
    }

    /// Set the point id of vertex `m` on the polygon of facet `index`
    pub(crate) fn set_facet_point(&mut self, index: usize, m: usize, p: usize) -> Result<()> {
        if self.facets.is_empty() {
            return Err(MeshError::NullFacetList);
        }
        let npoint = self.points.len();
        let facet = self
            .facets
            .get_mut(index)
            .ok_or(MeshError::InvalidFacetIndex)?;
        if facet.polygons.is_empty() {
            return Err(MeshError::NullFacetPolygonList);
        }
        if facet.polygons.len() != 1 {
            return Err(MeshError::InvalidFacetNumPolygon);
        }
        let polygon = &mut facet.polygons[0];
        if m >= polygon.vertices.len() {
            return Err(MeshError::InvalidFacetPointIndex);
        }
        if p >= npoint {
            return Err(MeshError::InvalidFacetPointId);
        }
        polygon.vertices[m] = p;
        polygon.assigned[m] = true;
        Ok(())
    }

    pub(crate) fn set_facet_marker(&mut self, index: usize, marker: i32) -> Result<()> {
        if self.facets.is_empty() {
            return Err(MeshError::NullFacetList);
        }
        let facet = self
            .facets
            .get_mut(index)
            .ok_or(MeshError::InvalidFacetIndex)?;
        facet.marker = marker;
        Ok(())
    }

    pub(crate) fn set_region(
        &mut self,
        index: usize,
        attribute: usize,
        x: f64,
        y: f64,
        z: f64,
        max_volume: Option<f64>,
    ) -> Result<()> {
        let region = Region {
            point: DVec3::new(x, y, z),
            attribute,
            max_size: max_volume.unwrap_or(-1.0),
        };
        write_slot(
            &mut self.regions,
            index,
            region,
            MeshError::NullRegionList,
            MeshError::InvalidRegionIndex,
        )
    }

    pub(crate) fn set_hole(&mut self, index: usize, x: f64, y: f64, z: f64) -> Result<()> {
        write_slot(
            &mut self.holes,
            index,
            DVec3::new(x, y, z),
            MeshError::NullHoleList,
            MeshError::InvalidHoleIndex,
        )
    }

    /// Point coordinates
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// One marker per point
    pub fn point_markers(&self) -> &[i32] {
        &self.point_markers
    }

    /// Facets of the complex
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Region seeds
    pub fn regions(&self) -> &[Region<DVec3>] {
        &self.regions
    }

    /// Hole seeds
    pub fn holes(&self) -> &[DVec3] {
        &self.holes
    }

    /// Whether every point slot has been written
    pub fn all_points_set(&self) -> bool {
        self.points_set.iter().all(|set| *set)
    }

    /// Whether every vertex of every facet polygon has been written
    pub fn all_facets_set(&self) -> bool {
        self.facets
            .iter()
            .flat_map(|facet| facet.polygons.iter())
            .all(|polygon| polygon.assigned.iter().all(|set| *set))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron() -> SolidInput {
        let mut input = SolidInput::allocate(4, &[3, 3, 3, 3], 1, 1).unwrap();
        input.set_point(0, 0, 0.0, 0.0, 0.0).unwrap();
        input.set_point(1, 0, 1.0, 0.0, 0.0).unwrap();
        input.set_point(2, 0, 0.0, 1.0, 0.0).unwrap();
        input.set_point(3, 0, 0.0, 0.0, 1.0).unwrap();
        input
    }

    #[test]
    fn test_allocate_builds_one_polygon_per_facet() {
        let input = SolidInput::allocate(5, &[3, 4, 5], 0, 0).unwrap();
        assert_eq!(input.facets().len(), 3);
        for (facet, n) in input.facets().iter().zip([3, 4, 5]) {
            assert_eq!(facet.polygons().len(), 1);
            assert!(facet.holes().is_empty());
            assert_eq!(facet.polygons()[0].vertices().len(), n);
        }
    }

    #[test]
    fn test_allocate_failure_in_nested_facet() {
        let result = SolidInput::allocate(4, &[3, usize::MAX], 0, 0);
        assert_eq!(
            result.err(),
            Some(MeshError::AllocationFailed("facet vertex list"))
        );
    }

    #[test]
    fn test_set_facet_point() {
        let mut input = tetrahedron();
        input.set_facet_point(0, 0, 0).unwrap();
        input.set_facet_point(0, 1, 2).unwrap();
        input.set_facet_point(0, 2, 1).unwrap();
        assert_eq!(input.facets()[0].polygons()[0].vertices(), &[0, 2, 1]);
        assert!(!input.all_facets_set());
    }

    #[test]
    fn test_set_facet_point_errors() {
        let mut input = tetrahedron();
        assert_eq!(
            input.set_facet_point(4, 0, 0),
            Err(MeshError::InvalidFacetIndex)
        );
        assert_eq!(
            input.set_facet_point(0, 3, 0),
            Err(MeshError::InvalidFacetPointIndex)
        );
        assert_eq!(
            input.set_facet_point(0, 0, 4),
            Err(MeshError::InvalidFacetPointId)
        );
        assert_eq!(input.facets()[0].polygons()[0].vertices(), &[0, 0, 0]);

        let mut bare = SolidInput::allocate(4, &[], 0, 0).unwrap();
        assert_eq!(bare.set_facet_point(0, 0, 0), Err(MeshError::NullFacetList));
        assert_eq!(bare.set_facet_marker(0, 1), Err(MeshError::NullFacetList));
    }

    #[test]
    fn test_facet_polygon_invariant() {
        let mut input = tetrahedron();
        input.facets[1].polygons.clear();
        assert_eq!(
            input.set_facet_point(1, 0, 0),
            Err(MeshError::NullFacetPolygonList)
        );

        let extra = input.facets[0].polygons[0].clone();
        input.facets[0].polygons.push(extra);
        assert_eq!(
            input.set_facet_point(0, 0, 0),
            Err(MeshError::InvalidFacetNumPolygon)
        );
    }

    #[test]
    fn test_set_facet_marker() {
        let mut input = tetrahedron();
        input.set_facet_marker(2, -10).unwrap();
        assert_eq!(input.facets()[2].marker(), -10);
        assert_eq!(
            input.set_facet_marker(4, 1),
            Err(MeshError::InvalidFacetIndex)
        );
    }

    #[test]
    fn test_all_facets_set() {
        let mut input = tetrahedron();
        let faces = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
        for (i, face) in faces.iter().enumerate() {
            for (m, p) in face.iter().enumerate() {
                input.set_facet_point(i, m, *p).unwrap();
            }
        }
        assert!(input.all_facets_set());
    }

    #[test]
    fn test_set_region_and_hole() {
        let mut input = tetrahedron();
        input.set_region(0, 4, 0.1, 0.1, 0.1, Some(0.5)).unwrap();
        assert_eq!(input.regions()[0].attribute, 4);
        assert_eq!(input.regions()[0].max_size, 0.5);
        assert_eq!(
            input.set_region(1, 4, 0.1, 0.1, 0.1, None),
            Err(MeshError::InvalidRegionIndex)
        );

        input.set_hole(0, 0.2, 0.2, 0.2).unwrap();
        assert_eq!(input.holes()[0], DVec3::new(0.2, 0.2, 0.2));
        assert_eq!(
            input.set_hole(3, 0.0, 0.0, 0.0),
            Err(MeshError::InvalidHoleIndex)
        );
    }
}
