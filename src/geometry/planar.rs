//! Planar input record: points, segments, regions and holes

use glam::DVec2;

use super::{allocate, write_slot, Region};
use crate::error::{MeshError, Result};

/// Input geometry for the planar engine
///
/// A planar straight line graph: points, segments between them, region seeds and hole
/// seeds. Lists with a zero count at creation stay empty and their setters report the
/// matching `Null*List` error.
#[derive(Debug)]
pub struct PlanarInput {
    points: Vec<DVec2>,
    point_markers: Vec<i32>,
    segments: Vec<[usize; 2]>,
    segment_markers: Vec<i32>,
    regions: Vec<Region<DVec2>>,
    holes: Vec<DVec2>,
    points_set: Vec<bool>,
    segments_set: Vec<bool>,
}

impl PlanarInput {
    /// Allocate every list up front; nothing is kept if any allocation fails
    pub(crate) fn allocate(
        npoint: usize,
        nsegment: usize,
        nregion: usize,
        nhole: usize,
    ) -> Result<Self> {
        let points = allocate(npoint, DVec2::ZERO, "point list")?;
        let point_markers = allocate(npoint, 0, "point marker list")?;
        let points_set = allocate(npoint, false, "point list")?;
        let segments = allocate(nsegment, [0, 0], "segment list")?;
        let segment_markers = allocate(nsegment, 0, "segment marker list")?;
        let segments_set = allocate(nsegment, false, "segment list")?;
        let regions = allocate(nregion, Region::default(), "region list")?;
        let holes = allocate(nhole, DVec2::ZERO, "hole list")?;
        Ok(Self {
            points,
            point_markers,
            segments,
            segment_markers,
            regions,
            holes,
            points_set,
            segments_set,
        })
    }

    pub(crate) fn set_point(&mut self, index: usize, marker: i32, x: f64, y: f64) -> Result<()> {
        write_slot(
            &mut self.points,
            index,
            DVec2::new(x, y),
            MeshError::NullPointList,
            MeshError::InvalidPointIndex,
        )?;
        self.point_markers[index] = marker;
        self.points_set[index] = true;
        Ok(())
    }

    pub(crate) fn set_segment(
        &mut self,
        index: usize,
        marker: i32,
        a: usize,
        b: usize,
    ) -> Result<()> {
        if self.segments.is_empty() {
            return Err(MeshError::NullSegmentList);
        }
        if index >= self.segments.len() {
            return Err(MeshError::InvalidSegmentIndex);
        }
        if a >= self.points.len() || b >= self.points.len() {
            return Err(MeshError::InvalidSegmentPointId);
        }
        self.segments[index] = [a, b];
        self.segment_markers[index] = marker;
        self.segments_set[index] = true;
        Ok(())
    }

    pub(crate) fn set_region(
        &mut self,
        index: usize,
        attribute: usize,
        x: f64,
        y: f64,
        max_area: Option<f64>,
    ) -> Result<()> {
        let region = Region {
            point: DVec2::new(x, y),
            attribute,
            max_size: max_area.unwrap_or(-1.0),
        };
        write_slot(
            &mut self.regions,
            index,
            region,
            MeshError::NullRegionList,
            MeshError::InvalidRegionIndex,
        )
    }

    pub(crate) fn set_hole(&mut self, index: usize, x: f64, y: f64) -> Result<()> {
        write_slot(
            &mut self.holes,
            index,
            DVec2::new(x, y),
            MeshError::NullHoleList,
            MeshError::InvalidHoleIndex,
        )
    }

    /// Point coordinates
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// One marker per point
    pub fn point_markers(&self) -> &[i32] {
        &self.point_markers
    }

    /// Segment endpoints as point indices
    pub fn segments(&self) -> &[[usize; 2]] {
        &self.segments
    }

    /// One marker per segment
    pub fn segment_markers(&self) -> &[i32] {
        &self.segment_markers
    }

    /// Region seeds
    pub fn regions(&self) -> &[Region<DVec2>] {
        &self.regions
    }

    /// Hole seeds
    pub fn holes(&self) -> &[DVec2] {
        &self.holes
    }

    /// Whether every point slot has been written
    pub fn all_points_set(&self) -> bool {
        self.points_set.iter().all(|set| *set)
    }

    /// Whether every segment slot has been written
    pub fn all_segments_set(&self) -> bool {
        self.segments_set.iter().all(|set| *set)
    }
}
