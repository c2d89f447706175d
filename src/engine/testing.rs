//! Scripted engines for exercising the generators without native code

use glam::{DVec2, DVec3};

use super::{PlanarEngine, SolidEngine};
use crate::error::EngineFault;
use crate::geometry::{
    MarkedFace, PlanarInput, PlanarOutput, SolidInput, SolidOutput, VoronoiOutput, RAY,
};
use crate::numbering::{tetrahedron_node, TETRAHEDRON_EDGES};
use crate::switches::Switches;

/// Planar engine that fans triangles out of point 0 and records its calls
#[derive(Debug, Default)]
pub(crate) struct FanEngine {
    pub calls: usize,
    pub switches: Vec<String>,
}

impl PlanarEngine for FanEngine {
    fn triangulate(
        &mut self,
        switches: &Switches,
        input: &PlanarInput,
        output: &mut PlanarOutput,
        voronoi: Option<&mut VoronoiOutput>,
    ) -> Result<(), EngineFault> {
        self.calls += 1;
        self.switches.push(switches.to_string());

        let points = input.points();
        let attribute = input.regions().first().map_or(0, |r| r.attribute);
        output.points = points.to_vec();
        output.point_markers = input.point_markers().to_vec();
        output.cell_corner_count = if switches.has('o') { 6 } else { 3 };
        for i in 1..points.len() - 1 {
            let corners = [0, i, i + 1];
            output.cells.extend(corners);
            if switches.has('o') {
                // engine corners 3, 4, 5 sit opposite vertices 0, 1, 2
                for [a, b] in [[1, 2], [2, 0], [0, 1]] {
                    output.cells.push(output.points.len());
                    output.points.push((points[corners[a]] + points[corners[b]]) * 0.5);
                    output.point_markers.push(0);
                }
            }
            output.cell_attributes.push(attribute);
        }
        if switches.has('p') {
            output.segments = input.segments().to_vec();
            output.segment_markers = input.segment_markers().to_vec();
        }

        if let Some(voronoi) = voronoi {
            voronoi.points = vec![DVec2::new(0.5, 0.5), DVec2::new(2.0, 1.0)];
            voronoi.edges = vec![[0, 1], [1, RAY]];
            voronoi.ray_directions = vec![DVec2::new(9.0, 9.0), DVec2::new(0.0, -1.0)];
        }
        Ok(())
    }
}

/// Solid engine that meshes the first four points as a single tetrahedron
///
/// Facets with a non-zero marker come back as marked faces, points reversed.
#[derive(Debug, Default)]
pub(crate) struct TetEngine {
    pub calls: usize,
    pub switches: Vec<String>,
}

impl SolidEngine for TetEngine {
    fn tetrahedralize(
        &mut self,
        switches: &Switches,
        input: &SolidInput,
        output: &mut SolidOutput,
    ) -> Result<(), EngineFault> {
        self.calls += 1;
        self.switches.push(switches.to_string());

        let corners = &input.points()[..4];
        output.points = corners.to_vec();
        output.point_markers = input.point_markers()[..4].to_vec();
        output.cells = vec![0, 1, 2, 3];
        output.cell_corner_count = 4;
        if switches.has('o') {
            // mid-edge points laid out in engine corner order
            for corner in 4..10 {
                let node = tetrahedron_node(corner).unwrap_or(corner);
                let [a, b] = TETRAHEDRON_EDGES[node - 4];
                output.cells.push(output.points.len());
                output.points.push((corners[a] + corners[b]) * 0.5);
                output.point_markers.push(0);
            }
            output.cell_corner_count = 10;
        }
        output.cell_attributes = vec![input.regions().first().map_or(0, |r| r.attribute)];

        if switches.has('p') {
            for facet in input.facets().iter().filter(|f| f.marker() != 0) {
                let vertices = facet.polygons()[0].vertices();
                if let &[a, b, c] = vertices {
                    output.marked_faces.push(MarkedFace {
                        points: [c, b, a],
                        marker: facet.marker(),
                        cell: 0,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Engine that writes partial output, then reports a fault
#[derive(Debug)]
pub(crate) struct FaultingEngine(pub EngineFault);

impl PlanarEngine for FaultingEngine {
    fn triangulate(
        &mut self,
        _switches: &Switches,
        _input: &PlanarInput,
        output: &mut PlanarOutput,
        voronoi: Option<&mut VoronoiOutput>,
    ) -> Result<(), EngineFault> {
        output.points.push(DVec2::ONE);
        if let Some(voronoi) = voronoi {
            voronoi.points.push(DVec2::ONE);
        }
        Err(self.0.clone())
    }
}

impl SolidEngine for FaultingEngine {
    fn tetrahedralize(
        &mut self,
        _switches: &Switches,
        _input: &SolidInput,
        output: &mut SolidOutput,
    ) -> Result<(), EngineFault> {
        output.points.push(DVec3::ONE);
        Err(self.0.clone())
    }
}

/// Engine that writes partial output, then panics
#[derive(Debug, Default)]
pub(crate) struct PanickingEngine;

impl PlanarEngine for PanickingEngine {
    fn triangulate(
        &mut self,
        _switches: &Switches,
        _input: &PlanarInput,
        output: &mut PlanarOutput,
        _voronoi: Option<&mut VoronoiOutput>,
    ) -> Result<(), EngineFault> {
        output.points.push(DVec2::ONE);
        panic!("planar engine aborted");
    }
}

impl SolidEngine for PanickingEngine {
    fn tetrahedralize(
        &mut self,
        _switches: &Switches,
        _input: &SolidInput,
        output: &mut SolidOutput,
    ) -> Result<(), EngineFault> {
        output.points.push(DVec3::ONE);
        panic!("solid engine aborted");
    }
}
