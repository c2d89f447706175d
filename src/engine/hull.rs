//! Reference planar engine built on a sweep hull
//!
//! Points are added in lexicographic order to a growing convex hull, each one fanned to
//! the hull edges it can see. Edge flips then make every interior edge locally Delaunay.
//! Orientation and in-circle tests are exact, so thin triangles along nearly straight
//! boundaries are kept. The Voronoi diagram is read off the triangulation as its dual.

use std::collections::HashMap;

use glam::DVec2;
use robust::Coord;

use super::PlanarEngine;
use crate::error::EngineFault;
use crate::geometry::{PlanarInput, PlanarOutput, VoronoiOutput, RAY};
use crate::switches::Switches;

/// Unconstrained Delaunay and Voronoi engine
///
/// Understands the Delaunay (`z`) and Voronoi (`zv`) switch strings. Quality meshing
/// needs a constrained engine; `p` or `q` switches are answered with
/// [`HullEngine::UNSUPPORTED_SWITCHES`].
///
/// Duplicate points, non-finite coordinates and sets with every point on one line are
/// answered with [`HullEngine::DEGENERATE_INPUT`]. Cocircular points get one of their
/// valid Delaunay triangulations.
///
/// # Example
///
/// ```rust
/// use plc_mesh::*;
///
/// let mut trigen = Trigen::new(HullEngine::new(), 3, 0, 0, 0).unwrap();
/// trigen
///     .set_point(0, 0, 0.0, 0.0).unwrap()
///     .set_point(1, 0, 1.0, 0.0).unwrap()
///     .set_point(2, 0, 0.0, 1.0).unwrap();
/// trigen.generate_delaunay(false).unwrap();
///
/// assert_eq!(trigen.out_cell_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HullEngine;

impl HullEngine {
    /// Status for switch strings asking for constrained or quality meshing
    pub const UNSUPPORTED_SWITCHES: i32 = 2;

    /// Status for point sets without a unique triangulation
    pub const DEGENERATE_INPUT: i32 = 3;

    /// Create the engine
    pub fn new() -> Self {
        Self
    }
}

impl PlanarEngine for HullEngine {
    fn triangulate(
        &mut self,
        switches: &Switches,
        input: &PlanarInput,
        output: &mut PlanarOutput,
        voronoi: Option<&mut VoronoiOutput>,
    ) -> Result<(), EngineFault> {
        if switches.has('p') || switches.has('q') {
            return Err(EngineFault::Status(Self::UNSUPPORTED_SWITCHES));
        }

        let points = input.points();
        let triangles =
            delaunay(points).ok_or(EngineFault::Status(Self::DEGENERATE_INPUT))?;

        let mut owners: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        for (t, triangle) in triangles.iter().enumerate() {
            for k in 0..3 {
                owners
                    .entry(edge_key(triangle[k], triangle[(k + 1) % 3]))
                    .or_default()
                    .push(t);
            }
        }

        let mut point_markers = input.point_markers().to_vec();
        let mut edges = Vec::new();
        let mut edge_markers = Vec::new();
        let mut voronoi_edges = Vec::new();
        let mut ray_directions = Vec::new();

        for (t, triangle) in triangles.iter().enumerate() {
            for k in 0..3 {
                let (a, b) = (triangle[k], triangle[(k + 1) % 3]);
                let shared = &owners[&edge_key(a, b)];
                if shared.len() == 1 {
                    // hull edge, triangle is CCW so the outward normal is on the right
                    let d = points[b] - points[a];
                    edges.push([a, b]);
                    edge_markers.push(1);
                    voronoi_edges.push([t as i32, RAY]);
                    ray_directions.push(DVec2::new(d.y, -d.x));
                    for p in [a, b] {
                        if point_markers[p] == 0 {
                            point_markers[p] = 1;
                        }
                    }
                } else if shared[0] == t {
                    edges.push([a, b]);
                    edge_markers.push(0);
                    voronoi_edges.push([t as i32, shared[1] as i32]);
                    ray_directions.push(DVec2::ZERO);
                }
            }
        }

        output.points = points.to_vec();
        output.point_markers = point_markers;
        output.cell_corner_count = 3;
        output.cells = triangles.iter().flatten().copied().collect();
        output.cell_attributes = vec![0; triangles.len()];
        output.edges = edges;
        output.edge_markers = edge_markers;

        if let Some(voronoi) = voronoi.filter(|_| switches.has('v')) {
            voronoi.points = triangles
                .iter()
                .map(|&[a, b, c]| circumcenter(points[a], points[b], points[c]))
                .collect();
            voronoi.edges = voronoi_edges;
            voronoi.ray_directions = ray_directions;
        }

        tracing::debug!(
            points = points.len(),
            triangles = triangles.len(),
            "hull engine finished"
        );
        Ok(())
    }
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

/// Delaunay triangles as CCW point-index triples, or `None` for degenerate input
fn delaunay(points: &[DVec2]) -> Option<Vec<[usize; 3]>> {
    if points.len() < 3 || !points.iter().all(|p| p.is_finite()) {
        return None;
    }
    // adding zero folds -0.0 into 0.0 so equal coordinates sort together
    let pts: Vec<DVec2> = points.iter().map(|p| *p + DVec2::ZERO).collect();

    let mut order: Vec<usize> = (0..pts.len()).collect();
    order.sort_by(|&i, &j| {
        pts[i]
            .x
            .total_cmp(&pts[j].x)
            .then(pts[i].y.total_cmp(&pts[j].y))
    });
    if order.windows(2).any(|w| pts[w[0]] == pts[w[1]]) {
        return None;
    }

    let (first, second) = (pts[order[0]], pts[order[1]]);
    let apex = (2..order.len()).find(|&k| orient(first, second, pts[order[k]]) != 0.0)?;

    // order[..apex] is a collinear chain sorted along its line
    let chain = &order[..apex];
    let tip = order[apex];
    let mut triangles = Vec::with_capacity(2 * pts.len());
    let mut hull: Vec<usize> = if orient(first, second, pts[tip]) > 0.0 {
        triangles.extend(chain.windows(2).map(|w| [w[0], w[1], tip]));
        chain.to_vec()
    } else {
        triangles.extend(chain.windows(2).map(|w| [w[1], w[0], tip]));
        chain.iter().rev().copied().collect()
    };
    hull.push(tip);

    for &p in &order[apex + 1..] {
        add_to_hull(&pts, &mut hull, &mut triangles, p)?;
    }
    legalize(&pts, &mut triangles);
    Some(triangles)
}

/// Fan `p` to every hull edge it sees and splice it into the CCW hull
///
/// `p` must lie lexicographically past every hull point, which puts it strictly outside
/// the hull and makes the edges it sees one contiguous run.
fn add_to_hull(
    pts: &[DVec2],
    hull: &mut Vec<usize>,
    triangles: &mut Vec<[usize; 3]>,
    p: usize,
) -> Option<()> {
    let m = hull.len();
    let visible: Vec<bool> = (0..m)
        .map(|i| orient(pts[hull[i]], pts[hull[(i + 1) % m]], pts[p]) < 0.0)
        .collect();
    let start = (0..m).find(|&i| visible[i] && !visible[(i + m - 1) % m])?;
    let run = (0..m).take_while(|&j| visible[(start + j) % m]).count();

    for j in 0..run {
        let a = hull[(start + j) % m];
        let b = hull[(start + j + 1) % m];
        triangles.push([b, a, p]);
    }

    let mut next = Vec::with_capacity(m - run + 2);
    next.push(hull[start]);
    next.push(p);
    next.extend((run..m).map(|j| hull[(start + j) % m]));
    *hull = next;
    Some(())
}

/// Flip edges until every interior edge is locally Delaunay
///
/// Flips only happen on a strictly positive in-circle test, so cocircular quads keep
/// their diagonal and the loop terminates.
fn legalize(pts: &[DVec2], triangles: &mut [[usize; 3]]) {
    let mut owner: HashMap<(usize, usize), usize> = HashMap::with_capacity(3 * triangles.len());
    for (t, triangle) in triangles.iter().enumerate() {
        for k in 0..3 {
            owner.insert((triangle[k], triangle[(k + 1) % 3]), t);
        }
    }

    let mut pending: Vec<(usize, usize)> = triangles
        .iter()
        .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
        .filter(|(a, b)| a < b)
        .collect();

    while let Some((a, b)) = pending.pop() {
        let (Some(&left), Some(&right)) = (owner.get(&(a, b)), owner.get(&(b, a))) else {
            continue;
        };
        // left is (a, b, c) and right is (b, a, d), both CCW
        let c = opposite(triangles[left], a);
        let d = opposite(triangles[right], b);
        if incircle(pts[a], pts[b], pts[c], pts[d]) <= 0.0 {
            continue;
        }

        for t in [left, right] {
            let triangle = triangles[t];
            for k in 0..3 {
                owner.remove(&(triangle[k], triangle[(k + 1) % 3]));
            }
        }
        triangles[left] = [a, d, c];
        triangles[right] = [d, b, c];
        for t in [left, right] {
            let triangle = triangles[t];
            for k in 0..3 {
                owner.insert((triangle[k], triangle[(k + 1) % 3]), t);
            }
        }
        pending.extend([(a, d), (d, b), (b, c), (c, a)]);
    }
}

/// Corner of a CCW triangle across from the edge leaving `from`
fn opposite(triangle: [usize; 3], from: usize) -> usize {
    let k = triangle.iter().position(|&v| v == from).unwrap_or(0);
    triangle[(k + 2) % 3]
}

fn coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Positive when `c` lies left of the line from `a` to `b`
fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    robust::orient2d(coord(a), coord(b), coord(c))
}

/// Positive when `d` lies inside the circle through the CCW triangle `a`, `b`, `c`
fn incircle(a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> f64 {
    robust::incircle(coord(a), coord(b), coord(c), coord(d))
}

fn circumcenter(a: DVec2, b: DVec2, c: DVec2) -> DVec2 {
    let (b, c) = (b - a, c - a);
    let d = 2.0 * b.perp_dot(c);
    let (b2, c2) = (b.length_squared(), c.length_squared());
    a + DVec2::new(c.y * b2 - b.y * c2, b.x * c2 - c.x * b2) / d
}
