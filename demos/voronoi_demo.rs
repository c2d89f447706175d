//! Example: Voronoi diagram of a small point set
//!
//! Prints every Voronoi edge, telling finite edges from rays.

use plc_mesh::*;

fn main() {
    println!("Planar Voronoi Example");
    println!("======================\n");

    let points = [
        (0.0, 0.0),
        (1.0, 0.0),
        (0.0, 1.0),
        (0.9, 0.8),
        (0.3, 0.25),
        (0.55, 0.4),
    ];

    let mut trigen = Trigen::new(HullEngine::new(), points.len(), 0, 0, 0)
        .expect("Failed to allocate instance");
    for (i, (x, y)) in points.iter().enumerate() {
        trigen.set_point(i, 0, *x, *y).expect("Failed to set point");
    }
    trigen
        .generate_voronoi(true)
        .expect("Failed to build Voronoi diagram");

    println!("Voronoi points:");
    for i in 0..trigen.out_voronoi_point_count() {
        println!(
            "  {}: ({:.3}, {:.3})",
            i,
            trigen.out_voronoi_point(i, 0),
            trigen.out_voronoi_point(i, 1)
        );
    }

    println!("\nVoronoi edges:");
    for i in 0..trigen.out_voronoi_edge_count() {
        let a = trigen.out_voronoi_edge_point(i, 0);
        match trigen.out_voronoi_edge_point_b(i) {
            VoronoiEdgePoint::Index(b) => println!("  {}: {} -> {}", i, a, b),
            VoronoiEdgePoint::Direction(dx, dy) => {
                println!("  {}: {} -> ray ({:.3}, {:.3})", i, a, dx, dy)
            }
        }
    }

    println!("\nDiagram complete!");
}
