//! Example: Delaunay triangulation of a random point cloud
//!
//! Demonstrates sizing a planar instance, filling it and reading the mesh back.

use plc_mesh::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn main() {
    println!("Planar Delaunay Example");
    println!("=======================\n");

    let npoint = 20;
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut trigen =
        Trigen::new(HullEngine::new(), npoint, 0, 0, 0).expect("Failed to allocate instance");

    for i in 0..npoint {
        let x = rng.gen_range(0.0..10.0);
        let y = rng.gen_range(0.0..10.0);
        trigen.set_point(i, 0, x, y).expect("Failed to set point");
    }

    println!("Triangulating {} points...", npoint);
    trigen
        .generate_delaunay(false)
        .expect("Failed to triangulate");

    println!("Statistics:");
    println!("  Points: {}", trigen.out_point_count());
    println!("  Triangles: {}", trigen.out_cell_count());
    let hull = (0..trigen.out_point_count())
        .filter(|&i| trigen.out_point_marker(i) != 0)
        .count();
    println!("  Points on the hull: {}", hull);
    println!();

    println!("Sample triangles:");
    for cell in 0..trigen.out_cell_count().min(5) {
        let corners: Vec<String> = (0..trigen.out_cell_corner_count())
            .map(|m| {
                let p = trigen.out_cell_node(cell, m);
                format!("({:.2}, {:.2})", trigen.out_point(p, 0), trigen.out_point(p, 1))
            })
            .collect();
        println!("  Triangle {}: {}", cell, corners.join(" "));
    }

    #[cfg(feature = "spatial-index")]
    {
        let locator = trigen.out_point_locator().expect("Mesh has no points");
        let nearest = locator.find_nearest_planar(DVec2::new(5.0, 5.0));
        println!(
            "\nClosest point to the center: {} at ({:.2}, {:.2})",
            nearest,
            trigen.out_point(nearest, 0),
            trigen.out_point(nearest, 1)
        );
    }

    println!("\nTriangulation complete!");
}
