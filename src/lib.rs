//! Geometry marshaling for planar and solid mesh generators
//!
//! Wraps two external meshing engines behind fixed-capacity geometry records: one that
//! triangulates planar straight line graphs ([`Trigen`]) and one that tetrahedralizes
//! piecewise linear complexes ([`Tetgen`]). Callers size an instance once, fill it
//! index by index, run it in Delaunay, Voronoi or quality-mesh mode and read the mesh
//! back through bounds-checked accessors.
//!
//! Engines implement [`PlanarEngine`] or [`SolidEngine`]. [`HullEngine`] is a small
//! reference planar engine for unconstrained Delaunay and Voronoi runs.
//!
//! # Quick Start
//!
//! ```rust
//! use plc_mesh::*;
//!
//! let mut trigen = Trigen::new(HullEngine::new(), 5, 0, 0, 0).unwrap();
//! trigen
//!     .set_point(0, 0, 0.0, 0.0).unwrap()
//!     .set_point(1, 0, 1.0, 0.0).unwrap()
//!     .set_point(2, 0, 0.0, 1.0).unwrap()
//!     .set_point(3, 0, 0.9, 0.8).unwrap()
//!     .set_point(4, 0, 0.3, 0.25).unwrap();
//!
//! trigen.generate_delaunay(false).unwrap();
//! println!("Generated {} triangles", trigen.out_cell_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): KD-tree nearest-point lookups over output meshes
//! - `serde`: Serialization support for configuration and output records

// Modules
pub mod error;
pub mod config;
pub mod switches;
pub mod geometry;
pub mod numbering;
pub mod engine;
pub mod trigen;
pub mod tetgen;
pub mod registry;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{EngineFault, MeshError, Result};
pub use config::{MeshOptions, MeshOptionsBuilder};
pub use switches::{Dimension, Switches};
pub use geometry::{
    Facet, MarkedFace, PlanarInput, PlanarOutput, Polygon, Region, SolidInput, SolidOutput,
    VoronoiEdgePoint, VoronoiOutput,
};
pub use engine::{HullEngine, PlanarEngine, SolidEngine};
pub use trigen::Trigen;
pub use tetgen::Tetgen;
pub use registry::{generate_handle, Handle, Registry};

#[cfg(feature = "spatial-index")]
pub use spatial::PointLocator;

// Re-export glam vectors for convenience
pub use glam::{DVec2, DVec3};
