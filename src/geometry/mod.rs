//! Geometry records exchanged with the meshing engines
//!
//! Input records are fixed-capacity: every list is sized when the instance is created
//! and setters only fill existing slots. Output records are written by the engine and
//! read back through the generator accessors.

mod output;
mod planar;
mod solid;

pub use output::{MarkedFace, PlanarOutput, SolidOutput, VoronoiEdgePoint, VoronoiOutput, RAY};
pub use planar::PlanarInput;
pub use solid::{Facet, Polygon, SolidInput};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// Fewest points that can define a planar mesh
pub const MIN_PLANAR_POINTS: usize = 3;

/// Fewest points that can define a solid mesh
pub const MIN_SOLID_POINTS: usize = 4;

/// A region seed with its attribute and size constraint
///
/// A negative `max_size` assigns the attribute without bounding cell size.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region<P> {
    /// Seed point inside the region
    pub point: P,
    /// Attribute given to every cell of the region
    pub attribute: usize,
    /// Maximum cell area (2-D) or volume (3-D), negative for none
    pub max_size: f64,
}

impl<P: Default> Default for Region<P> {
    fn default() -> Self {
        Self {
            point: P::default(),
            attribute: 0,
            max_size: -1.0,
        }
    }
}

/// Allocate a buffer of `len` copies of `value`, reporting exhaustion instead of aborting
pub(crate) fn allocate<T: Clone>(len: usize, value: T, what: &'static str) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| MeshError::AllocationFailed(what))?;
    buffer.resize(len, value);
    Ok(buffer)
}

/// Write into a fixed slot, with separate errors for a missing list and a bad index
pub(crate) fn write_slot<T>(
    slots: &mut [T],
    index: usize,
    value: T,
    null: MeshError,
    invalid: MeshError,
) -> Result<()> {
    if slots.is_empty() {
        return Err(null);
    }
    match slots.get_mut(index) {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(invalid),
    }
}
