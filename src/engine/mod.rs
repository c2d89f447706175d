//! Engine seam
//!
//! The meshing engines are external collaborators. A planar engine triangulates a
//! [`PlanarInput`]; a solid engine tetrahedralizes a [`SolidInput`]. Both are driven by
//! a [`Switches`] command and write into output records owned by the generator.
//!
//! Whatever an engine does on failure, a returned [`EngineFault`] or a panic, is caught
//! by [`invoke`] and turned into [`MeshError::Engine`]. Nothing escapes past it.

mod hull;

#[cfg(test)]
pub(crate) mod testing;

pub use hull::HullEngine;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{EngineFault, MeshError, Result};
use crate::geometry::{PlanarInput, PlanarOutput, SolidInput, SolidOutput, VoronoiOutput};
use crate::switches::Switches;

/// An engine that triangulates planar straight line graphs
pub trait PlanarEngine {
    /// Run the engine once
    ///
    /// `voronoi` is `Some` only when the switch string carries `v`. The output records
    /// arrive cleared.
    fn triangulate(
        &mut self,
        switches: &Switches,
        input: &PlanarInput,
        output: &mut PlanarOutput,
        voronoi: Option<&mut VoronoiOutput>,
    ) -> std::result::Result<(), EngineFault>;
}

/// An engine that tetrahedralizes piecewise linear complexes
pub trait SolidEngine {
    /// Run the engine once; the output record arrives cleared
    fn tetrahedralize(
        &mut self,
        switches: &Switches,
        input: &SolidInput,
        output: &mut SolidOutput,
    ) -> std::result::Result<(), EngineFault>;
}

/// Run an engine call, translating faults and panics into [`MeshError::Engine`]
pub(crate) fn invoke<F>(engine: &str, switches: &Switches, run: F) -> Result<()>
where
    F: FnOnce() -> std::result::Result<(), EngineFault>,
{
    tracing::debug!(engine, switches = switches.as_str(), "invoking engine");

    let outcome = match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(result) => result,
        Err(payload) => Err(EngineFault::Unknown(panic_message(payload.as_ref()))),
    };

    outcome.map_err(|fault| {
        tracing::warn!(engine, switches = switches.as_str(), %fault, "engine run failed");
        MeshError::Engine(fault)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown engine panic".to_string()
    }
}
