//! Quality-mesh configuration and builder
//!
//! [`MeshOptions`] is the structured configuration that the switch-string builder
//! translates into engine tokens for a quality-mesh run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// Configuration for a quality-mesh run
///
/// The same options drive both engines. `allow_new_points_on_boundary` only has an
/// effect on the planar engine; the size constraint is an area in 2-D and a volume
/// in 3-D.
///
/// # Example
///
/// ```rust
/// use plc_mesh::*;
///
/// let options = MeshOptionsBuilder::new()
///     .quadratic(true)
///     .global_max_size(0.1)
///     .unwrap()
///     .build();
///
/// assert!(options.quadratic);
/// assert_eq!(options.global_max_size, Some(0.1));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshOptions {
    /// Let the engine report progress (otherwise runs quietly)
    pub verbose: bool,

    /// Generate second-order cells (6-node triangles, 10-node tetrahedra)
    pub quadratic: bool,

    /// Allow Steiner points on the mesh boundary (planar engine only)
    pub allow_new_points_on_boundary: bool,

    /// Maximum area (2-D) or volume (3-D) of every generated cell
    pub global_max_size: Option<f64>,

    /// Minimum angle in degrees; `None` keeps the engine's default quality bound
    pub global_min_angle: Option<f64>,
}

impl Default for MeshOptions {
    fn default() -> Self {
        MeshOptionsBuilder::new().build()
    }
}

/// Builder for creating [`MeshOptions`] with validation
///
/// Defaults:
/// - verbose: false
/// - quadratic: false
/// - allow_new_points_on_boundary: true
/// - global_max_size: None
/// - global_min_angle: None
#[derive(Debug, Clone)]
pub struct MeshOptionsBuilder {
    verbose: bool,
    quadratic: bool,
    allow_new_points_on_boundary: bool,
    global_max_size: Option<f64>,
    global_min_angle: Option<f64>,
}

impl MeshOptionsBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            verbose: false,
            quadratic: false,
            allow_new_points_on_boundary: true,
            global_max_size: None,
            global_min_angle: None,
        }
    }

    /// Print engine messages and emit a run report
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Generate second-order cells with mid-edge nodes
    pub fn quadratic(mut self, quadratic: bool) -> Self {
        self.quadratic = quadratic;
        self
    }

    /// Allow or forbid Steiner points on the boundary (planar engine only)
    pub fn allow_new_points_on_boundary(mut self, allow: bool) -> Self {
        self.allow_new_points_on_boundary = allow;
        self
    }

    /// Set the maximum area (2-D) or volume (3-D) for all cells
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the value is not finite or not positive
    pub fn global_max_size(mut self, max_size: f64) -> Result<Self> {
        if !max_size.is_finite() || max_size <= 0.0 {
            return Err(MeshError::InvalidConfig(format!(
                "global max size must be finite and > 0 (got {})",
                max_size
            )));
        }
        self.global_max_size = Some(max_size);
        Ok(self)
    }

    /// Set the minimum angle constraint in degrees
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the angle is not finite or not in (0, 180)
    pub fn global_min_angle(mut self, min_angle: f64) -> Result<Self> {
        if !min_angle.is_finite() || min_angle <= 0.0 || min_angle >= 180.0 {
            return Err(MeshError::InvalidConfig(format!(
                "global min angle must be in (0, 180) degrees (got {})",
                min_angle
            )));
        }
        self.global_min_angle = Some(min_angle);
        Ok(self)
    }

    /// Build the options
    pub fn build(self) -> MeshOptions {
        MeshOptions {
            verbose: self.verbose,
            quadratic: self.quadratic,
            allow_new_points_on_boundary: self.allow_new_points_on_boundary,
            global_max_size: self.global_max_size,
            global_min_angle: self.global_min_angle,
        }
    }
}

impl Default for MeshOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
