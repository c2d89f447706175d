//! Switch-string builder
//!
//! Both engines are driven by a compact ASCII command line of single-letter switches,
//! some followed by a number. The builders here mirror the fixed-size command buffers
//! the engines were designed around: a token that does not fit is an error, never a
//! silent truncation.

use std::fmt;

use crate::config::MeshOptions;
use crate::error::{MeshError, Result};

/// Command buffer size for Delaunay and Voronoi runs
pub const DELAUNAY_CAPACITY: usize = 10;

/// Command buffer size for quality-mesh runs
pub const MESH_CAPACITY: usize = 128;

/// Scratch buffer size for a single numeric token
pub const NUMBER_CAPACITY: usize = 32;

/// Which engine a switch string is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// The planar (triangle) engine
    Planar,
    /// The solid (tetrahedron) engine
    Solid,
}

/// A bounded engine command string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switches {
    command: String,
    capacity: usize,
}

impl Switches {
    fn with_base(base: &str, capacity: usize) -> Result<Self> {
        let mut switches = Self {
            command: String::with_capacity(capacity),
            capacity,
        };
        switches.push(base)?;
        Ok(switches)
    }

    /// Switches for an unconstrained Delaunay run
    ///
    /// `z` numbers everything from zero; `Q` silences the engine.
    pub fn delaunay(verbose: bool) -> Result<Self> {
        let mut switches = Self::with_base("z", DELAUNAY_CAPACITY)?;
        if !verbose {
            switches.push("Q")?;
        }
        Ok(switches)
    }

    /// Switches for a Delaunay run that also writes the Voronoi diagram (`v`)
    pub fn voronoi(verbose: bool) -> Result<Self> {
        let mut switches = Self::with_base("zv", DELAUNAY_CAPACITY)?;
        if !verbose {
            switches.push("Q")?;
        }
        Ok(switches)
    }

    /// Switches for a quality-mesh run of a piecewise linear complex
    ///
    /// `p` reads the input as a PLC, `z` numbers from zero and `A` assigns regional
    /// attributes. A bare `q` keeps the engine's default minimum angle.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a numeric constraint is NaN or infinite, and
    /// `StringConcatOverflow` if one needs 32 bytes or more when written with 15
    /// decimals.
    pub fn mesh(dimension: Dimension, options: &MeshOptions) -> Result<Self> {
        for (name, value) in [
            ("global max size", options.global_max_size),
            ("global min angle", options.global_min_angle),
        ] {
            if let Some(value) = value.filter(|v| !v.is_finite()) {
                return Err(MeshError::InvalidConfig(format!(
                    "{} must be finite (got {})",
                    name, value
                )));
            }
        }

        let mut switches = Self::with_base("pzA", MESH_CAPACITY)?;
        if !options.verbose {
            switches.push("Q")?;
        }
        if options.quadratic {
            switches.push("o2")?;
        }
        if dimension == Dimension::Planar && !options.allow_new_points_on_boundary {
            switches.push("Y")?;
        }
        if let Some(max_size) = options.global_max_size.filter(|v| *v > 0.0) {
            switches.push_number('a', max_size)?;
        }
        match options.global_min_angle.filter(|v| *v > 0.0) {
            Some(min_angle) => {
                switches.push_number('q', min_angle)?;
            }
            None => {
                switches.push("q")?;
            }
        }
        Ok(switches)
    }

    fn push(&mut self, token: &str) -> Result<&mut Self> {
        // last byte of the buffer holds the terminator
        if self.command.len() + token.len() >= self.capacity {
            return Err(MeshError::StringConcatOverflow);
        }
        self.command.push_str(token);
        Ok(self)
    }

    fn push_number(&mut self, switch: char, value: f64) -> Result<&mut Self> {
        let token = format!("{}{:.15}", switch, value);
        if token.len() >= NUMBER_CAPACITY {
            return Err(MeshError::StringConcatOverflow);
        }
        self.push(&token)
    }

    /// The command text handed to the engine
    pub fn as_str(&self) -> &str {
        &self.command
    }

    /// Check whether a single-letter switch is present
    ///
    /// Numeric arguments are finite decimals and never contain letters, so this only
    /// sees switches.
    pub fn has(&self, switch: char) -> bool {
        self.command.contains(switch)
    }

    /// Size of the buffer this command was built for
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl fmt::Display for Switches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command)
    }
}
