//! Error types for geometry population, switch strings and engine runs

use thiserror::Error;

/// Fault raised by an external meshing engine during a run
///
/// Engines report failures by returning one of these; a panic inside an engine is
/// caught at the invocation seam and reported as [`EngineFault::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineFault {
    /// The engine stopped with a numeric status code
    #[error("engine stopped with status {0}")]
    Status(i32),
    /// The engine failed in a way it could not classify
    #[error("engine failed: {0}")]
    Unknown(String),
}

/// Errors returned by instance creation, setters and runs
///
/// Read accessors never return errors; out-of-range reads yield a neutral value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// The instance is missing (e.g. unknown registry handle)
    #[error("found null data")]
    NullData,
    /// The point list was never allocated
    #[error("found null point list")]
    NullPointList,
    /// The segment list was never allocated (segment count was zero)
    #[error("found null segment list")]
    NullSegmentList,
    /// The facet list was never allocated (facet count was zero)
    #[error("found null facet list")]
    NullFacetList,
    /// A facet has no polygon
    #[error("found null facet polygon list")]
    NullFacetPolygonList,
    /// The region list was never allocated (region count was zero)
    #[error("found null region list")]
    NullRegionList,
    /// The hole list was never allocated (hole count was zero)
    #[error("found null hole list")]
    NullHoleList,
    /// Point index is out of bounds
    #[error("index of point is out of bounds")]
    InvalidPointIndex,
    /// Segment index is out of bounds
    #[error("index of segment is out of bounds")]
    InvalidSegmentIndex,
    /// A segment endpoint references a point that does not exist
    #[error("id of segment point is out of bounds")]
    InvalidSegmentPointId,
    /// Facet index is out of bounds
    #[error("index of facet is out of bounds")]
    InvalidFacetIndex,
    /// Local vertex slot on a facet polygon is out of bounds
    #[error("index of facet point is out of bounds")]
    InvalidFacetPointIndex,
    /// A facet vertex references a point that does not exist
    #[error("id of facet point is out of bounds")]
    InvalidFacetPointId,
    /// Region index is out of bounds
    #[error("index of region is out of bounds")]
    InvalidRegionIndex,
    /// Hole index is out of bounds
    #[error("index of hole is out of bounds")]
    InvalidHoleIndex,
    /// A facet does not hold exactly one polygon
    #[error("facet must have exactly one polygon")]
    InvalidFacetNumPolygon,
    /// Heap allocation failed while creating an instance
    #[error("cannot allocate {0}")]
    AllocationFailed(&'static str),
    /// A switch-string token does not fit its buffer
    #[error("cannot write switch string for the engine")]
    StringConcatOverflow,
    /// The engine faulted during a run
    #[error(transparent)]
    Engine(#[from] EngineFault),
    /// Fewer points than needed to define a mesh
    #[error("npoint must be ≥ {min} (got {got})")]
    TooFewPoints {
        /// Minimum viable point count for the dimensionality
        min: usize,
        /// Requested point count
        got: usize,
    },
    /// A run was requested before all required slots were populated
    #[error("cannot run because not all {0} are set")]
    IncompleteInput(&'static str),
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MeshError {
    /// Numeric status code of this error at the engine boundary
    ///
    /// Codes are stable and grouped by category: 10s for instance-level problems,
    /// hundreds for missing lists, thousands for out-of-range indices.
    pub fn code(&self) -> i32 {
        match self {
            MeshError::Engine(_) => 1,
            MeshError::NullData => 10,
            MeshError::StringConcatOverflow => 20,
            MeshError::AllocationFailed(_) => 30,
            MeshError::TooFewPoints { .. } => 40,
            MeshError::IncompleteInput(_) => 50,
            MeshError::InvalidConfig(_) => 60,
            MeshError::NullPointList => 100,
            MeshError::NullSegmentList => 200,
            MeshError::NullFacetList => 300,
            MeshError::NullFacetPolygonList => 400,
            MeshError::NullRegionList => 500,
            MeshError::NullHoleList => 600,
            MeshError::InvalidPointIndex => 1000,
            MeshError::InvalidSegmentIndex => 2000,
            MeshError::InvalidSegmentPointId => 3000,
            MeshError::InvalidFacetIndex => 4000,
            MeshError::InvalidFacetPointIndex => 5000,
            MeshError::InvalidFacetPointId => 6000,
            MeshError::InvalidRegionIndex => 7000,
            MeshError::InvalidHoleIndex => 8000,
            MeshError::InvalidFacetNumPolygon => 9000,
        }
    }
}

/// Result type alias for meshing operations
pub type Result<T> = std::result::Result<T, MeshError>;
