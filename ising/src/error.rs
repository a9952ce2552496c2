use thiserror::Error;

/// Failures surfaced by lattice construction and thermalization.
#[derive(Debug, Error, PartialEq)]
pub enum IsingError {
    #[error("lattice dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("could not allocate storage for a {width}x{height} lattice")]
    Allocation { width: usize, height: usize },

    #[error("patience must be at least one step")]
    InvalidPatience,

    /// The flip weights summed to zero, infinity or NaN, so they cannot be
    /// normalized into a distribution.
    #[error("flip weights cannot be normalized (sum = {sum})")]
    DegenerateWeights { sum: f64 },
}
