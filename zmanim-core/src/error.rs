//! Error types for zmanim-core

use thiserror::Error;

/// Result type for zmanim-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using zmanim-core.
///
/// Note that "the sun never reaches this zenith today" is *not* an error:
/// calculations model it as `None` (or NaN at the fractional-hour layer).
/// These variants cover malformed inputs only, which fail fast instead of
/// leaking NaN into geometry that was never designed for them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Latitude outside the [-90, 90] degree range
    #[error("Invalid latitude: {0} (must be within -90..=90 degrees)")]
    InvalidLatitude(f64),

    /// Longitude outside the [-180, 180] degree range
    #[error("Invalid longitude: {0} (must be within -180..=180 degrees)")]
    InvalidLongitude(f64),

    /// Negative or non-finite elevation
    #[error("Invalid elevation: {0} (must be a non-negative number of meters)")]
    InvalidElevation(f64),

    /// Lookup of a zman opinion key that is not registered
    #[error("Unknown zman opinion: {0}")]
    UnknownOpinion(String),
}
