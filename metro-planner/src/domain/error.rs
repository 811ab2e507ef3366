//! Domain error types.
//!
//! These errors represent malformed network data. They are raised while
//! building a network, before any trip is planned.

/// Errors from constructing a distance matrix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// The matrix has no stations
    #[error("network must have at least one station")]
    Empty,

    /// More stations than there are labels
    #[error("network has {0} stations but at most 26 can be labelled")]
    TooManyStations(usize),

    /// A row does not have one entry per station
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A station has a distance to itself
    #[error("distance from station {0} to itself must be 0")]
    NonZeroDiagonal(char),
}
