use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A backing buffer could not be reserved. The object being built does not exist.
    #[error("allocation failure: {0}")]
    AllocationFailure(String),
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("invalid range: high {high} must be greater than low {low}")]
    InvalidRange { low: f64, high: f64 },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reserve exactly `len` elements, mapping a failed reservation to
/// [`Error::AllocationFailure`].
pub(crate) fn try_alloc<T: Clone>(len: usize, fill: T, what: &str) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| Error::AllocationFailure(format!("{what} ({len} elements): {e}")))?;
    buf.resize(len, fill);
    Ok(buf)
}
