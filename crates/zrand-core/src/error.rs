use thiserror::Error;

pub type ZrandResult<T> = Result<T, ZrandError>;

#[derive(Debug, Error)]
pub enum ZrandError {
    #[error("randomness source failed: {0}")]
    Entropy(#[from] rand::Error),

    #[error("select source is too large: {len} bytes (maximum 256)")]
    SourceTooLarge { len: usize },

    #[error("select cannot draw {size} bytes from an empty source")]
    EmptySource { size: usize },

    #[error("{region} region is {actual} bytes (expected {expected})")]
    RegionMismatch {
        region: Region,
        expected: usize,
        actual: usize,
    },

    #[error("operation requirements overflow usize")]
    SizeOverflow,
}

/// Names one of the three buffers handed to [`crate::Op::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Output,
    Scratch,
    Randomness,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Output => f.write_str("output"),
            Region::Scratch => f.write_str("scratch"),
            Region::Randomness => f.write_str("randomness"),
        }
    }
}
