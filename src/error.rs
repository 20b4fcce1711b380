/// Errors returned by sketch construction and merging.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Precision (or a value it is derived from) outside the supported range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Merge of two sketches built with different precision.
    #[error("incompatible sketch: cannot merge precision {right} into precision {left}")]
    IncompatibleSketch { left: u8, right: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
