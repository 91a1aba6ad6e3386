use image::ImageError;

/// Everything that can go wrong in the numeric core or its file helpers.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("complex division by zero")]
    DivisionByZero,
    #[error("dimension mismatch: {rows}x{cols} grid given {actual} cells")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        actual: usize,
    },
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("malformed grid at line {line}: {reason}")]
    MalformedGrid { line: usize, reason: String },
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image: {0}")]
    Image(ImageError),
    #[error("Config: {0}")]
    Config(String),
}

impl From<ImageError> for Error {
    fn from(err: ImageError) -> Self {
        Error::Image(err)
    }
}

impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedGrid {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
