//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Broad classification of a [`LutError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file content does not follow the cube format.
    Format,
    /// A declared value is outside its permitted range.
    Range,
    /// The file could not be read or written.
    Io,
}

/// Errors that can occur while loading or building a LUT.
#[derive(Debug, Error)]
pub enum LutError {
    /// The file declares a LUT dimensionality other than 3D.
    #[error("unsupported LUT dimensionality: {keyword} on line {line} (only LUT_3D_SIZE is supported)")]
    UnsupportedDimension {
        /// Offending keyword.
        keyword: String,
        /// 1-based line number.
        line: usize,
    },

    /// No `LUT_3D_SIZE` before the first data row (or anywhere).
    #[error("missing LUT_3D_SIZE declaration{}", at_line(.line))]
    MissingSize {
        /// 1-based line number of the first data row, `None` if the file
        /// has no data rows at all.
        line: Option<usize>,
    },

    /// `LUT_3D_SIZE` appeared after data rows began.
    #[error("LUT_3D_SIZE on line {line} after data rows began")]
    SizeAfterData {
        /// 1-based line number.
        line: usize,
    },

    /// A numeric token could not be parsed.
    #[error("malformed number '{token}' on line {line}")]
    MalformedNumber {
        /// The token as found in the file.
        token: String,
        /// 1-based line number.
        line: usize,
    },

    /// A line has the wrong shape (e.g. token count).
    #[error("malformed line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Number of data rows differs from `size^3`.
    #[error("expected {expected} data rows for size {size}, found {found}")]
    RowCount {
        /// Declared cube size.
        size: usize,
        /// `size^3`.
        expected: usize,
        /// Rows actually read.
        found: usize,
    },

    /// Cube size outside `[MIN_SIZE, MAX_SIZE]`.
    #[error("invalid LUT size {0}: must be within [2, 256]")]
    SizeOutOfRange(usize),

    /// Domain minimum is not below domain maximum.
    #[error("inverted domain on channel {channel}: min {min} >= max {max}")]
    InvertedDomain {
        /// Channel index (0 = R, 1 = G, 2 = B).
        channel: usize,
        /// Domain minimum.
        min: f32,
        /// Domain maximum.
        max: f32,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LutError {
    /// Returns the broad class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SizeOutOfRange(_) | Self::InvertedDomain { .. } => ErrorKind::Range,
            Self::Io(_) => ErrorKind::Io,
            _ => ErrorKind::Format,
        }
    }
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" before data row on line {}", line),
        None => String::new(),
    }
}
