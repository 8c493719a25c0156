/*!
 * Error types for the dualsub application.
 *
 * Parsing is the only part of the subtitle core that can fail; serializing
 * and merging are total. The application layer wraps everything else in
 * `AppError`, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Why a subtitle block could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// The first line of the block is not a decimal entry number
    #[error("invalid entry number '{0}'")]
    InvalidIndex(String),

    /// The second line of the block is not `<start> --> <end>`
    #[error("invalid timing line '{0}'")]
    InvalidTiming(String),

    /// The block ended right after its entry number
    #[error("missing timing line")]
    MissingTiming,
}

/// Errors raised while parsing SubRip text.
///
/// Parsing is all-or-nothing: when this error is returned no entries from
/// the input are available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Input does not decompose into valid entry blocks
    #[error("Malformed subtitle block {block} at line {line}: {reason}")]
    Malformed {
        /// 1-based index of the offending block
        block: usize,
        /// 1-based physical line number in the input
        line: usize,
        /// What was wrong with the block
        reason: MalformedReason,
    },
}

impl FormatError {
    /// 1-based index of the block that failed to parse
    pub fn block(&self) -> usize {
        match self {
            FormatError::Malformed { block, .. } => *block,
        }
    }

    /// 1-based line number where the problem was found
    pub fn line(&self) -> usize {
        match self {
            FormatError::Malformed { line, .. } => *line,
        }
    }

    pub fn reason(&self) -> &MalformedReason {
        match self {
            FormatError::Malformed { reason, .. } => reason,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Subtitle text could not be parsed
    #[error("Subtitle format error: {0}")]
    Format(#[from] FormatError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
