// THEORY:
// Every layer of the filter reports failure through its own typed enum instead of
// strings or panics. The core (`FilterError`) only knows about pixels and tiles; the
// `PipelineError` wraps a core failure with the identity of the transformation that
// produced it; `CodecError` and `ParameterError` belong to the thin collaborators at
// the edges of the program.
//
// Failures are grouped into three families so callers can decide how loudly to react:
// 1.  **Configuration**: the request itself is wrong (unknown transformation, a zero
//     block size). Nothing about the image matters.
// 2.  **Data**: the pixels cannot be processed (empty averaging set, malformed pixel
//     data). Deterministic for a given input, so never retried.
// 3.  **InternalInvariant**: tiling arithmetic produced a coordinate outside the
//     buffer. This is a defect in the filter, not in the input.

use crate::transformation::TransformationKind;
use thiserror::Error;

/// The three failure families every error maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Data,
    InternalInvariant,
}

/// Failures raised by the pixel-level core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("cannot divide by zero: the pixel block is empty")]
    DivideByZero,

    #[error("malformed pixel at offset {offset}: expected 4 channels, found {channels}")]
    MalformedPixel { offset: usize, channels: usize },

    #[error("ragged pixel buffer: row {row} has {found} pixels, expected {expected}")]
    RaggedBuffer {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{found} pixels cannot fill a {width}x{height} pixel buffer")]
    DimensionMismatch {
        width: usize,
        height: usize,
        found: usize,
    },

    #[error("block origin ({x}, {y}) is outside the {width}x{height} pixel buffer")]
    IndexOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("block size must be positive, got {0}")]
    InvalidBlockSize(usize),
}

impl FilterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::DivideByZero
            | FilterError::MalformedPixel { .. }
            | FilterError::RaggedBuffer { .. }
            | FilterError::DimensionMismatch { .. } => ErrorKind::Data,
            FilterError::IndexOutOfRange { .. } => ErrorKind::InternalInvariant,
            FilterError::InvalidBlockSize(_) => ErrorKind::Configuration,
        }
    }
}

/// Failures that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unknown transformation: {0}")]
    UnknownTransformation(String),

    /// A resolved transformation failed; `index` is its position in the list.
    #[error("cannot transform image at step {index} ({kind}): {source}")]
    Step {
        index: usize,
        kind: TransformationKind,
        #[source]
        source: FilterError,
    },

    #[error("parallel worker failed: {0}")]
    Worker(String),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::UnknownTransformation(_) => ErrorKind::Configuration,
            PipelineError::Step { source, .. } => source.kind(),
            PipelineError::Worker(_) => ErrorKind::InternalInvariant,
        }
    }
}

/// Failures from decoding, encoding and file access.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot decode image data: {0}")]
    Decode(#[source] image::ImageError),

    #[error("cannot encode image data: {0}")]
    Encode(#[source] image::ImageError),

    #[error("pixel conversion on empty array is invalid")]
    EmptyBuffer,

    #[error(transparent)]
    Pixels(#[from] FilterError),
}

/// Failures while reading the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("unknown transformation flag: {0}")]
    UnknownFlag(String),

    #[error("input file not properly defined")]
    MissingInput,

    #[error("output file not properly defined")]
    MissingOutput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_errors_map_to_their_family() {
        assert_eq!(FilterError::DivideByZero.kind(), ErrorKind::Data);
        assert_eq!(FilterError::InvalidBlockSize(0).kind(), ErrorKind::Configuration);
        let out_of_range = FilterError::IndexOutOfRange {
            x: 9,
            y: 0,
            width: 3,
            height: 3,
        };
        assert_eq!(out_of_range.kind(), ErrorKind::InternalInvariant);
    }

    #[test]
    fn step_error_names_the_transformation_and_cause() {
        let err = PipelineError::Step {
            index: 2,
            kind: TransformationKind::Pixelate3,
            source: FilterError::DivideByZero,
        };
        let message = err.to_string();
        assert!(message.contains("step 2"));
        assert!(message.contains("pixelate3"));
        assert!(message.contains("divide by zero"));
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn unknown_transformation_is_a_configuration_error() {
        let err = PipelineError::UnknownTransformation("-x".to_string());
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "unknown transformation: -x");
    }
}
