// THEORY:
// The `pipeline` module is the top-level API of the filter core. It folds an ordered
// list of transformations over a pixel buffer, one step at a time, left to right.
//
// It is modelled as a two-state machine:
// - `Ready` holds the buffer produced by the last successful step (initially the
//   decoded input);
// - `Failed` holds the error that stopped the run.
// Every step consumes the current state and returns the next one. Once `Failed`, the
// run is over: later steps are not attempted and no partial image is handed back.

use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::error::{FilterError, PipelineError};
use crate::transformation::TransformationKind;

// Re-export key data structures for the public API.
pub use crate::transformation::Operator;

/// The state of a pipeline run between two steps.
#[derive(Debug)]
pub enum PipelineState {
    Ready(PixelBuffer),
    Failed(PipelineError),
}

impl PipelineState {
    pub fn new(buffer: PixelBuffer) -> Self {
        PipelineState::Ready(buffer)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, PipelineState::Failed(_))
    }

    /// Applies the transformation at position `index` of the list.
    pub fn step(self, index: usize, kind: TransformationKind) -> Self {
        let buffer = match self {
            PipelineState::Ready(buffer) => buffer,
            failed @ PipelineState::Failed(_) => return failed,
        };
        log::debug!(
            "step {}: {} on {}x{} buffer",
            index,
            kind,
            buffer.width(),
            buffer.height()
        );
        match kind.operator().apply(&buffer) {
            Ok(next) => {
                debug_assert_eq!(next.dimensions(), buffer.dimensions());
                PipelineState::Ready(next)
            }
            Err(source) => PipelineState::Failed(step_failed(index, kind, source)),
        }
    }

    /// Resolves `name` and applies it. An unknown name fails the run.
    pub fn step_named(self, index: usize, name: &str) -> Self {
        if self.is_failed() {
            return self;
        }
        match name.parse::<TransformationKind>() {
            Ok(kind) => self.step(index, kind),
            Err(err) => {
                log::warn!("step {}: {}", index, err);
                PipelineState::Failed(err)
            }
        }
    }

    pub fn into_result(self) -> Result<PixelBuffer, PipelineError> {
        match self {
            PipelineState::Ready(buffer) => Ok(buffer),
            PipelineState::Failed(err) => Err(err),
        }
    }
}

/// Wraps a core failure with the step that raised it. Both runners report failed
/// steps through here, so they leave the same log trace.
pub(crate) fn step_failed(
    index: usize,
    kind: TransformationKind,
    source: FilterError,
) -> PipelineError {
    log::warn!("step {} ({}) failed: {}", index, kind, source);
    PipelineError::Step {
        index,
        kind,
        source,
    }
}

/// Resolves every name up front, failing on the first unknown one before any pixel
/// work happens.
pub fn resolve_all<S: AsRef<str>>(names: &[S]) -> Result<Vec<TransformationKind>, PipelineError> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

/// An ordered list of transformations, ready to run over any buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    transformations: Vec<TransformationKind>,
}

impl Pipeline {
    pub fn new(transformations: Vec<TransformationKind>) -> Self {
        Self { transformations }
    }

    /// Builds a pipeline from flags or canonical names.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, PipelineError> {
        resolve_all(names).map(Self::new)
    }

    pub fn transformations(&self) -> &[TransformationKind] {
        &self.transformations
    }

    /// Runs every transformation in order, stopping at the first failure.
    pub fn run(&self, buffer: PixelBuffer) -> Result<PixelBuffer, PipelineError> {
        let mut state = PipelineState::new(buffer);
        for (index, kind) in self.transformations.iter().copied().enumerate() {
            state = state.step(index, kind);
            if state.is_failed() {
                break;
            }
        }
        state.into_result()
    }
}

/// Runs a list of unresolved names, resolving each one only when its turn comes.
///
/// Steps before an unknown name still run; the unknown name then fails the whole run.
pub fn run_named<S: AsRef<str>>(
    buffer: PixelBuffer,
    names: &[S],
) -> Result<PixelBuffer, PipelineError> {
    let mut state = PipelineState::new(buffer);
    for (index, name) in names.iter().enumerate() {
        state = state.step_named(index, name.as_ref());
        if state.is_failed() {
            break;
        }
    }
    state.into_result()
}
