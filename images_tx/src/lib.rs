// THEORY:
// This file is the main entry point for the `images_tx` library crate. The binary in
// `main.rs` is only a thin shell around it: parse parameters, decode, run a pipeline,
// encode.
//
// The public surface is the `Pipeline` (and its parallel twin), the
// `TransformationKind` vocabulary, and the `PixelBuffer` they operate on. The
// pixel-level machinery lives in `core_modules`; the codec and parameter modules are
// the edges that touch files and argv.

pub mod codec;
pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod parameters;
pub mod pipeline;
pub mod transformation;

pub use core_modules::pixel::pixel::Pixel;
pub use core_modules::pixel_buffer::PixelBuffer;
pub use parallel_pipeline::{ParallelPipeline, PipelineConfig};
pub use pipeline::Pipeline;
pub use transformation::TransformationKind;
