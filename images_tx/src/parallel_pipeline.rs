// THEORY:
// The parallel pipeline produces exactly the same image as `pipeline::Pipeline`, but
// spreads the pixel work of each step across a pool of blocking workers.
//
// Rules it keeps:
// 1.  Steps stay sequential. Step N+1 is only dispatched once every band of step N
//     has come back and been stacked into a complete buffer.
// 2.  Work is split into horizontal bands. Each worker gets an owned copy of its band
//     and returns a new band, so no two workers ever touch the same output pixel.
// 3.  For pixelation, bands are cut on tile-row boundaries and the tile list for every
//     band is computed from the `TileGrid` before anything is spawned. Clipped tiles
//     are therefore sized identically to the sequential path.
// 4.  Bands are reassembled in their original order, whatever order workers finish in.

use crate::core_modules::block_op::pixelate_tiles;
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::single_op::apply_channel_op;
use crate::core_modules::tile_grid::{Tile, TileGrid, split_evenly};
use crate::error::{FilterError, PipelineError};
use crate::pipeline::{Pipeline, step_failed};
use crate::transformation::{Operator, TransformationKind};
use futures::future::try_join_all;
use tokio::task::{JoinError, JoinHandle};

/// Tunables for the parallel pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Number of bands each step is split into. Clamped to at least one.
    pub workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
        }
    }
}

enum BandError {
    Filter(FilterError),
    Worker(JoinError),
}

type BandTask = JoinHandle<Result<PixelBuffer, FilterError>>;

/// Runs a `Pipeline` with each step fanned out over blocking worker tasks.
#[derive(Debug, Clone)]
pub struct ParallelPipeline {
    pipeline: Pipeline,
    config: PipelineConfig,
}

impl ParallelPipeline {
    pub fn new(pipeline: Pipeline, config: PipelineConfig) -> Self {
        let config = PipelineConfig {
            workers: config.workers.max(1),
        };
        Self { pipeline, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn transformations(&self) -> &[TransformationKind] {
        self.pipeline.transformations()
    }

    /// Runs every transformation in order, stopping at the first failure.
    pub async fn run(&self, buffer: PixelBuffer) -> Result<PixelBuffer, PipelineError> {
        let mut current = buffer;
        for (index, kind) in self.transformations().iter().copied().enumerate() {
            log::debug!(
                "step {}: {} on {}x{} buffer across {} workers",
                index,
                kind,
                current.width(),
                current.height(),
                self.config.workers
            );
            current = self
                .run_step(kind, current)
                .await
                .map_err(|err| match err {
                    BandError::Filter(source) => step_failed(index, kind, source),
                    BandError::Worker(join_error) => {
                        log::warn!("step {} ({}) lost a worker: {}", index, kind, join_error);
                        PipelineError::Worker(join_error.to_string())
                    }
                })?;
        }
        Ok(current)
    }

    async fn run_step(
        &self,
        kind: TransformationKind,
        buffer: PixelBuffer,
    ) -> Result<PixelBuffer, BandError> {
        match kind.operator() {
            Operator::Single(op) => {
                if buffer.is_empty() {
                    return Ok(buffer);
                }
                let tasks = split_evenly(buffer.height(), self.config.workers)
                    .into_iter()
                    .map(|rows| {
                        let band = buffer.band(rows);
                        tokio::task::spawn_blocking(move || {
                            Ok::<_, FilterError>(apply_channel_op(&band, op))
                        })
                    })
                    .collect();
                join_bands(tasks).await
            }
            Operator::Block(size) => {
                let grid = TileGrid::new(buffer.width(), buffer.height(), size)
                    .map_err(BandError::Filter)?;
                if grid.is_empty() {
                    return Ok(buffer);
                }
                let tasks = grid
                    .row_bands(self.config.workers)
                    .into_iter()
                    .map(|grid_rows| {
                        let pixel_rows = grid.pixel_rows(grid_rows.clone());
                        let tiles: Vec<Tile> = grid_rows
                            .flat_map(|row| grid.row(row))
                            .map(|tile| tile.shifted_up(pixel_rows.start))
                            .collect();
                        let band = buffer.band(pixel_rows);
                        tokio::task::spawn_blocking(move || pixelate_tiles(&band, &tiles))
                    })
                    .collect();
                join_bands(tasks).await
            }
        }
    }
}

/// Waits for every band in order and stacks the results back into one buffer.
async fn join_bands(tasks: Vec<BandTask>) -> Result<PixelBuffer, BandError> {
    let bands = try_join_all(tasks)
        .await
        .map_err(BandError::Worker)?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(BandError::Filter)?;
    PixelBuffer::stack(bands).map_err(BandError::Filter)
}
