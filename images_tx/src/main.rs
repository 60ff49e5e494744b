// The `images_tx` binary: decode the input file, run the requested transformations,
// and write the result.

use images_tx::codec;
use images_tx::error::{CodecError, ParameterError, PipelineError};
use images_tx::parameters::{Parameters, help_text, parse_parameters};
use images_tx::{ParallelPipeline, Pipeline, PipelineConfig};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Parameters(#[from] ParameterError),
    #[error("cannot read {path}: {source}")]
    Input { path: String, source: CodecError },
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("cannot write {path}: {source}")]
    Output { path: String, source: CodecError },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(std::env::args().skip(1)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            if matches!(err, AppError::Parameters(_)) {
                eprintln!("{}", help_text());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: impl Iterator<Item = String>) -> Result<(), AppError> {
    let params = parse_parameters(args)?;
    if params.show_help {
        print!("{}", help_text());
        return Ok(());
    }

    let Parameters {
        transformations,
        input_file,
        output_file,
        parallel,
        ..
    } = params;

    let input = codec::open(&input_file).map_err(|source| AppError::Input {
        path: input_file.display().to_string(),
        source,
    })?;
    log::info!(
        "loaded {} ({}x{})",
        input_file.display(),
        input.width(),
        input.height()
    );

    let pipeline = Pipeline::new(transformations);
    let output = if parallel {
        let runner = ParallelPipeline::new(pipeline, PipelineConfig::default());
        log::info!(
            "running {} transformations on {} workers",
            runner.transformations().len(),
            runner.config().workers
        );
        runner.run(input).await?
    } else {
        log::info!("running {} transformations", pipeline.transformations().len());
        pipeline.run(input)?
    };

    codec::save(&output, &output_file).map_err(|source| AppError::Output {
        path: output_file.display().to_string(),
        source,
    })?;
    log::info!("wrote {}", output_file.display());
    Ok(())
}
