use std::path::PathBuf;

use anyhow::{Context, Result};
use complexity_common::Config;
use complexity_inference::{InferenceDriver, InferenceSummary};
use tracing::info;

#[derive(Debug, Default)]
pub struct InferArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub max_samples: Option<usize>,
    pub model: Option<String>,
}

/// Apply command-line overrides on top of the loaded config.
pub fn apply(mut config: Config, args: InferArgs) -> Config {
    if let Some(input) = args.input {
        config.inference.input_path = input;
    }
    if let Some(output) = args.output {
        config.inference.output_path = output;
    }
    if let Some(max_samples) = args.max_samples {
        config.inference.max_samples = max_samples;
    }
    if let Some(model) = args.model {
        config.ollama.model = model;
    }
    config
}

pub async fn run(config: Config, args: InferArgs) -> Result<InferenceSummary> {
    let config = apply(config, args);
    info!(
        "Classifying up to {} records from {} with {} at {}",
        config.inference.max_samples,
        config.inference.input_path.display(),
        config.ollama.model,
        config.ollama.url
    );

    // The driver owns the HTTP client for exactly this run
    let driver = InferenceDriver::from_config(&config).context("Invalid inference config")?;
    let summary = driver
        .run_files(&config.inference.input_path, &config.inference.output_path)
        .await
        .context("Inference run failed")?;
    drop(driver);

    Ok(summary)
}
