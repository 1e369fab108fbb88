use std::panic;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::comparator::external::ExternalComparator;
use crate::compiler::gcc::GccCompiler;
use crate::config::GraderConfig;
use crate::locator::FsLocator;
use crate::pipeline::{EvaluationPipeline, Scratch};
use crate::results::ResultsWriter;
use crate::runner::sandbox::SandboxRunner;

mod comparator;
mod compiler;
mod config;
mod domain;
mod locator;
mod pipeline;
mod results;
mod runner;


const GCC_PATH: &str = "gcc";
const COMPARATOR_PATH: &str = "./comp.out";
const RESULTS_FILE_NAME: &str = "results.csv";
const TIMEOUT_SECS: u64 = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    set_panic_hook();

    let config_path = std::env::args()
        .nth(1)
        .ok_or("usage: autograder <config-file>")?;
    let config = GraderConfig::load(&config_path).await?;

    let pipeline = EvaluationPipeline::new(
        Arc::new(FsLocator),
        Arc::new(GccCompiler::new(GCC_PATH)),
        Arc::new(SandboxRunner),
        Arc::new(ExternalComparator::new(COMPARATOR_PATH)),
        Scratch::in_temp_dir()?,
        TIMEOUT_SECS,
    );

    let mut results = ResultsWriter::create(RESULTS_FILE_NAME).await?;
    let run_result = pipeline.run(&config, &mut results).await;
    pipeline.cleanup();
    run_result?;

    tracing::info!("grading finished");
    Ok(())
}

fn set_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        tracing::error!(
            message = "panic occurred",
            panic = %panic_info
        );
    }));
}
