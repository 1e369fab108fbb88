use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

use crate::comparator::traits::Comparator;
use crate::compiler::traits::Compiler;
use crate::config::GraderConfig;
use crate::domain::{EvaluationOutcome, Submission};
use crate::locator::Locator;
use crate::results::ResultsWriter;
use crate::runner::traits::{RunVerdict, Runner};

const ARTIFACT_FILE_NAME: &str = "current.out";
const CAPTURE_FILE_NAME: &str = "out.txt";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to read submissions directory {dir}: {source}")]
    ListSubmissions {
        dir: String,
        source: std::io::Error,
    },
    #[error("failed to write results: {0}")]
    Results(#[from] std::io::Error),
}

/// Scratch locations shared by every submission's evaluation.
///
/// The build artifact and the captured output are overwritten in place for
/// each submission rather than uniquely named, which is exactly why
/// evaluations must stay strictly sequential.
#[derive(Debug)]
pub struct Scratch {
    dir: PathBuf,
    pub artifact: PathBuf,
    pub capture: PathBuf,
}

impl Scratch {
    /// Creates a scratch directory unique to this run under the system temp
    /// directory.
    pub fn in_temp_dir() -> std::io::Result<Self> {
        let dir = std::env::temp_dir().join(format!("autograder_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir)?;
        Ok(Self::in_dir(dir))
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        Self {
            artifact: dir.join(ARTIFACT_FILE_NAME),
            capture: dir.join(CAPTURE_FILE_NAME),
            dir,
        }
    }

    /// Best-effort removal of the scratch directory; results already written
    /// do not depend on it.
    pub fn cleanup(&self) {
        if let Err(err) = std::fs::remove_dir_all(&self.dir) {
            tracing::debug!(%err, dir = %self.dir.display(), "scratch cleanup failed");
        }
    }
}

/// Sequences locate, compile, run and compare for each submission, writing
/// one record per submission in discovery order.
pub struct EvaluationPipeline {
    locator: Arc<dyn Locator>,
    compiler: Arc<dyn Compiler>,
    runner: Arc<dyn Runner>,
    comparator: Arc<dyn Comparator>,
    scratch: Scratch,
    timeout_secs: u64,
}

impl EvaluationPipeline {
    pub fn new(
        locator: Arc<dyn Locator>,
        compiler: Arc<dyn Compiler>,
        runner: Arc<dyn Runner>,
        comparator: Arc<dyn Comparator>,
        scratch: Scratch,
        timeout_secs: u64,
    ) -> Self {
        Self {
            locator,
            compiler,
            runner,
            comparator,
            scratch,
            timeout_secs,
        }
    }

    /// Grades every submission under the configured root, one at a time.
    ///
    /// Per-submission failures become grade-0 records and never abort the
    /// run; only an unreadable root or a results write failure does.
    pub async fn run(
        &self,
        config: &GraderConfig,
        results: &mut ResultsWriter,
    ) -> Result<(), PipelineError> {
        let submissions = self.discover(&config.submissions_dir)?;
        tracing::info!(count = submissions.len(), "submissions discovered");

        for submission in &submissions {
            let outcome = self
                .evaluate(submission, &config.input_file, &config.reference_output)
                .await;
            tracing::info!(
                name = %submission.name,
                grade = outcome.grade(),
                reason = outcome.reason(),
                "submission graded"
            );
            results.append(&submission.name, &outcome).await?;
        }

        Ok(())
    }

    /// Enumerates the immediate subdirectories of `root` in listing order.
    fn discover(&self, root: &Path) -> Result<Vec<Submission>, PipelineError> {
        let list_err = |source| PipelineError::ListSubmissions {
            dir: root.display().to_string(),
            source,
        };

        let mut submissions = Vec::new();
        for entry in std::fs::read_dir(root).map_err(&list_err)? {
            let entry = entry.map_err(&list_err)?;
            if entry.file_type().map_err(&list_err)?.is_dir() {
                submissions.push(Submission {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    dir: entry.path(),
                });
            }
        }
        Ok(submissions)
    }

    /// One submission's trip through the four stages. Short-circuits on the
    /// first failing stage; later stages are never invoked.
    pub async fn evaluate(
        &self,
        submission: &Submission,
        input: &Path,
        reference: &Path,
    ) -> EvaluationOutcome {
        let source = match self.locator.locate(&submission.dir).await {
            Ok(Some(path)) => path,
            Ok(None) => return EvaluationOutcome::NoSource,
            Err(err) => {
                // An unreadable submission directory only fails that
                // submission; the rest of the run keeps its results.
                tracing::warn!(name = %submission.name, %err, "submission directory unreadable");
                return EvaluationOutcome::NoSource;
            }
        };

        if let Err(err) = self.compiler.compile(&source, &self.scratch.artifact).await {
            tracing::debug!(name = %submission.name, %err, "build failed");
            return EvaluationOutcome::BuildFailed;
        }

        match self
            .runner
            .run(
                &self.scratch.artifact,
                input,
                &self.scratch.capture,
                self.timeout_secs,
            )
            .await
        {
            Ok(RunVerdict::Completed) => {}
            Ok(RunVerdict::TimedOut) => return EvaluationOutcome::TimedOut,
            Err(err) => {
                tracing::warn!(name = %submission.name, %err, "run setup failed");
                return EvaluationOutcome::RunFailed;
            }
        }

        match self.comparator.compare(&self.scratch.capture, reference).await {
            Ok(tier) => EvaluationOutcome::Classified(tier),
            Err(err) => {
                tracing::warn!(name = %submission.name, %err, "comparison failed");
                EvaluationOutcome::ComparatorFailed
            }
        }
    }

    pub fn cleanup(&self) {
        self.scratch.cleanup();
    }
}
