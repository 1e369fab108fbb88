use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::domain::EvaluationOutcome;

/// Append-only writer for the grading records.
///
/// The file is opened once per run and each record is flushed as soon as it
/// is written, so an interrupted run leaves a prefix of complete records and
/// never a torn one.
#[derive(Debug)]
pub struct ResultsWriter {
    file: File,
}

impl ResultsWriter {
    pub async fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::create(path).await?;
        Ok(Self { file })
    }

    /// Appends one `identifier,grade,reasonCode` line.
    pub async fn append(
        &mut self,
        name: &str,
        outcome: &EvaluationOutcome,
    ) -> std::io::Result<()> {
        let record = format!("{},{},{}\n", name, outcome.grade(), outcome.reason());
        self.file.write_all(record.as_bytes()).await?;
        self.file.flush().await
    }
}
