use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::comparator::traits::{CompareError, Comparator};
use crate::domain::Tier;

/// Delegates output comparison to an external executable invoked with both
/// file paths as arguments.
#[derive(Clone, Debug)]
pub struct ExternalComparator {
    comparator_path: PathBuf,
}

impl ExternalComparator {
    pub fn new(comparator_path: impl AsRef<Path>) -> Self {
        Self {
            comparator_path: comparator_path.as_ref().into(),
        }
    }
}

#[async_trait::async_trait]
impl Comparator for ExternalComparator {
    async fn compare(&self, produced: &Path, reference: &Path) -> Result<Tier, CompareError> {
        let status = Command::new(&self.comparator_path)
            .arg(produced)
            .arg(reference)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| CompareError::Spawn { msg: e.to_string() })?;

        let code = status.code();
        let tier = code
            .and_then(Tier::from_exit_code)
            .ok_or(CompareError::UnrecognizedExit { code })?;

        tracing::debug!(produced = %produced.display(), ?tier, "outputs compared");
        Ok(tier)
    }
}
