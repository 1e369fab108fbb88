use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::compiler::traits::{CompileError, Compiler};

/// Compiles C sources by spawning gcc as a child process.
///
/// This is a pure boolean gate on the toolchain's exit status; diagnostics go
/// to the null device and are never inspected.
#[derive(Clone, Debug)]
pub struct GccCompiler {
    gcc_path: PathBuf,
}

impl GccCompiler {
    pub fn new(gcc_path: impl AsRef<Path>) -> Self {
        Self {
            gcc_path: gcc_path.as_ref().into(),
        }
    }
}

#[async_trait::async_trait]
impl Compiler for GccCompiler {
    async fn compile(&self, source: &Path, artifact: &Path) -> Result<(), CompileError> {
        let status = Command::new(&self.gcc_path)
            .arg("-o")
            .arg(artifact)
            .arg(source)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| CompileError::Spawn { msg: e.to_string() })?;

        if status.success() {
            tracing::debug!(source = %source.display(), "compilation succeeded");
            Ok(())
        } else {
            tracing::debug!(source = %source.display(), ?status, "compilation failed");
            Err(CompileError::Failed)
        }
    }
}
