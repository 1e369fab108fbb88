use std::path::Path;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CompileError {
    /// The compiler ran but did not exit with status 0 (this covers being
    /// killed by a signal as well).
    #[error("compiler exited unsuccessfully")]
    Failed,
    #[error("failed to launch compiler: {msg}")]
    Spawn { msg: String },
}

/// Produces an executable from one source file.
#[mockall::automock]
#[async_trait::async_trait]
pub trait Compiler: std::fmt::Debug + Send + Sync {
    /// Compiles `source` into an executable at `artifact`, overwriting any
    /// previous artifact at that path.
    async fn compile(&self, source: &Path, artifact: &Path) -> Result<(), CompileError>;
}
