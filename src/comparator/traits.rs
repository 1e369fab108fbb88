use std::path::Path;

use crate::domain::Tier;

#[derive(Debug, Clone, thiserror::Error)]
pub enum CompareError {
    /// The comparator exited with a code outside its 1/2/3 contract, or died
    /// to a signal (`code` is `None`).
    #[error("comparator exited with unrecognized code {code:?}")]
    UnrecognizedExit { code: Option<i32> },
    #[error("failed to launch comparator: {msg}")]
    Spawn { msg: String },
}

/// Judges a produced output against the reference output.
///
/// What counts as "similar" versus "different" is entirely the comparator's
/// business; this seam only translates its exit code into a [`Tier`].
#[mockall::automock]
#[async_trait::async_trait]
pub trait Comparator: std::fmt::Debug + Send + Sync {
    async fn compare(&self, produced: &Path, reference: &Path) -> Result<Tier, CompareError>;
}
