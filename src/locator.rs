use std::io;
use std::path::{Path, PathBuf};

/// Finds the source file to grade inside a submission directory.
#[mockall::automock]
#[async_trait::async_trait]
pub trait Locator: std::fmt::Debug + Send + Sync {
    /// Returns the first C source file found by a depth-first walk of `root`,
    /// or `None` if the submission contains no C file at any depth.
    async fn locate(&self, root: &Path) -> io::Result<Option<PathBuf>>;
}

#[derive(Clone, Debug, Default)]
pub struct FsLocator;

#[async_trait::async_trait]
impl Locator for FsLocator {
    async fn locate(&self, root: &Path) -> io::Result<Option<PathBuf>> {
        find_c_file(root)
    }
}

/// Depth-first search in directory-entry order: a directory entry is recursed
/// into as soon as it is encountered, so which of several eligible files wins
/// depends on the filesystem's listing order. Single-file submissions are
/// deterministic; anything else is not.
fn find_c_file(dir: &Path) -> io::Result<Option<PathBuf>> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let path = entry.path();

        if file_type.is_file() && has_c_extension(&path) {
            return Ok(Some(path));
        }

        if file_type.is_dir() {
            if let Some(found) = find_c_file(&path)? {
                return Ok(Some(found));
            }
        }
    }

    Ok(None)
}

fn has_c_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "c")
}
