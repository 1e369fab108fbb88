use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("config file is missing the {field} line")]
    MissingField { field: &'static str },
}

/// Paths driving one grading run, read from a three-line config file:
/// submissions root, fixed input file, fixed reference output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraderConfig {
    pub submissions_dir: PathBuf,
    pub input_file: PathBuf,
    pub reference_output: PathBuf,
}

impl GraderConfig {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = tokio::fs::read_to_string(path).await?;
        Self::parse(&raw)
    }

    fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut lines = raw.lines().map(str::trim);
        let mut field = |name| {
            lines
                .next()
                .filter(|line| !line.is_empty())
                .map(PathBuf::from)
                .ok_or(ConfigError::MissingField { field: name })
        };

        Ok(Self {
            submissions_dir: field("submissions directory")?,
            input_file: field("input file")?,
            reference_output: field("reference output file")?,
        })
    }
}
