use super::ArchiveSource;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Archive stored on the local filesystem
pub struct LocalFileSource {
    path: PathBuf,
    max_size: u64,
}

impl LocalFileSource {
    pub fn new(path: impl AsRef<Path>, max_size: u64) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_size,
        }
    }
}

#[async_trait]
impl ArchiveSource for LocalFileSource {
    async fn load(&self) -> Result<Vec<u8>> {
        let size = tokio::fs::metadata(&self.path)
            .await
            .with_context(|| format!("cannot stat {}", self.path.display()))?
            .len();
        if size > self.max_size {
            bail!(
                "{} is {} bytes, larger than the {} byte limit",
                self.path.display(),
                size,
                self.max_size
            );
        }

        tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("cannot read {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
