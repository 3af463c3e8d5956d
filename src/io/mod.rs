mod http;
mod local;

pub use http::HttpSource;
pub use local::LocalFileSource;

use anyhow::Result;
use async_trait::async_trait;

/// Somewhere an archive's bytes can be loaded from
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Load the whole archive into memory
    async fn load(&self) -> Result<Vec<u8>>;

    /// Human-readable location, for messages
    fn describe(&self) -> String;
}
