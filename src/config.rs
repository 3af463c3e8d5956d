//! Knobs for a single extraction call.

use std::fmt;
use std::str::FromStr;

use crate::thumbnail::THUMBNAIL_CANDIDATES;

/// Bounding box for the produced bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxSize {
    pub width: u32,
    pub height: u32,
}

impl MaxSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for MaxSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for MaxSize {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, e.g. `256x256`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
        let parse = |v: &str| match v.trim().parse::<u32>() {
            Ok(0) => Err(format!("dimensions must be non-zero in {s:?}")),
            Ok(n) => Ok(n),
            Err(e) => Err(format!("invalid dimension {v:?}: {e}")),
        };
        Ok(Self::new(parse(w)?, parse(h)?))
    }
}

/// Resource ceilings applied to untrusted archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest declared uncompressed size accepted for the selected entry.
    pub max_entry_size: u64,
    /// Largest archive a source will load into memory.
    pub max_archive_size: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_entry_size: 64 * 1024 * 1024,
            max_archive_size: 256 * 1024 * 1024,
        }
    }
}

/// Everything [`extract_thumbnail`](crate::extract_thumbnail) needs besides
/// the archive bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Entry names to look for, highest priority first.
    pub candidates: Vec<String>,
    pub max_size: Option<MaxSize>,
    pub limits: Limits,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            candidates: THUMBNAIL_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            max_size: None,
            limits: Limits::default(),
        }
    }
}
