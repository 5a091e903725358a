use std::fs;
use std::path::Path;

use crate::app::{Result, Rss2EmailError};

/// Ordered list of feed URLs, one per line.
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
/// Duplicates are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedList {
    urls: Vec<String>,
}

impl FeedList {
    pub fn parse(content: &str) -> Self {
        let urls = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect();

        Self { urls }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Rss2EmailError::FeedList {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::parse(&content))
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
