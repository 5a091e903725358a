use sha1::{Digest, Sha1};

/// A single entry from a parsed feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub guid: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub content: Option<String>,
}

impl Entry {
    pub fn new(guid: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            ..Default::default()
        }
    }

    /// Stable, filesystem-safe identifier for this entry.
    pub fn identifier(&self) -> String {
        identifier_for(&self.guid)
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(Untitled)")
    }

    pub fn display_link(&self) -> &str {
        self.link.as_deref().unwrap_or("")
    }

    pub fn display_content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// SHA-1 of the GUID as 40 lowercase hex characters.
pub fn identifier_for(guid: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(guid.as_bytes());
    hex::encode(hasher.finalize())
}
