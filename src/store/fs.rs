use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::app::{Result, Rss2EmailError};
use crate::store::SeenStore;

/// One file per identifier under a flat directory.
///
/// The file body holds the entry link for humans; only existence is read.
pub struct FsSeenStore {
    root: PathBuf,
}

impl FsSeenStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn marker_path(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }
}

impl SeenStore for FsSeenStore {
    fn lookup(&self, id: &str) -> Result<bool> {
        let path = self.marker_path(id);
        match fs::metadata(&path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Rss2EmailError::Storage { path, source: e }),
        }
    }

    fn record_seen(&self, id: &str, payload: &str) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| Rss2EmailError::Storage {
            path: self.root.clone(),
            source: e,
        })?;

        let path = self.marker_path(id);
        fs::write(&path, payload).map_err(|e| Rss2EmailError::Storage { path, source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identifier_for;

    #[test]
    fn test_unknown_id_not_seen() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSeenStore::new(dir.path().join("seen"));

        assert!(!store.lookup(&identifier_for("entry-1")).unwrap());
        assert!(!store.has_seen(&identifier_for("entry-1")));
    }

    #[test]
    fn test_record_creates_root_and_marker() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("state").join("seen");
        let store = FsSeenStore::new(&root);
        let id = identifier_for("entry-1");

        store.record_seen(&id, "https://example.com/1").unwrap();

        assert!(root.is_dir());
        assert!(store.has_seen(&id));
        assert_eq!(
            fs::read_to_string(root.join(&id)).unwrap(),
            "https://example.com/1"
        );
    }

    #[test]
    fn test_marker_survives_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let id = identifier_for("entry-1");

        FsSeenStore::new(dir.path())
            .record_seen(&id, "https://example.com/1")
            .unwrap();

        let reopened = FsSeenStore::new(dir.path());
        assert!(reopened.has_seen(&id));
        assert!(!reopened.has_seen(&identifier_for("entry-2")));
    }

    #[test]
    fn test_record_twice_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSeenStore::new(dir.path());
        let id = identifier_for("entry-1");

        store.record_seen(&id, "first").unwrap();
        store.record_seen(&id, "second").unwrap();

        assert!(store.has_seen(&id));
        assert_eq!(fs::read_to_string(dir.path().join(&id)).unwrap(), "second");
    }

    #[test]
    fn test_empty_payload_still_marks_seen() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSeenStore::new(dir.path());
        let id = identifier_for("no-link");

        store.record_seen(&id, "").unwrap();
        assert!(store.has_seen(&id));
    }

    #[test]
    fn test_storage_failure_is_fail_open() {
        let dir = tempfile::tempdir().unwrap();
        // Root is a regular file, so every marker path lies beneath a non-directory
        let root = dir.path().join("seen");
        fs::write(&root, "not a directory").unwrap();
        let store = FsSeenStore::new(&root);
        let id = identifier_for("entry-1");

        assert!(!store.has_seen(&id));

        let err = store.record_seen(&id, "https://example.com/1").unwrap_err();
        assert!(matches!(err, Rss2EmailError::Storage { .. }));
    }
}
