//! Local directory source.
//!
//! Directory names get their trailing `/` appended here, which is what
//! makes classification downstream come out right.

use std::{fs, io, path::PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{EntrySource, SourceError};
use crate::entries::Entry;

/// Lists the contents of a directory tree rooted at a fixed path, with
/// listing prefixes resolved relative to that root.
pub struct FilesystemSource {
    user: String,
    root: PathBuf,
}

impl FilesystemSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> FilesystemSource {
        FilesystemSource {
            user: whoami::username(),
            root: root.into(),
        }
    }

    fn handle_error(err: io::Error) -> SourceError {
        let message = match err.kind() {
            io::ErrorKind::NotFound => "Directory couldn't be found",
            io::ErrorKind::PermissionDenied => {
                "Insufficient permissions to read this directory"
            }
            io::ErrorKind::InvalidData => "Directory contains invalid data",
            io::ErrorKind::Unsupported => "This operation is not supported",
            _ => "Unexpected error occurred while listing",
        };
        SourceError::new(format!("{:?}", err.kind()), message)
    }

    fn read_entries(&self, prefix: &str) -> Result<Vec<Entry>, io::Error> {
        let dir = self.root.join(prefix);
        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(&dir)? {
            let dir_entry = dir_entry?;
            let metadata = dir_entry.metadata()?;
            let mut name = dir_entry.file_name().to_string_lossy().into_owned();
            if metadata.is_dir() {
                name.push('/');
                entries.push(Entry::from_listed_name(name));
            } else {
                let last_modified = metadata.modified().ok().map(DateTime::<Utc>::from);
                entries.push(Entry::from_listing(
                    name,
                    Some(metadata.len() as i64),
                    last_modified,
                ));
            }
        }
        // read_dir order is platform-dependent
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(entries)
    }
}

#[async_trait]
impl EntrySource for FilesystemSource {
    async fn list(&self, prefix: &str) -> Result<Vec<Entry>, SourceError> {
        let entries = self.read_entries(prefix).map_err(Self::handle_error)?;
        debug!(prefix, count = entries.len(), "listed directory");
        Ok(entries)
    }

    fn resource_name(&self) -> &str {
        &self.user
    }

    fn provider_name(&self) -> &str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::FilesystemSource;
    use crate::{entries::Entry, providers::EntrySource};

    fn fixture() -> TempDir {
        let dir = tempfile::tempdir().expect("Couldn't create temporary directory");
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs").join("guide.md"), b"# guide").unwrap();
        fs::write(dir.path().join("readme.txt"), b"hello").unwrap();
        dir
    }

    #[tokio::test]
    async fn lists_directories_as_prefixes_and_files_as_objects() {
        let dir = fixture();
        let source = FilesystemSource::new(dir.path());

        let entries = source.list("").await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["docs/", "readme.txt"]);
        assert!(entries[0].is_prefix());
        assert!(!entries[1].is_prefix());
    }

    #[tokio::test]
    async fn objects_carry_their_size() {
        let dir = fixture();
        let source = FilesystemSource::new(dir.path());

        let entries = source.list("").await.unwrap();
        match &entries[1] {
            Entry::Object(object) => {
                assert_eq!(object.size, Some(5));
                assert!(object.last_modified.is_some());
            }
            Entry::Prefix(_) => panic!("file listed as prefix"),
        }
    }

    #[tokio::test]
    async fn descends_into_prefixes() {
        let dir = fixture();
        let source = FilesystemSource::new(dir.path());

        let entries = source.list("docs/").await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["guide.md"]);
    }

    #[tokio::test]
    async fn missing_directory_reports_not_found() {
        let dir = fixture();
        let source = FilesystemSource::new(dir.path());

        let err = source.list("nope/").await.unwrap_err();
        assert_eq!(err.code(), "NotFound");
    }
}
