//! Offline bucket listing parsed from a saved `ListBucketResult` document.
//!
//! The manifest carries the flat key listing a bucket walk produces. The
//! immediate children of a prefix are derived from it on every call: keys
//! directly under the prefix become objects, deeper keys collapse into one
//! prefix entry apiece, surfaced at their first occurrence.

use std::{collections::HashSet, fs, path::Path};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{EntrySource, SourceError};
use crate::entries::Entry;

#[derive(Debug, Deserialize)]
struct ListBucketResult {
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "Contents", default)]
    contents: Vec<Contents>,
}

#[derive(Debug, Deserialize)]
struct Contents {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Size", default)]
    size: Option<i64>,
    #[serde(rename = "LastModified", default)]
    last_modified: Option<String>,
}

#[derive(Debug)]
struct ManifestRow {
    key: String,
    size: Option<i64>,
    last_modified: Option<DateTime<Utc>>,
}

/// Listing source backed by a single `ListBucketResult` XML document.
#[derive(Debug)]
pub struct ManifestSource {
    bucket: String,
    rows: Vec<ManifestRow>,
}

impl ManifestSource {
    pub fn from_xml(xml: &str) -> Result<ManifestSource, SourceError> {
        let parsed: ListBucketResult = quick_xml::de::from_str(xml)
            .map_err(|err| SourceError::new("MalformedManifest", err.to_string()))?;
        let rows = parsed
            .contents
            .into_iter()
            .map(|row| {
                let last_modified = match row.last_modified.as_deref() {
                    None => None,
                    Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
                        Err(err) => {
                            warn!(
                                key = %row.key,
                                error = %err,
                                "skipping unparseable LastModified in manifest"
                            );
                            None
                        }
                    },
                };
                ManifestRow {
                    key: row.key,
                    size: row.size,
                    last_modified,
                }
            })
            .collect();
        Ok(ManifestSource {
            bucket: parsed.name,
            rows,
        })
    }

    pub fn from_file(path: &Path) -> Result<ManifestSource, SourceError> {
        let xml = fs::read_to_string(path).map_err(|err| {
            SourceError::new(
                "ManifestRead",
                format!("(File: {}) {}", path.display(), err),
            )
        })?;
        ManifestSource::from_xml(&xml)
    }

    /// Derives the immediate children of `prefix` from the flat key list.
    /// Names are relative to the prefix, as a delimited bucket listing
    /// would return them.
    fn children_of(&self, prefix: &str) -> Vec<Entry> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for row in &self.rows {
            let rest = match row.key.strip_prefix(prefix) {
                Some(rest) if !rest.is_empty() => rest,
                _ => continue,
            };
            match rest.find('/') {
                // Key lives in a deeper prefix: surface that prefix once.
                Some(i) if i + 1 < rest.len() => {
                    let sub = &rest[..=i];
                    if seen.insert(sub.to_owned()) {
                        entries.push(Entry::from_listed_name(sub));
                    }
                }
                // Immediate child. A name like "marker/" is still
                // prefix-shaped and classifies accordingly.
                _ => {
                    if seen.insert(rest.to_owned()) {
                        entries.push(Entry::from_listing(rest, row.size, row.last_modified));
                    }
                }
            }
        }
        entries
    }
}

#[async_trait]
impl EntrySource for ManifestSource {
    async fn list(&self, prefix: &str) -> Result<Vec<Entry>, SourceError> {
        let entries = self.children_of(prefix);
        debug!(prefix, count = entries.len(), "derived listing from manifest");
        Ok(entries)
    }

    fn resource_name(&self) -> &str {
        &self.bucket
    }

    fn provider_name(&self) -> &str {
        "s3"
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::ManifestSource;
    use crate::{entries::Entry, providers::EntrySource};

    const MANIFEST: &str = r#"
        <ListBucketResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
            <Name>releases</Name>
            <Contents>
                <Key>readme.txt</Key>
                <Size>5</Size>
                <LastModified>2021-06-01T12:00:00Z</LastModified>
                <StorageClass>STANDARD</StorageClass>
            </Contents>
            <Contents>
                <Key>docs/guide.md</Key>
                <Size>1024</Size>
                <LastModified>2021-06-02T08:30:00Z</LastModified>
            </Contents>
            <Contents>
                <Key>docs/img/logo.png</Key>
                <Size>2048</Size>
                <LastModified>not-a-timestamp</LastModified>
            </Contents>
            <Contents>
                <Key>bin/</Key>
                <Size>0</Size>
            </Contents>
        </ListBucketResult>
    "#;

    #[tokio::test]
    async fn derives_top_level_children_in_document_order() {
        let source = ManifestSource::from_xml(MANIFEST).unwrap();
        let entries = source.list("").await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["readme.txt", "docs/", "bin/"]);
        assert!(!entries[0].is_prefix());
        assert!(entries[1].is_prefix());
        assert!(entries[2].is_prefix());
    }

    #[tokio::test]
    async fn descends_one_level_at_a_time() {
        let source = ManifestSource::from_xml(MANIFEST).unwrap();
        let entries = source.list("docs/").await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["guide.md", "img/"]);
    }

    #[tokio::test]
    async fn objects_keep_their_listing_metadata() {
        let source = ManifestSource::from_xml(MANIFEST).unwrap();
        let entries = source.list("").await.unwrap();
        match &entries[0] {
            Entry::Object(object) => {
                assert_eq!(object.size, Some(5));
                assert_eq!(
                    object.last_modified,
                    Some(Utc.ymd(2021, 6, 1).and_hms(12, 0, 0))
                );
            }
            Entry::Prefix(_) => panic!("object row classified as prefix"),
        }
    }

    #[tokio::test]
    async fn malformed_timestamps_degrade_to_none() {
        let source = ManifestSource::from_xml(MANIFEST).unwrap();
        let entries = source.list("docs/img/").await.unwrap();
        match &entries[0] {
            Entry::Object(object) => {
                assert_eq!(object.name, "logo.png");
                assert_eq!(object.last_modified, None);
            }
            Entry::Prefix(_) => panic!("object row classified as prefix"),
        }
    }

    #[test]
    fn bucket_name_comes_from_the_document() {
        let source = ManifestSource::from_xml(MANIFEST).unwrap();
        assert_eq!(source.resource_name(), "releases");
        assert_eq!(source.provider_name(), "s3");
    }

    #[test]
    fn broken_documents_are_rejected() {
        let err = ManifestSource::from_xml("<ListBucketResult><Contents>").unwrap_err();
        assert_eq!(err.code(), "MalformedManifest");
    }
}
