//! Storage listing entries.
//!
//! Classification happens here, once, when a listing row first enters the
//! crate: a name ending in `/` is a prefix, anything else is an object.
//! Everything downstream dispatches on the variant and never re-inspects
//! the name.

use chrono::{DateTime, Utc};

/// Directory-like grouping entry. The trailing `/` stays part of the name.
#[derive(Clone, Debug, PartialEq)]
pub struct PrefixEntry {
    pub name: String,
}

/// Leaf entry, carrying whatever metadata the listing provided.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectEntry {
    pub name: String,
    pub size: Option<i64>,
    pub last_modified: Option<DateTime<Utc>>,
}

/// A single row of a storage listing.
#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    Prefix(PrefixEntry),
    Object(ObjectEntry),
}

impl Entry {
    /// Classifies a listed name by its trailing character.
    pub fn from_listed_name<S: Into<String>>(name: S) -> Entry {
        Entry::from_listing(name, None, None)
    }

    /// Classifies a listing row. Metadata only sticks to object rows;
    /// a prefix-shaped name drops it.
    pub fn from_listing<S: Into<String>>(
        name: S,
        size: Option<i64>,
        last_modified: Option<DateTime<Utc>>,
    ) -> Entry {
        let name = name.into();
        if name.ends_with('/') {
            Entry::Prefix(PrefixEntry { name })
        } else {
            Entry::Object(ObjectEntry {
                name,
                size,
                last_modified,
            })
        }
    }

    /// The entry's identity within a listing.
    pub fn name(&self) -> &str {
        match self {
            Entry::Prefix(prefix) => &prefix.name,
            Entry::Object(object) => &object.name,
        }
    }

    pub fn is_prefix(&self) -> bool {
        matches!(self, Entry::Prefix(_))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::Entry;

    #[test]
    fn trailing_slash_classifies_as_prefix() {
        assert!(Entry::from_listed_name("docs/").is_prefix());
        assert!(!Entry::from_listed_name("readme.txt").is_prefix());
        assert!(!Entry::from_listed_name("docs/readme.txt").is_prefix());
    }

    #[test]
    fn empty_name_classifies_as_object() {
        assert!(!Entry::from_listed_name("").is_prefix());
    }

    #[test]
    fn name_is_preserved_verbatim() {
        assert_eq!(Entry::from_listed_name("docs/").name(), "docs/");
        assert_eq!(Entry::from_listed_name("a b.txt").name(), "a b.txt");
    }

    #[test]
    fn metadata_sticks_to_objects_only() {
        let modified = Utc.ymd(2021, 6, 1).and_hms(12, 0, 0);
        match Entry::from_listing("photo.jpg", Some(512), Some(modified)) {
            Entry::Object(object) => {
                assert_eq!(object.size, Some(512));
                assert_eq!(object.last_modified, Some(modified));
            }
            Entry::Prefix(_) => panic!("object row classified as prefix"),
        }
        match Entry::from_listing("album/", Some(0), None) {
            Entry::Prefix(prefix) => assert_eq!(prefix.name, "album/"),
            Entry::Object(_) => panic!("prefix row classified as object"),
        }
    }
}
