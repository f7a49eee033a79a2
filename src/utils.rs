//! Prefix arithmetic and display helpers shared by the sources and the
//! view layer.
//!
//! A prefix is either empty (the listing root) or ends with `/`, so
//! descending is plain concatenation and climbing drops the last segment.

/// Appends a prefix-shaped directory name (e.g. `"docs/"`) to a prefix.
pub fn join_prefix(prefix: &str, dir_name: &str) -> String {
    let mut joined = String::with_capacity(prefix.len() + dir_name.len());
    joined.push_str(prefix);
    joined.push_str(dir_name);
    joined
}

/// Drops the last segment of a prefix: `"docs/img/"` becomes `"docs/"`,
/// `"docs/"` becomes the root.
pub fn parent_prefix(prefix: &str) -> String {
    let trimmed = prefix.strip_suffix('/').unwrap_or(prefix);
    match trimmed.rfind('/') {
        Some(i) => trimmed[..=i].to_owned(),
        None => String::new(),
    }
}

pub fn format_size(bytes: i64) -> String {
    const KB: i64 = 1024;
    const MB: i64 = KB * 1024;
    const GB: i64 = MB * 1024;
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::{format_size, join_prefix, parent_prefix};

    #[test]
    fn joins_from_the_root() {
        assert_eq!(join_prefix("", "docs/"), "docs/");
        assert_eq!(join_prefix("docs/", "img/"), "docs/img/");
    }

    #[test]
    fn parent_drops_one_segment() {
        assert_eq!(parent_prefix("docs/img/"), "docs/");
        assert_eq!(parent_prefix("docs/"), "");
        assert_eq!(parent_prefix(""), "");
    }

    #[test]
    fn join_and_parent_round_trip() {
        let prefix = join_prefix("a/b/", "c/");
        assert_eq!(parent_prefix(&prefix), "a/b/");
    }

    #[test]
    fn sizes_pick_a_unit() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }
}
