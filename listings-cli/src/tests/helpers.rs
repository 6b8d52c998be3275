//! Test helpers for composing record files on disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Temporary directory holding a record file and ratings output.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents).expect("write file");
}

/// Three records: a stale restaurant, a current hotel and a nameless school.
pub(super) const MIXED_RECORDS: &str = r#"[
    {
        "kind": "restaurant",
        "id": "r-1",
        "name": "Trattoria",
        "overall_rating": 4.2,
        "total_reviews_aggregated": 150,
        "price_level": 2,
        "features": [{"name": "WiFi"}]
    },
    {
        "kind": "hotel",
        "id": "h-1",
        "name": "Harbour Inn",
        "google_rating": 4.0,
        "google_review_count": 80,
        "review_sentiment": "Great views",
        "algorithm_version": "2.0"
    },
    {
        "kind": "school",
        "id": "",
        "name": "Nameless School"
    }
]"#;

/// Two valid records that always rate successfully.
pub(super) const VALID_RECORDS: &str = r#"[
    {"kind": "restaurant", "id": "r-1", "name": "Trattoria", "reviews": ["Delicious food"]},
    {"kind": "mall", "id": "m-1", "name": "Central Mall"}
]"#;

/// Two valid records around one whose price level is not a number.
pub(super) const PARTLY_MALFORMED_RECORDS: &str = r#"[
    {"kind": "restaurant", "id": "r-1", "name": "Trattoria"},
    {"kind": "restaurant", "id": "r-2", "name": "Cheap Eats", "price_level": "cheap"},
    {"kind": "mall", "id": "m-1", "name": "Central Mall"}
]"#;

/// Parse JSON lines into values.
pub(super) fn json_lines(text: &str) -> Vec<serde_json::Value> {
    text.lines()
        .map(|line| serde_json::from_str(line).expect("line is JSON"))
        .collect()
}
