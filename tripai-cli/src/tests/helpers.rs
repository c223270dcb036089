//! Test helpers for writing CLI inputs to temporary directories.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Images used by import and search tests, as the JSON an operator would
/// hand to `tripai import`.
pub(super) const IMAGES_JSON: &str = r#"[
    {"id": 1, "url": "https://img.example/jeju.jpg", "place": "Jeju",
     "labels": ["Beach"], "colors": [{"r": 250, "g": 10, "b": 10}]},
    {"id": 2, "url": "https://img.example/busan.jpg", "place": "Busan",
     "labels": ["beach", "sunset"], "colors": [{"r": 0, "g": 0, "b": 255}]},
    {"id": 3, "url": "https://img.example/sokcho.jpg", "place": "Sokcho",
     "labels": ["beach", "sunset"], "colors": [{"r": 255, "g": 0, "b": 0}]}
]"#;

/// Temporary directory exposed as a UTF-8 path.
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
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn search_request_json(labels: &[&str], color: &str) -> String {
    serde_json::json!({ "labelList": labels, "color": color }).to_string()
}
