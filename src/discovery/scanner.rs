//! File system lookups inside an extracted package directory.
//!
//! Extractors disagree on letter case and sometimes on folder layout, so
//! every lookup tries the expected path first and then walks the tree for a
//! file with the same name, ignoring case.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Suffix of extracted material descriptor files.
pub const PROPS_SUFFIX: &str = ".props.txt";

/// Find `expected`, falling back to a case-insensitive search for its file
/// name anywhere under `root`.
pub fn locate(root: &Path, expected: &Path) -> Option<PathBuf> {
    if expected.is_file() {
        return Some(expected.to_path_buf());
    }
    let name = expected.file_name()?.to_str()?;
    find_file(root, name)
}

/// Recursively search `root` for a file named `name`, ignoring ASCII case.
///
/// Results are visited in sorted order so the first match is stable.
pub fn find_file(root: &Path, name: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .find(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
        .map(|e| e.into_path())
}

/// All props files under `root`, sorted.
pub fn scan_props_files(root: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_props_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    found.sort();
    found
}

/// Whether a path names a props file.
pub fn is_props_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.to_ascii_lowercase().ends_with(PROPS_SUFFIX))
}
