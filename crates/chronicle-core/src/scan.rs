use std::path::{Path, PathBuf};

use log::info;
use walkdir::WalkDir;

use crate::classify;

/// Recursively collect every supported media file under `source`. Entries are
/// visited in sorted order so that later collision suffixes are reproducible
/// run-to-run.
pub fn scan_source(source: &Path) -> Vec<PathBuf> {
    let files: Vec<PathBuf> = WalkDir::new(source)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| classify::is_supported(path))
        .collect();
    info!(
        "Discovered {} media files under {}",
        files.len(),
        source.display()
    );
    files
}
