//! Walks input roots and collects the documents the pipeline can read.

use crate::extractor::is_supported;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Supported files under `roots`, sorted. Unreadable entries are skipped.
pub fn scan(
    roots: &[PathBuf],
    excludes: &[String],
    include_hidden: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    let exclude_set = build_globset(excludes)?;
    let mut files = Vec::new();

    for root in roots {
        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| should_descend(e.path(), root, include_hidden, &exclude_set))
        {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    debug!(%err, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file() && is_supported(path) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat)?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

fn should_descend(path: &Path, root: &Path, include_hidden: bool, excludes: &GlobSet) -> bool {
    if excludes.is_match(path) {
        return false;
    }
    // The root itself is always walked, even when it is a dot-directory.
    if !include_hidden && path != root && is_hidden(path) {
        return false;
    }
    true
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}
