//! Test discovery: walks a directory and yields one base path per family.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::artifacts::RECOGNIZED_EXTENSIONS;
use crate::errors::HarnessError;

/// Walks `root` and returns the deduplicated test base paths.
///
/// Entries of a directory are handled before any of its subdirectories are
/// descended into, and recursive results are appended after the directory's
/// own, so the report reads top-down through the tree. Within one directory,
/// entries are visited in file-name order.
pub fn discover(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, HarnessError> {
    if !root.is_dir() {
        return Err(HarnessError::InvalidDirectory {
            path: root.to_path_buf(),
        });
    }
    let mut bases = Vec::new();
    let mut seen = HashSet::new();
    walk_level(root, recursive, &mut bases, &mut seen)?;
    Ok(bases)
}

/// One directory level: a single listing, then recursion into the collected
/// subdirectories.
fn walk_level(
    dir: &Path,
    recursive: bool,
    bases: &mut Vec<PathBuf>,
    seen: &mut HashSet<PathBuf>,
) -> Result<(), HarnessError> {
    let mut subdirs = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| walk_error(dir, err))?;
        if entry.file_type().is_dir() {
            if recursive {
                subdirs.push(entry.into_path());
            }
            continue;
        }
        let path = entry.path();
        if !has_recognized_extension(path) {
            continue;
        }
        let base = base_path(path).map_err(|err| HarnessError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
        if seen.insert(base.clone()) {
            bases.push(base);
        }
    }
    for subdir in subdirs {
        walk_level(&subdir, recursive, bases, seen)?;
    }
    Ok(())
}

fn has_recognized_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RECOGNIZED_EXTENSIONS.contains(ext))
}

/// Canonical absolute path minus the final extension. Canonicalization keeps
/// one logical test reached through different spellings (relative segments,
/// symlinks) from showing up as several entries.
fn base_path(path: &Path) -> io::Result<PathBuf> {
    let canonical = path.canonicalize()?;
    let stem = canonical.file_stem().unwrap_or_default().to_os_string();
    Ok(match canonical.parent() {
        Some(parent) => parent.join(stem),
        None => PathBuf::from(stem),
    })
}

fn walk_error(dir: &Path, err: walkdir::Error) -> HarnessError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "directory walk failed"));
    HarnessError::Io { path, source }
}
