// Discovery behavior: extension filtering, dedup, recursion, ordering.

use std::fs;
use std::path::{Path, PathBuf};

use proba::{discovery, HarnessError};
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"").unwrap();
}

fn discovered(root: &Path, recursive: bool) -> Vec<PathBuf> {
    discovery::discover(root, recursive).unwrap()
}

fn names(bases: &[PathBuf]) -> Vec<String> {
    bases
        .iter()
        .map(|base| base.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn one_entry_per_family_across_extensions() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "alpha.src");
    touch(dir.path(), "alpha.in");
    touch(dir.path(), "alpha.out");
    touch(dir.path(), "alpha.rc");
    touch(dir.path(), "beta.src");
    let bases = discovered(dir.path(), false);
    assert_eq!(names(&bases), vec!["alpha", "beta"]);
}

#[test]
fn unrecognized_extensions_are_ignored() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "alpha.src");
    touch(dir.path(), "notes.txt");
    touch(dir.path(), "alpha.src.bak");
    touch(dir.path(), "no_extension");
    let bases = discovered(dir.path(), false);
    assert_eq!(names(&bases), vec!["alpha"]);
}

#[test]
fn non_recursive_skips_subdirectories() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "alpha.src");
    fs::create_dir(dir.path().join("sub")).unwrap();
    touch(&dir.path().join("sub"), "beta.src");
    let bases = discovered(dir.path(), false);
    assert_eq!(names(&bases), vec!["alpha"]);
}

#[test]
fn recursive_discovers_nested_families() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "alpha.src");
    fs::create_dir_all(dir.path().join("sub/deep")).unwrap();
    touch(&dir.path().join("sub"), "beta.src");
    touch(&dir.path().join("sub/deep"), "gamma.src");
    let bases = discovered(dir.path(), true);
    assert_eq!(names(&bases), vec!["alpha", "beta", "gamma"]);
}

#[test]
fn parent_entries_come_before_subdirectory_results() {
    // "sub" sorts before "zeta.src", but a directory's own families must
    // still precede everything discovered beneath it.
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "zeta.src");
    fs::create_dir(dir.path().join("sub")).unwrap();
    touch(&dir.path().join("sub"), "alpha.src");
    let bases = discovered(dir.path(), true);
    assert_eq!(names(&bases), vec!["zeta", "alpha"]);
}

#[test]
fn base_paths_are_canonical_and_absolute() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "alpha.src");
    let bases = discovered(dir.path(), false);
    let expected = dir.path().canonicalize().unwrap().join("alpha");
    assert_eq!(bases, vec![expected]);
    assert!(bases[0].is_absolute());
}

#[test]
fn missing_root_is_invalid_directory() {
    let err = discovery::discover(Path::new("definitely/not/here"), false).unwrap_err();
    assert!(matches!(err, HarnessError::InvalidDirectory { .. }));
}

#[test]
fn file_root_is_invalid_directory() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "alpha.src");
    let err = discovery::discover(&dir.path().join("alpha.src"), false).unwrap_err();
    assert!(matches!(err, HarnessError::InvalidDirectory { .. }));
}
