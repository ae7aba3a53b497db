//! Test artifact model and on-demand materialization.
//!
//! A test family is the set of sibling files `<base>.src`, `<base>.in`,
//! `<base>.out`, `<base>.rc`. Any subset may be missing on disk; the
//! materializer synthesizes the rest with typed defaults, so every test is
//! logically complete by the time it runs.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;

/// Extensions that mark a file as part of a test family.
pub static RECOGNIZED_EXTENSIONS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| Artifact::ALL.iter().map(|artifact| artifact.extension()).collect());

/// One of the four sibling files that make up a test family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    /// `.src`: program under test, fed to the first pipeline stage.
    Source,
    /// `.in`: input consumed by the interpretation stage.
    Input,
    /// `.out`: exact expected combined stdout.
    ExpectedOutput,
    /// `.rc`: expected exit code of the terminal stage.
    ExitCode,
}

impl Artifact {
    pub const ALL: [Artifact; 4] = [
        Artifact::Source,
        Artifact::Input,
        Artifact::ExpectedOutput,
        Artifact::ExitCode,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            Artifact::Source => "src",
            Artifact::Input => "in",
            Artifact::ExpectedOutput => "out",
            Artifact::ExitCode => "rc",
        }
    }

    /// Contents written when the file has to be synthesized.
    pub fn default_contents(self) -> &'static [u8] {
        match self {
            Artifact::ExitCode => b"0",
            _ => b"",
        }
    }

    /// Path of this artifact for a given test base path.
    ///
    /// `Path::with_extension` would clobber dots inside the file name, so
    /// the extension is appended to the raw path instead.
    pub fn path_for(self, base: &Path) -> PathBuf {
        let mut raw = base.as_os_str().to_os_string();
        raw.push(".");
        raw.push(self.extension());
        PathBuf::from(raw)
    }
}

/// Synthesizes missing test artifacts and reads their contents.
///
/// Test families are self-seeding scaffolds: running the harness against a
/// bare `.src` file leaves a complete family behind. A detached materializer
/// yields the same defaults without touching disk, for read-only uses.
#[derive(Debug, Clone, Copy)]
pub struct Materializer {
    persist: bool,
}

impl Materializer {
    /// Materializer that writes synthesized defaults to disk.
    pub fn new() -> Self {
        Self { persist: true }
    }

    /// Materializer that only synthesizes defaults in memory.
    pub fn detached() -> Self {
        Self { persist: false }
    }

    /// Creates the artifact file if absent and returns its path.
    ///
    /// Existing files are never truncated, so a second call cannot alter
    /// content written by the first.
    pub fn ensure(&self, base: &Path, artifact: Artifact) -> io::Result<PathBuf> {
        let path = artifact.path_for(base);
        if !self.persist {
            return Ok(path);
        }
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => file.write_all(artifact.default_contents())?,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
            Err(err) => return Err(err),
        }
        Ok(path)
    }

    /// Full contents of the artifact, synthesizing the default if missing.
    /// The file handle lives only for the duration of the call.
    pub fn read(&self, base: &Path, artifact: Artifact) -> io::Result<Vec<u8>> {
        let path = self.ensure(base, artifact)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound && !self.persist => {
                Ok(artifact.default_contents().to_vec())
            }
            Err(err) => Err(err),
        }
    }

    /// Expected exit code for the test: the `.rc` contents parsed as an
    /// integer, `0` when the file is absent, empty, or not a number.
    pub fn expected_exit_code(&self, base: &Path) -> io::Result<i32> {
        let bytes = self.read(base, Artifact::ExitCode)?;
        Ok(String::from_utf8_lossy(&bytes).trim().parse().unwrap_or(0))
    }
}

impl Default for Materializer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_for_appends_instead_of_replacing() {
        let base = Path::new("/suite/case.v2");
        assert_eq!(
            Artifact::Source.path_for(base),
            PathBuf::from("/suite/case.v2.src")
        );
    }

    #[test]
    fn recognized_extensions_cover_the_family() {
        for ext in ["src", "in", "out", "rc"] {
            assert!(RECOGNIZED_EXTENSIONS.contains(ext));
        }
        assert!(!RECOGNIZED_EXTENSIONS.contains("txt"));
    }
}
