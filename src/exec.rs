//! Pipeline construction and execution for one test.
//!
//! Execution is a blocking call with no timeout; a hung external program
//! blocks the harness. The exit code reported is always that of the
//! pipeline's terminal stage.

use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};

use crate::artifacts::{Artifact, Materializer};

/// Which stages of the parse → interpret chain a run exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HarnessMode {
    /// Parser output is piped into the interpreter.
    #[default]
    Full,
    /// First stage only.
    ParseOnly,
    /// Second stage only; the interpreter gets the source file directly.
    IntOnly,
}

/// Outcome of one pipeline run. Ephemeral; only the comparator sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub output: Vec<u8>,
}

/// Exit code reported when a stage cannot be launched at all.
const LAUNCH_FAILURE: i32 = -1;

/// Runs external command pipelines against test families.
#[derive(Debug)]
pub struct Pipeline {
    parser_cmd: PathBuf,
    interpreter_cmd: PathBuf,
    materializer: Materializer,
}

impl Pipeline {
    pub fn new(parser_cmd: PathBuf, interpreter_cmd: PathBuf, materializer: Materializer) -> Self {
        Self {
            parser_cmd,
            interpreter_cmd,
            materializer,
        }
    }

    /// Executes the pipeline for `base` in the given mode.
    ///
    /// A stage that cannot be launched yields exit code `-1` and empty
    /// output; downstream comparison turns that into an ordinary mismatch
    /// rather than a harness error.
    pub fn run(&self, base: &Path, mode: HarnessMode) -> ExecutionResult {
        match self.spawn(base, mode) {
            Ok(output) => ExecutionResult {
                exit_code: output.status.code().unwrap_or(LAUNCH_FAILURE),
                output: collapse_lines(&output.stdout),
            },
            Err(_) => ExecutionResult {
                exit_code: LAUNCH_FAILURE,
                output: Vec::new(),
            },
        }
    }

    fn spawn(&self, base: &Path, mode: HarnessMode) -> io::Result<Output> {
        // The external programs always receive valid file arguments, even
        // for a family that exists only as a bare `.src` or less.
        let source = self.materializer.ensure(base, Artifact::Source)?;
        let input = self.materializer.ensure(base, Artifact::Input)?;
        match mode {
            HarnessMode::ParseOnly => self.spawn_parser(&source)?.wait_with_output(),
            HarnessMode::IntOnly => Command::new(&self.interpreter_cmd)
                .arg(named_arg("--source", &source))
                .arg(named_arg("--input", &input))
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .spawn()?
                .wait_with_output(),
            HarnessMode::Full => self.spawn_chain(&source, &input),
        }
    }

    /// Two-stage chain: parser stdout becomes interpreter stdin.
    fn spawn_chain(&self, source: &Path, input: &Path) -> io::Result<Output> {
        let mut first = self.spawn_parser(source)?;
        let carried = match first.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let _ = first.kill();
                let _ = first.wait();
                return Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "parser stdout was not captured",
                ));
            }
        };
        let second = Command::new(&self.interpreter_cmd)
            .arg(named_arg("--input", input))
            .stdin(Stdio::from(carried))
            .stdout(Stdio::piped())
            .spawn();
        let second = match second {
            Ok(child) => child,
            Err(err) => {
                let _ = first.kill();
                let _ = first.wait();
                return Err(err);
            }
        };
        let output = second.wait_with_output()?;
        // Reap the first stage; its status is not part of the contract.
        let _ = first.wait();
        Ok(output)
    }

    fn spawn_parser(&self, source: &Path) -> io::Result<Child> {
        Command::new(&self.parser_cmd)
            .stdin(Stdio::from(File::open(source)?))
            .stdout(Stdio::piped())
            .spawn()
    }
}

/// `--flag=value` arguments in the style the interpreter expects.
fn named_arg(flag: &str, value: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push("=");
    arg.push(value);
    arg
}

/// Concatenates captured output lines, dropping the separators between them.
fn collapse_lines(raw: &[u8]) -> Vec<u8> {
    let mut collapsed = Vec::with_capacity(raw.len());
    for line in raw.split(|&byte| byte == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        collapsed.extend_from_slice(line);
    }
    collapsed
}
