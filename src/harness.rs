//! Harness driver: configuration, one-shot validation, and the sequential
//! run loop.
//!
//! A run is strictly ordered: configuration is validated once, discovery
//! enumerates the full test list, then each test is materialized, executed,
//! and classified to completion before the next begins. Per-test mismatches
//! never interrupt the loop; only the fatal taxonomy in [`crate::errors`]
//! does.

use std::path::{Path, PathBuf};

use crate::artifacts::{Artifact, Materializer};
use crate::discovery;
use crate::errors::HarnessError;
use crate::exec::{HarnessMode, Pipeline};
use crate::report::{classify, Expectation, RunSummary, TestReport};

/// Program run when no parser override is configured.
pub const DEFAULT_PARSER: &str = "parse";
/// Program run when no interpreter override is configured.
pub const DEFAULT_INTERPRETER: &str = "interpret";

/// Resolves the two only-flags into a single mode.
pub fn resolve_mode(parse_only: bool, int_only: bool) -> Result<HarnessMode, HarnessError> {
    match (parse_only, int_only) {
        (true, true) => Err(HarnessError::ConflictingMode {
            detail: "--parse-only and --int-only are mutually exclusive".into(),
        }),
        (true, false) => Ok(HarnessMode::ParseOnly),
        (false, true) => Ok(HarnessMode::IntOnly),
        (false, false) => Ok(HarnessMode::Full),
    }
}

/// Everything a run needs; the CLI builds one from its flags.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub directory: PathBuf,
    pub recursive: bool,
    pub mode: HarnessMode,
    /// Parser override; `None` falls back to [`DEFAULT_PARSER`].
    pub parser_cmd: Option<PathBuf>,
    /// Interpreter override; `None` falls back to [`DEFAULT_INTERPRETER`].
    pub interpreter_cmd: Option<PathBuf>,
}

impl HarnessConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            recursive: false,
            mode: HarnessMode::Full,
            parser_cmd: None,
            interpreter_cmd: None,
        }
    }

    /// Rejects combinations that name a script for a stage the mode never
    /// runs. Called once, before discovery.
    pub fn validate(&self) -> Result<(), HarnessError> {
        match self.mode {
            HarnessMode::ParseOnly if self.interpreter_cmd.is_some() => {
                Err(HarnessError::ConflictingMode {
                    detail: "an interpreter script has no effect under --parse-only".into(),
                })
            }
            HarnessMode::IntOnly if self.parser_cmd.is_some() => {
                Err(HarnessError::ConflictingMode {
                    detail: "a parser script has no effect under --int-only".into(),
                })
            }
            _ => Ok(()),
        }
    }

    fn parser_cmd(&self) -> PathBuf {
        self.parser_cmd
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PARSER))
    }

    fn interpreter_cmd(&self) -> PathBuf {
        self.interpreter_cmd
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INTERPRETER))
    }
}

/// Sequential test runner over one configured suite.
pub struct Harness {
    config: HarnessConfig,
    materializer: Materializer,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            materializer: Materializer::new(),
        }
    }

    /// Runs the whole suite. Fatal errors abort with no partial summary.
    pub fn run(&self) -> Result<RunSummary, HarnessError> {
        self.config.validate()?;
        let bases = discovery::discover(&self.config.directory, self.config.recursive)?;
        let pipeline = Pipeline::new(
            self.config.parser_cmd(),
            self.config.interpreter_cmd(),
            self.materializer,
        );
        let mut summary = RunSummary::new();
        for base in &bases {
            summary.push(self.run_one(&pipeline, base)?);
        }
        Ok(summary)
    }

    fn run_one(&self, pipeline: &Pipeline, base: &Path) -> Result<TestReport, HarnessError> {
        let expected = Expectation {
            output: self.read(base, Artifact::ExpectedOutput)?,
            exit_code: self
                .materializer
                .expected_exit_code(base)
                .map_err(|err| io_error(base, Artifact::ExitCode, err))?,
        };
        let actual = pipeline.run(base, self.config.mode);
        Ok(classify(base.display().to_string(), &actual, &expected))
    }

    fn read(&self, base: &Path, artifact: Artifact) -> Result<Vec<u8>, HarnessError> {
        self.materializer
            .read(base, artifact)
            .map_err(|err| io_error(base, artifact, err))
    }
}

fn io_error(base: &Path, artifact: Artifact, source: std::io::Error) -> HarnessError {
    HarnessError::Io {
        path: artifact.path_for(base),
        source,
    }
}
