//! Per-test classification and run-wide aggregation.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::exec::ExecutionResult;

/// Comparison verdict for one aspect of a test: `OK`, or a message naming
/// both the expected and the actual value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ok,
    Mismatch(String),
}

impl Status {
    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => f.write_str("OK"),
            Status::Mismatch(message) => f.write_str(message),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Expected values a test family declares via its `.out` and `.rc` files.
#[derive(Debug, Clone)]
pub struct Expectation {
    pub output: Vec<u8>,
    pub exit_code: i32,
}

/// Verdict for one test; lives in discovery order inside a [`RunSummary`].
#[derive(Debug, Clone, Serialize)]
pub struct TestReport {
    pub test_id: String,
    pub exit_code_status: Status,
    pub output_status: Status,
}

/// Compares one execution against the family's expectations.
///
/// Output comparison is exact byte equality; no trimming or normalization
/// happens here.
pub fn classify(
    test_id: impl Into<String>,
    actual: &ExecutionResult,
    expected: &Expectation,
) -> TestReport {
    let exit_code_status = if actual.exit_code == expected.exit_code {
        Status::Ok
    } else {
        Status::Mismatch(format!(
            "Should be {} but got {}",
            expected.exit_code, actual.exit_code
        ))
    };
    let output_status = if actual.output == expected.output {
        Status::Ok
    } else {
        Status::Mismatch(format!(
            "Should be '{}' but got '{}'",
            String::from_utf8_lossy(&expected.output),
            String::from_utf8_lossy(&actual.output),
        ))
    };
    TestReport {
        test_id: test_id.into(),
        exit_code_status,
        output_status,
    }
}

/// Ordered result list plus the running pass counter.
///
/// A test counts as passed when its output matched; an exit-code mismatch on
/// its own shows up in the report but does not move the counter.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub passed: usize,
    pub reports: Vec<TestReport>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a report, updating the pass counter.
    pub fn push(&mut self, report: TestReport) {
        if report.output_status.is_ok() {
            self.passed += 1;
        }
        self.reports.push(report);
    }

    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// Tests whose output or exit code diverged.
    pub fn failures(&self) -> impl Iterator<Item = &TestReport> {
        self.reports
            .iter()
            .filter(|report| !report.output_status.is_ok() || !report.exit_code_status.is_ok())
    }
}
