//! Colorized console rendering of a finished run.

use std::io::{self, Write};

use difference::{Changeset, Difference};
use termcolor::{Color, ColorSpec, WriteColor};

use crate::report::{RunSummary, Status, TestReport};

/// Prints per-test verdicts, mismatch details with diffs, and the summary.
///
/// The failed-test recap goes to stderr so it survives report redirection.
pub fn render_console(summary: &RunSummary, writer: &mut dyn WriteColor) -> io::Result<()> {
    for report in &summary.reports {
        print_report(writer, report)?;
    }
    writeln!(writer)?;
    writeln!(writer, "Passed {} of {} tests", summary.passed, summary.total())?;

    let failures: Vec<_> = summary.failures().collect();
    if !failures.is_empty() {
        eprintln!("\nFailed tests:");
        for report in failures {
            eprintln!("  - {}", report.test_id);
        }
    }
    Ok(())
}

fn print_report(writer: &mut dyn WriteColor, report: &TestReport) -> io::Result<()> {
    let passed = report.exit_code_status.is_ok() && report.output_status.is_ok();
    if passed {
        set_verdict_color(writer, Color::Green)?;
        write!(writer, "PASS")?;
    } else {
        set_verdict_color(writer, Color::Red)?;
        write!(writer, "FAIL")?;
    }
    writer.reset()?;
    writeln!(writer, ": {}", report.test_id)?;

    if let Status::Mismatch(message) = &report.exit_code_status {
        writeln!(writer, "  exit code: {}", message)?;
    }
    if let Status::Mismatch(message) = &report.output_status {
        writeln!(writer, "  output:    {}", message)?;
        print_output_diff(writer, message)?;
    }
    Ok(())
}

fn set_verdict_color(writer: &mut dyn WriteColor, color: Color) -> io::Result<()> {
    writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))
}

/// Pulls the two quoted sides back out of a mismatch message and prints a
/// word-level diff between them.
fn print_output_diff(writer: &mut dyn WriteColor, message: &str) -> io::Result<()> {
    let Some((expected, actual)) = split_mismatch(message) else {
        return Ok(());
    };
    let changeset = Changeset::new(expected, actual, " ");
    write!(writer, "  diff:     ")?;
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(text) => {
                writer.reset()?;
                write!(writer, " {}", text)?;
            }
            Difference::Add(text) => {
                writer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(writer, " +{}", text)?;
            }
            Difference::Rem(text) => {
                writer.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                write!(writer, " -{}", text)?;
            }
        }
    }
    writer.reset()?;
    writeln!(writer)?;
    Ok(())
}

fn split_mismatch(message: &str) -> Option<(&str, &str)> {
    let rest = message.strip_prefix("Should be '")?;
    let (expected, rest) = rest.split_once("' but got '")?;
    let actual = rest.strip_suffix('\'')?;
    Some((expected, actual))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_mismatch_recovers_both_sides() {
        assert_eq!(
            split_mismatch("Should be 'hello' but got 'helo'"),
            Some(("hello", "helo"))
        );
        assert_eq!(split_mismatch("Should be 42 but got 1"), None);
        assert_eq!(split_mismatch("OK"), None);
    }
}
