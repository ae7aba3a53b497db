//! The proba command-line interface.
//!
//! Translates flags into the core's configuration, dispatches the run, and
//! hands the aggregated results to the selected renderer. Fatal errors are
//! rendered once as a miette diagnostic and mapped to the documented
//! process exit codes.

pub mod args;
pub mod output;

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use termcolor::{ColorChoice, NoColor, StandardStream};

use crate::cli::args::{ProbaArgs, ReportFormat};
use crate::discovery;
use crate::errors::HarnessError;
use crate::harness::{resolve_mode, Harness, HarnessConfig};
use crate::render;
use crate::report::RunSummary;

/// Stand-in path used when a write to standard output fails.
const STDOUT_PATH: &str = "<stdout>";

/// The main entry point for the CLI; returns the process exit code.
pub fn run() -> i32 {
    let args = ProbaArgs::parse();
    match execute(args) {
        Ok(()) => 0,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    }
}

fn execute(args: ProbaArgs) -> Result<(), HarnessError> {
    if args.list {
        for base in discovery::discover(&args.directory, args.recursive)? {
            println!("{}", base.display());
        }
        return Ok(());
    }

    let mut config = HarnessConfig::new(&args.directory);
    config.recursive = args.recursive;
    config.mode = resolve_mode(args.parse_only, args.int_only)?;
    config.parser_cmd = args.parse_script;
    config.interpreter_cmd = args.int_script;

    let summary = Harness::new(config).run()?;
    emit(&summary, args.report, args.out.as_deref())
}

fn emit(summary: &RunSummary, format: ReportFormat, out: Option<&Path>) -> Result<(), HarnessError> {
    match format {
        ReportFormat::Console => match out {
            None => {
                let mut stream = StandardStream::stdout(color_choice());
                output::render_console(summary, &mut stream).map_err(stdout_error)
            }
            Some(path) => {
                let file = File::create(path).map_err(|err| file_error(path, err))?;
                let mut sink = NoColor::new(file);
                output::render_console(summary, &mut sink).map_err(|err| file_error(path, err))
            }
        },
        ReportFormat::Html => write_rendered(render::render_html(summary), out),
        ReportFormat::Json => {
            let text = render::render_json(summary).map_err(|err| HarnessError::Io {
                path: PathBuf::from(STDOUT_PATH),
                source: io::Error::from(err),
            })?;
            write_rendered(text, out)
        }
    }
}

fn write_rendered(text: String, out: Option<&Path>) -> Result<(), HarnessError> {
    match out {
        Some(path) => std::fs::write(path, text).map_err(|err| file_error(path, err)),
        None => {
            let mut stdout = io::stdout();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(stdout_error)
        }
    }
}

fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn file_error(path: &Path, source: io::Error) -> HarnessError {
    HarnessError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn stdout_error(source: io::Error) -> HarnessError {
    HarnessError::Io {
        path: PathBuf::from(STDOUT_PATH),
        source,
    }
}
