// Proba harness binary: discovers, runs, and reports file-family tests.

use std::process;

fn main() {
    process::exit(proba::cli::run());
}
