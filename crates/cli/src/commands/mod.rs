//! Command implementations.
//!
//! Each command renders its output to a `String` so the text can be checked in
//! tests, then prints it to stdout. Diagnostics go through `tracing` to stderr.

pub mod cart;
pub mod catalog;

/// Write rendered command output to stdout.
#[allow(clippy::print_stdout)]
fn emit(output: &str) {
    print!("{output}");
}
