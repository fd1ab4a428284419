//! # codedom
//!
//! Tokenize and parse BASIC source from the command line.
//!

mod term;

fn main() -> std::process::ExitCode {
    term::main()
}
