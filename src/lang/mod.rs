/*!
# Rust Language Module

This Rust module provides pre-processing and lexical analysis of BASIC source.

*/

pub type LineNumber = usize;
pub type Column = std::ops::Range<usize>;

#[macro_use]
mod error;
mod lex;
mod line;
mod preprocess;

pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use error::ErrorKind;
pub use lex::tokenize_line;
pub use line::CodeLine;
pub use preprocess::{preprocess_line, preprocess_stream, Options, Preprocessor, SourceLine};
