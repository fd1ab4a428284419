//! # BASIC code-DOM
//!
//! Lexical analysis and a code document object model for a small,
//! block-structured BASIC.
//!
//! Source passes through four phases: pre-processing strips comments and
//! joins continued lines, the tokenizer classifies every fragment of each
//! line, a declaration scan records procedures, functions and variables,
//! and the builder assembles the statement tree.
//!
//! ```
//! use codedom::dom::{ast::BlockType, ParserWorker};
//!
//! let parse = ParserWorker::new().parse_str("IF X THEN\nPRINT \"Y\"\nENDIF\n");
//! assert!(parse.diagnostics.is_empty());
//! assert_eq!(parse.unit.statements[0].block_type(), Some(BlockType::If));
//! ```

pub mod dom;
pub mod lang;
