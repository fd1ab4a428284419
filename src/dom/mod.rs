/*!
## Rust Code-DOM Module

This Rust module scans declarations and assembles the code-DOM of a BASIC
program from its tokenized lines.

*/

mod block;
mod build;
mod declare;
mod reference;
mod render;
mod worker;

pub mod ast;

pub use build::{build, MAX_NESTING};
pub use declare::find_user_declarations;
pub use reference::{Declaration, DeclarationKind, ReferenceKey, Scope, UserReferenceTable};
pub use render::{expression_text, statement_text, Indent, Listing};
pub use worker::{Parse, ParserWorker};
