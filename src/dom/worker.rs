use super::ast::{AcceptVisitor, ExecutionUnit, Expression, Visitor};
use super::build::build;
use super::declare::find_user_declarations;
use super::reference::UserReferenceTable;
use crate::lang::{CodeLine, Error, Options, Preprocessor, SourceLine};
use std::io::BufRead;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::debug;

/// Everything a parse pass produced. Diagnostics are present even when the
/// tree is usable.
#[derive(Debug, Default)]
pub struct Parse {
    pub unit: ExecutionUnit,
    pub references: UserReferenceTable,
    pub lines: Vec<CodeLine>,
    pub diagnostics: Vec<Error>,
}

impl Parse {
    fn failed(error: Error) -> Parse {
        Parse {
            diagnostics: vec![error],
            ..Parse::default()
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.diagnostics.iter().any(Error::is_fatal)
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Names used but never declared, excluding routine parameters.
    pub fn unresolved(&self) -> Vec<String> {
        let mut collector = Unresolved::default();
        self.unit.accept(&mut collector);
        collector
            .names
            .into_iter()
            .filter(|name| !self.references.is_parameter(name))
            .collect()
    }
}

#[derive(Default)]
struct Unresolved {
    names: Vec<String>,
}

impl Visitor for Unresolved {
    fn visit_expression(&mut self, expr: &Expression) {
        if let Expression::UserDefinedReference(reference) = expr {
            if reference.key.is_none()
                && !self
                    .names
                    .iter()
                    .any(|n| n.eq_ignore_ascii_case(&reference.name))
            {
                self.names.push(reference.name.clone());
            }
        }
    }
}

/// Runs one source unit through every phase. A worker is consumed by the
/// parse, so each source gets its own table.
#[derive(Debug, Default)]
pub struct ParserWorker {
    preprocessor: Preprocessor,
}

impl ParserWorker {
    pub fn new() -> ParserWorker {
        ParserWorker::default()
    }

    pub fn with_options(options: Options) -> ParserWorker {
        ParserWorker {
            preprocessor: Preprocessor::new(options),
        }
    }

    pub fn with_interrupt(self, interrupt: Arc<AtomicBool>) -> ParserWorker {
        ParserWorker {
            preprocessor: self.preprocessor.with_interrupt(interrupt),
        }
    }

    pub fn parse<R: BufRead>(self, reader: R) -> Parse {
        match self.preprocessor.stream(reader) {
            Ok(lines) => self.parse_lines(lines),
            Err(error) => Parse::failed(error),
        }
    }

    pub fn parse_str(self, source: &str) -> Parse {
        self.parse(source.as_bytes())
    }

    pub fn parse_lines(self, lines: Vec<SourceLine>) -> Parse {
        let lines: Vec<CodeLine> = lines
            .iter()
            .map(|l| CodeLine::new(l.number, &l.text))
            .collect();
        let mut diagnostics: Vec<Error> = lines.iter().flat_map(CodeLine::errors).collect();
        debug!(
            lines = lines.len(),
            errors = diagnostics.len(),
            "tokenized source"
        );
        let (references, errors) = find_user_declarations(&lines);
        debug!(
            declarations = references.len(),
            errors = errors.len(),
            "scanned declarations"
        );
        diagnostics.extend(errors);
        let (unit, errors) = build(&lines, &references);
        debug!(
            statements = unit.len(),
            errors = errors.len(),
            "built execution unit"
        );
        diagnostics.extend(errors);
        Parse {
            unit,
            references,
            lines,
            diagnostics,
        }
    }
}
