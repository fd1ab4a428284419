#![allow(dead_code)]

use codedom::dom::ast::{Expression, Statement};
use codedom::dom::{Parse, ParserWorker};
use codedom::lang::ErrorCode;

pub fn parse(source: &str) -> Parse {
    ParserWorker::new().parse_str(source)
}

pub fn codes(parse: &Parse) -> Vec<ErrorCode> {
    parse.diagnostics.iter().map(|e| e.code()).collect()
}

pub fn first(parse: &Parse) -> &Statement {
    &parse.unit.statements[0]
}

pub fn names(expressions: &[Expression]) -> Vec<String> {
    expressions
        .iter()
        .filter_map(|e| match e {
            Expression::UserDefinedReference(r) => Some(r.name.clone()),
            _ => None,
        })
        .collect()
}
