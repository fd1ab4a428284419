mod common;

use codedom::dom::{find_user_declarations, DeclarationKind};
use codedom::lang::{CodeLine, ErrorCode};
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_procedure_with_parameters() {
    let source = "\
PRINT \"start\"
PROCEDURE Foo(A, B)
  PRINT A + B
END PROCEDURE
";
    let parse = parse(source);
    assert!(parse.diagnostics.is_empty());
    let foo = parse.references.lookup("foo").unwrap();
    assert_eq!(foo.kind, DeclarationKind::Procedure);
    assert_eq!(foo.parameters, vec!["A", "B"]);
    assert_eq!(foo.line_index, 1);
    assert_eq!(foo.line_number, 2);
    assert_eq!(foo.end_index, Some(3));
    assert_eq!(foo.end_line_number, Some(4));
    assert!(foo.is_closed());
}

#[test]
fn test_line_index_skips_blank_lines() {
    let source = "\n\n' comment\nFUNCTION Half(n)\n\nHalf = n / 2\nEND FUNCTION\n";
    let parse = parse(source);
    let half = parse.references.lookup("HALF").unwrap();
    assert_eq!(half.line_index, 0);
    assert_eq!(half.line_number, 4);
    assert_eq!(half.end_index, Some(2));
    assert_eq!(half.end_line_number, Some(7));
}

#[test]
fn test_unclosed_procedure() {
    let parse = parse("PROCEDURE Run\nPRINT 1\n");
    let run = parse.references.lookup("run").unwrap();
    assert!(!run.is_closed());
    assert_eq!(codes(&parse), vec![ErrorCode::UnclosedBlock]);
    assert_eq!(parse.diagnostics[0].text(), "PROCEDURE WITHOUT END PROCEDURE");
}

#[test]
fn test_duplicate_declaration() {
    let source = "\
PROCEDURE Draw
END PROCEDURE
FUNCTION draw(x)
END FUNCTION
";
    let parse = parse(source);
    assert_eq!(codes(&parse), vec![ErrorCode::DuplicateDeclaration]);
    let error = &parse.diagnostics[0];
    assert_eq!(error.line_number(), Some(3));
    assert_eq!(error.column(), 9..13);
    assert_eq!(error.text(), "Draw FIRST DECLARED IN 1");
    assert!(!parse.is_fatal());
    let draw = parse.references.lookup("DRAW").unwrap();
    assert_eq!(draw.kind, DeclarationKind::Function);
    assert_eq!(draw.line_number, 3);
    assert_eq!(parse.references.len(), 1);
}

#[test]
fn test_nested_routines_close_innermost() {
    let lines: Vec<CodeLine> = [
        "PROCEDURE Outer",
        "FUNCTION Inner(v)",
        "END FUNCTION",
        "END PROCEDURE",
    ]
    .iter()
    .enumerate()
    .map(|(i, s)| CodeLine::new(i + 1, s))
    .collect();
    let (table, errors) = find_user_declarations(&lines);
    assert!(errors.is_empty());
    assert_eq!(table.lookup("inner").unwrap().end_index, Some(2));
    assert_eq!(table.lookup("outer").unwrap().end_index, Some(3));
}

#[test]
fn test_missing_routine_name() {
    let parse = parse("FUNCTION\nEND FUNCTION");
    assert!(parse.references.is_empty());
    assert!(codes(&parse).contains(&ErrorCode::MissingIdentifier));
}

#[test]
fn test_variables_first_assignment_wins() {
    let parse = parse("x = 1\nPRINT x\nX = 2");
    let x = parse.references.lookup("x").unwrap();
    assert_eq!(x.kind, DeclarationKind::Variable);
    assert_eq!(x.line_number, 1);
    assert!(parse.diagnostics.is_empty());
}

#[test]
fn test_keywords_case_insensitive() {
    let parse = parse("procedure foo(a)\n  print a\nEnd Procedure\n");
    assert!(parse.diagnostics.is_empty());
    let foo = parse.references.lookup("FOO").unwrap();
    assert_eq!(foo.kind, DeclarationKind::Procedure);
    assert_eq!(foo.name, "foo");
    assert_eq!(foo.end_line_number, Some(3));
}
