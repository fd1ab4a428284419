use codedom::lang::token::*;
use codedom::lang::{tokenize_line, CodeLine, ErrorCode};
use pretty_assertions::assert_eq;

fn kinds(s: &str) -> Vec<Kind> {
    tokenize_line(s).iter().map(|t| *t.kind()).collect()
}

#[test]
fn test_numeric_literals() {
    let tokens = tokenize_line("42 3.14 .5");
    assert_eq!(*tokens[0].kind(), Kind::IntegerLiteral);
    assert_eq!(tokens[0].text(), "42");
    assert_eq!(tokens[0].column(), 0..2);
    assert_eq!(*tokens[1].kind(), Kind::FloatingPointLiteral);
    assert_eq!(tokens[1].text(), "3.14");
    assert_eq!(*tokens[2].kind(), Kind::FloatingPointLiteral);
}

#[test]
fn test_malformed_number() {
    let tokens = tokenize_line("3.1.4");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_error());
    let line = CodeLine::new(4, "X = 3.1.4");
    let errors = line.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), ErrorCode::TokenizationError);
    assert_eq!(errors[0].line_number(), Some(4));
    assert_eq!(errors[0].column(), 4..9);
}

#[test]
fn test_string_content() {
    let tokens = tokenize_line("PRINT \"Hello, \"\"World\"\"\"");
    assert_eq!(tokens.len(), 2);
    assert_eq!(*tokens[1].kind(), Kind::StringLiteral);
    assert_eq!(tokens[1].text(), "Hello, \"World\"");
    assert_eq!(tokens[1].column(), 6..24);
    assert_eq!(tokens[1].to_string(), "\"Hello, \"\"World\"\"\"");
}

#[test]
fn test_unterminated_string() {
    let line = CodeLine::new(1, "PRINT \"oops");
    assert_eq!(line.tokens().len(), 2);
    assert!(line.tokens()[1].is_error());
    assert_eq!(line.tokens()[1].column(), 6..11);
    assert_eq!(line.errors()[0].text(), "UNTERMINATED STRING");
}

#[test]
fn test_case_insensitive_keywords() {
    assert_eq!(
        kinds("if x then"),
        vec![
            Kind::ReservedWord(Word::If),
            Kind::UserDefinedItem,
            Kind::ReservedWord(Word::Then)
        ]
    );
    assert_eq!(kinds("EndIf"), vec![Kind::ReservedWord(Word::EndIf)]);
    assert_eq!(kinds("len"), vec![Kind::ReservedFunction(Function::Len)]);
}

#[test]
fn test_names_with_suffix() {
    let tokens = tokenize_line("name$ = left$(a$, 2)");
    assert_eq!(*tokens[0].kind(), Kind::UserDefinedItem);
    assert_eq!(tokens[0].text(), "name$");
    assert_eq!(*tokens[2].kind(), Kind::ReservedFunction(Function::Left));
}

#[test]
fn test_operators() {
    assert_eq!(
        kinds("a <= b <> c == d = e"),
        vec![
            Kind::UserDefinedItem,
            Kind::ComparisonOperator(Operator::LessEqual),
            Kind::UserDefinedItem,
            Kind::ComparisonOperator(Operator::NotEqual),
            Kind::UserDefinedItem,
            Kind::ComparisonOperator(Operator::Equal),
            Kind::UserDefinedItem,
            Kind::AssignmentOperator(Operator::Assign),
            Kind::UserDefinedItem,
        ]
    );
    assert_eq!(
        kinds("i++ x MOD 2"),
        vec![
            Kind::UserDefinedItem,
            Kind::IncrementOperator,
            Kind::UserDefinedItem,
            Kind::ArithmeticOperator(Operator::Modulus),
            Kind::IntegerLiteral,
        ]
    );
    assert_eq!(
        kinds("a AND NOT b"),
        vec![
            Kind::UserDefinedItem,
            Kind::LogicalOperator(Operator::And),
            Kind::LogicalOperator(Operator::Not),
            Kind::UserDefinedItem,
        ]
    );
}

#[test]
fn test_delimiters() {
    assert_eq!(
        kinds("(a[1], #2; b) : c"),
        vec![
            Kind::BlockStartDelimiter,
            Kind::UserDefinedItem,
            Kind::SizingStartDelimiter,
            Kind::IntegerLiteral,
            Kind::SizingEndDelimiter,
            Kind::SeparatorDelimiter,
            Kind::HandleDelimiter,
            Kind::IntegerLiteral,
            Kind::SeparatorDelimiter,
            Kind::UserDefinedItem,
            Kind::BlockEndDelimiter,
            Kind::ExpressionEndDelimiter,
            Kind::UserDefinedItem,
        ]
    );
}

#[test]
fn test_unexpected_character() {
    let line = CodeLine::new(2, "a @ b");
    assert_eq!(line.tokens().len(), 3);
    assert!(line.tokens()[1].is_error());
    assert_eq!(line.errors()[0].text(), "UNEXPECTED CHARACTER");
}

#[test]
fn test_line_is_stateless() {
    let a = tokenize_line("FOR i = 1 TO 10 STEP 2");
    let b = tokenize_line("FOR i = 1 TO 10 STEP 2");
    assert_eq!(a, b);
}

#[test]
fn test_statements_split() {
    let line = CodeLine::new(1, "a = 1 : : PRINT a");
    let runs: Vec<usize> = line.statements().map(|s| s.len()).collect();
    assert_eq!(runs, vec![3, 2]);
}
